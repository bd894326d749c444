// File: crates/healchart-core/src/tooltip.rs
// Summary: Tooltip HTML templates and browser-compatible number formatting.

use crate::record::HealValue;

pub const LINE_BREAK: &str = "<br />";

/// Number printed the way a browser prints it: `1200`, `12.5`, `NaN`.
pub fn plain_number(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else if v == 0.0 {
        "0".to_string()
    } else if v.abs() >= 1e21 || v.abs() < 1e-6 {
        // Exponent form with an explicit sign: `1e+21`, `1.5e-7`.
        let exp = format!("{:e}", v);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        }
    } else {
        format!("{}", v)
    }
}

/// Zero-decimal rounding with halves away from zero, as `Number.prototype.toFixed(0)`.
pub fn fixed0(v: f64) -> String {
    if !v.is_finite() {
        return plain_number(v);
    }
    let r = v.round();
    if r == 0.0 {
        if v < 0.0 { "-0".to_string() } else { "0".to_string() }
    } else {
        plain_number(r)
    }
}

/// Min/max of percent and fixed over a set of values. NaN anywhere poisons the
/// affected bound; an empty set yields (+inf, -inf).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    pub min_percent: f64,
    pub max_percent: f64,
    pub min_fixed: f64,
    pub max_fixed: f64,
}

impl ValueRange {
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = HealValue>,
    {
        let init = Self {
            min_percent: f64::INFINITY,
            max_percent: f64::NEG_INFINITY,
            min_fixed: f64::INFINITY,
            max_fixed: f64::NEG_INFINITY,
        };
        values.into_iter().fold(init, |acc, v| Self {
            min_percent: nan_min(acc.min_percent, v.percent),
            max_percent: nan_max(acc.max_percent, v.percent),
            min_fixed: nan_min(acc.min_fixed, v.fixed),
            max_fixed: nan_max(acc.max_fixed, v.fixed),
        })
    }
}

fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.min(b) }
}

fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) }
}

pub fn join_names(names: &[String]) -> String {
    names.join(LINE_BREAK)
}

pub fn fixed_point(value: HealValue, names: &[String]) -> String {
    format!(
        "<strong>{}% + {}</strong>{}{}",
        fixed0(value.percent),
        plain_number(value.fixed),
        LINE_BREAK,
        join_names(names)
    )
}

pub fn revival_point(value: HealValue, names: &[String]) -> String {
    format!(
        "<strong>Revival: {}% + {}</strong>{}{}",
        fixed0(value.percent),
        plain_number(value.fixed),
        LINE_BREAK,
        join_names(names)
    )
}

/// `"min~max% + min~max"`, then the hovered outcome, then the names.
pub fn chance_point(range: ValueRange, point: HealValue, names: &[String]) -> String {
    format!(
        "<strong>{}~{}% + {}~{}{br}{}% + {}</strong>{br}{}",
        fixed0(range.min_percent),
        fixed0(range.max_percent),
        fixed0(range.min_fixed),
        fixed0(range.max_fixed),
        fixed0(point.percent),
        fixed0(point.fixed),
        join_names(names),
        br = LINE_BREAK,
    )
}

pub fn timed_point(base_percent: f64, max_fixed: f64, names: &[String]) -> String {
    format!(
        "<strong>{}% + {}</strong>{}{}",
        fixed0(base_percent),
        fixed0(max_fixed),
        LINE_BREAK,
        join_names(names)
    )
}

/// Tooltip markup reduced to plain text lines, for SVG `<title>` elements.
pub fn to_plain_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let Some(end) = rest[start..].find('>') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let tag = &rest[start + 1..start + end];
        if tag.trim_end_matches('/').trim().eq_ignore_ascii_case("br") {
            out.push('\n');
        }
        rest = &rest[start + end + 1..];
    }
    out.push_str(rest);
    out
}
