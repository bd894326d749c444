// File: crates/healchart-core/src/svg.rs
// Summary: SVG serialization of surfaces and composed chart scenes.

use std::fmt::Write as _;

use crate::chart::ChartScene;
use crate::series::TooltipCapture;
use crate::surface::{Mark, PointerEvent, Shape, Surface};
use crate::tooltip::{plain_number, to_plain_text};

pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Coordinate rounded to 1/100 px.
fn num(v: f64) -> String {
    if v.is_finite() { plain_number((v * 100.0).round() / 100.0) } else { plain_number(v) }
}

/// `M x,y L x,y ...` for a polyline; `None` for an empty one.
pub fn path_data(points: &[(f64, f64)]) -> Option<String> {
    let mut it = points.iter();
    let &(x0, y0) = it.next()?;
    let mut d = format!("M{},{}", num(x0), num(y0));
    for &(x, y) in it {
        let _ = write!(d, "L{},{}", num(x), num(y));
    }
    Some(d)
}

fn write_mark(out: &mut String, mark: &Mark, title: Option<&str>) {
    let style = &mark.style;
    let mut attrs = String::new();
    match &mark.shape {
        Shape::Circle { cx, cy, r } => {
            let _ = write!(attrs, r#" cx="{}" cy="{}" r="{}""#, num(*cx), num(*cy), num(*r));
        }
        Shape::Path { points } => {
            if let Some(d) = path_data(points) {
                let _ = write!(attrs, r#" d="{}""#, d);
            }
        }
    }
    match (&style.fill, &mark.shape) {
        (Some(fill), _) => { let _ = write!(attrs, r#" fill="{}""#, fill.to_css()); }
        (None, Shape::Path { .. }) => attrs.push_str(r#" fill="none""#),
        (None, Shape::Circle { .. }) => {}
    }
    if let Some(stroke) = &style.stroke {
        let _ = write!(attrs, r#" stroke="{}""#, stroke.to_css());
    }
    if let Some(w) = style.stroke_width {
        let _ = write!(attrs, r#" stroke-width="{}""#, num(w));
    }
    if let Some(o) = style.opacity {
        let _ = write!(attrs, r#" opacity="{}""#, plain_number(o));
    }
    let tag = match mark.shape {
        Shape::Circle { .. } => "circle",
        Shape::Path { .. } => "path",
    };
    let _ = write!(out, r#"<{tag} class="{}" data-key="{}"{attrs}"#, mark.class, escape_xml(&mark.key));
    match title {
        Some(text) => {
            let _ = writeln!(out, "><title>{}</title></{tag}>", escape_xml(text));
        }
        None => out.push_str("/>\n"),
    }
}

/// Tooltip text a hover at the mark's center would show.
fn capture_title(mark: &Mark, capture: &TooltipCapture) -> Option<String> {
    let Shape::Circle { cx, cy, .. } = mark.shape else { return None };
    if !mark.is_interactive() {
        return None;
    }
    capture.take();
    mark.fire_move(&PointerEvent::new(cx, cy));
    capture.take().map(|html| to_plain_text(&html))
}

/// One `<g>` per surface; marks in surface order.
pub fn write_surface(out: &mut String, surface: &Surface, titles: Option<&TooltipCapture>) {
    let _ = writeln!(out, r#"<g class="{}">"#, escape_xml(&surface.name));
    for mark in surface.marks() {
        let title = titles.and_then(|capture| capture_title(mark, capture));
        write_mark(out, mark, title.as_deref());
    }
    out.push_str("</g>\n");
}

/// Full SVG document: background, grid, axes, labels and every layer.
pub fn document(scene: &ChartScene, titles: Option<&TooltipCapture>) -> String {
    let o = &scene.options;
    let t = &scene.theme;
    let rect = scene.rect;
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = o.width,
        h = o.height
    );
    let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="{}"/>"#, t.background.to_css());

    let n = o.tick_count.max(2);
    let x_ticks = scene.x.ticks(n);
    let y_ticks = scene.y.ticks(n);

    if o.draw_grid {
        let _ = writeln!(out, r#"<g class="grid" stroke="{}" stroke-width="1">"#, t.grid.to_css());
        for v in &x_ticks {
            let px = num(scene.x.to_px(*v));
            let _ = writeln!(out, r#"<line x1="{px}" y1="{}" x2="{px}" y2="{}"/>"#, num(rect.top), num(rect.bottom));
        }
        for v in &y_ticks {
            let py = num(scene.y.to_px(*v));
            let _ = writeln!(out, r#"<line x1="{}" y1="{py}" x2="{}" y2="{py}"/>"#, num(rect.left), num(rect.right));
        }
        out.push_str("</g>\n");
    }

    let _ = writeln!(out, r#"<g class="axes" stroke="{}" stroke-width="1.5">"#, t.axis_line.to_css());
    let _ = writeln!(
        out,
        r#"<line x1="{l}" y1="{b}" x2="{r}" y2="{b}"/>"#,
        l = num(rect.left),
        r = num(rect.right),
        b = num(rect.bottom)
    );
    let _ = writeln!(
        out,
        r#"<line x1="{l}" y1="{t}" x2="{l}" y2="{b}"/>"#,
        l = num(rect.left),
        t = num(rect.top),
        b = num(rect.bottom)
    );
    out.push_str("</g>\n");

    if o.draw_labels {
        let _ = writeln!(
            out,
            r#"<g class="labels" fill="{}" font-family="sans-serif" font-size="11">"#,
            t.tick.to_css()
        );
        for v in &x_ticks {
            let _ = writeln!(
                out,
                r#"<text x="{}" y="{}" text-anchor="middle">{}</text>"#,
                num(scene.x.to_px(*v)),
                num(rect.bottom + 16.0),
                num(*v)
            );
        }
        for v in &y_ticks {
            let _ = writeln!(
                out,
                r#"<text x="{}" y="{}" text-anchor="end" dominant-baseline="middle">{}</text>"#,
                num(rect.left - 6.0),
                num(scene.y.to_px(*v)),
                num(*v)
            );
        }
        out.push_str("</g>\n");
        let _ = writeln!(
            out,
            r#"<text class="x-title" x="{}" y="{}" text-anchor="middle" fill="{}" font-family="sans-serif" font-size="13">{}</text>"#,
            num((rect.left + rect.right) / 2.0),
            num(rect.bottom + 38.0),
            t.axis_label.to_css(),
            escape_xml(&o.x_label)
        );
        let cy = num((rect.top + rect.bottom) / 2.0);
        let _ = writeln!(
            out,
            r#"<text class="y-title" x="16" y="{cy}" transform="rotate(-90 16 {cy})" text-anchor="middle" fill="{}" font-family="sans-serif" font-size="13">{}</text>"#,
            t.axis_label.to_css(),
            escape_xml(&o.y_label)
        );
    }

    for layer in &scene.layers {
        write_surface(&mut out, layer, titles);
    }
    out.push_str("</svg>\n");
    out
}
