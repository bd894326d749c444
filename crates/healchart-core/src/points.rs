// File: crates/healchart-core/src/points.rs
// Summary: Flattened plot points projected from chance and timed records.

use crate::record::HealingRecord;

/// One chance outcome, pointing back at its record through `id`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChancePoint {
    pub percent: f64,
    pub fixed: f64,
    pub id: u64,
}

/// One point of a timed progression. The base value carries no tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedPoint {
    pub percent: f64,
    pub fixed: f64,
    pub id: u64,
    pub tick: Option<u32>,
    pub max_ticks: Option<u32>,
}

impl TimedPoint {
    /// True for the final step of a progression.
    /// A missing tick reads as 0 and a missing (or zero) `max_ticks` as -1,
    /// so base points and tickless records are never terminal.
    pub fn is_terminal(&self) -> bool {
        let tick = i64::from(self.tick.unwrap_or(0));
        let max = self
            .max_ticks
            .filter(|m| *m != 0)
            .map(i64::from)
            .unwrap_or(-1);
        tick == max
    }
}

pub fn chance_points(records: &[HealingRecord]) -> Vec<ChancePoint> {
    records
        .iter()
        .flat_map(|r| {
            r.outcomes().iter().map(move |o| ChancePoint {
                percent: o.percent,
                fixed: o.fixed,
                id: r.id,
            })
        })
        .collect()
}

/// Base point followed by every step, in input order.
pub fn timed_points(records: &[HealingRecord]) -> Vec<TimedPoint> {
    let mut out = Vec::new();
    for r in records {
        let Some(timed) = r.timed() else { continue };
        let max_ticks = timed.max_tick();
        out.push(TimedPoint {
            percent: timed.base.percent,
            fixed: timed.base.fixed,
            id: r.id,
            tick: None,
            max_ticks,
        });
        out.extend(timed.steps.iter().map(|s| TimedPoint {
            percent: s.percent,
            fixed: s.fixed,
            id: r.id,
            tick: Some(s.tick),
            max_ticks,
        }));
    }
    out
}
