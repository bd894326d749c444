// File: crates/healchart-core/src/series/timed.rs
// Summary: Time-stepped heals: faded progression points and base-through-steps lines.

use std::rc::Rc;

use super::{PointSet, SeriesRenderer, TooltipHooks, LINE_WIDTH, POINT_RADIUS};
use crate::points::TimedPoint;
use crate::record::{HealValue, HealingRecord, Step};
use crate::scale::Scale;
use crate::surface::{JoinStats, MarkSpec, MoveHandler, PointerEvent, Shape, Style, Surface};
use crate::tooltip;
use crate::types::Color;

/// Terminal points are opaque and carry the tooltip; intermediate points are
/// nearly transparent and ignore hover.
pub struct TimedPointRenderer {
    hooks: TooltipHooks,
    color: Color,
}

impl TimedPointRenderer {
    pub const TERMINAL_OPACITY: f64 = 1.0;
    pub const FADED_OPACITY: f64 = 0.05;

    pub fn new(hooks: TooltipHooks) -> Self {
        Self { hooks, color: Color::CRIMSON }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

fn point_key(point: &TimedPoint) -> String {
    match point.tick {
        Some(tick) => format!("{}:{}", point.id, tick),
        None => format!("{}:base", point.id),
    }
}

impl SeriesRenderer for TimedPointRenderer {
    type Data = PointSet<TimedPoint>;
    const CLASS: &'static str = "timed-point";

    fn render(&self, surface: &mut Surface, data: &Self::Data, x: &dyn Scale, y: &dyn Scale) -> JoinStats {
        let specs = data.points.iter().map(|point| {
            let point = *point;
            let opacity = if point.is_terminal() { Self::TERMINAL_OPACITY } else { Self::FADED_OPACITY };
            let on_move: MoveHandler = {
                let records = Rc::clone(&data.records);
                let hooks = self.hooks.clone();
                Rc::new(move |event: &PointerEvent| {
                    if !point.is_terminal() {
                        return;
                    }
                    // Step points sit at the step's percent, so the base percent to match on
                    // comes from the point's own record. Only the first match's steps feed
                    // the displayed total.
                    let base_percent = records
                        .iter()
                        .find(|r| r.id == point.id)
                        .and_then(HealingRecord::timed)
                        .map_or(point.percent, |t| t.base.percent);
                    let matches: Vec<&HealingRecord> = records
                        .iter()
                        .filter(|r| r.timed().is_some_and(|t| t.base.percent == base_percent))
                        .collect();
                    let Some(timed) = matches.first().and_then(|r| r.timed()) else {
                        tracing::debug!(id = point.id, "terminal point has no record with that base; tooltip skipped");
                        return;
                    };
                    let max_fixed = timed.last_step().map_or(timed.base.fixed, |s| s.fixed);
                    let names = hooks.names(matches.iter().copied());
                    hooks.show(event, &tooltip::timed_point(timed.base.percent, max_fixed, &names));
                })
            };
            MarkSpec::new(
                point_key(&point),
                Shape::Circle { cx: x.map(point.percent), cy: y.map(point.fixed), r: POINT_RADIUS },
                Style::filled(self.color).with_opacity(opacity),
            )
            .on_hover(on_move, self.hooks.leave_handler())
        });
        surface.join(Self::CLASS, specs)
    }
}

/// Base value followed by the steps in ascending tick order. Non-timed records
/// yield an empty progression.
pub fn progression(record: &HealingRecord) -> Vec<HealValue> {
    let Some(timed) = record.timed() else { return Vec::new() };
    let mut steps: Vec<Step> = timed.steps.clone();
    steps.sort_by_key(|s| s.tick);
    std::iter::once(timed.base)
        .chain(steps.iter().map(Step::value))
        .collect()
}

pub struct TimedLineRenderer {
    color: Color,
}

impl TimedLineRenderer {
    pub const OPACITY: f64 = 0.05;

    pub fn new() -> Self {
        Self { color: Color::RED }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for TimedLineRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesRenderer for TimedLineRenderer {
    type Data = [HealingRecord];
    const CLASS: &'static str = "timed-line";

    fn render(&self, surface: &mut Surface, data: &Self::Data, x: &dyn Scale, y: &dyn Scale) -> JoinStats {
        let style = Style::stroked(self.color, LINE_WIDTH).with_opacity(Self::OPACITY);
        let specs = data.iter().map(|record| {
            let points = progression(record)
                .iter()
                .map(|v| (x.map(v.percent), y.map(v.fixed)))
                .collect();
            MarkSpec::new(record.id.to_string(), Shape::Path { points }, style.clone())
        });
        surface.join(Self::CLASS, specs)
    }
}
