// File: crates/healchart-core/src/series/chance.rs
// Summary: Chance outcomes as scatter points plus one connecting line per record.

use std::rc::Rc;

use super::{PointSet, SeriesRenderer, TooltipHooks, LINE_WIDTH, POINT_RADIUS};
use crate::points::ChancePoint;
use crate::record::{HealValue, HealingRecord, Outcome};
use crate::scale::Scale;
use crate::surface::{JoinStats, MarkSpec, MoveHandler, PointerEvent, Shape, Style, Surface};
use crate::tooltip::{self, ValueRange};
use crate::types::Color;

pub struct ChancePointRenderer {
    hooks: TooltipHooks,
    color: Color,
}

impl ChancePointRenderer {
    pub const OPACITY: f64 = 0.75;

    pub fn new(hooks: TooltipHooks) -> Self {
        Self { hooks, color: Color::CORAL }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl SeriesRenderer for ChancePointRenderer {
    type Data = PointSet<ChancePoint>;
    const CLASS: &'static str = "chance-point";

    fn render(&self, surface: &mut Surface, data: &Self::Data, x: &dyn Scale, y: &dyn Scale) -> JoinStats {
        let style = Style::filled(self.color).with_opacity(Self::OPACITY);
        let specs = data.points.iter().map(|point| {
            let point = *point;
            let on_move: MoveHandler = {
                let records = Rc::clone(&data.records);
                let hooks = self.hooks.clone();
                Rc::new(move |event: &PointerEvent| {
                    let matches: Vec<&HealingRecord> = records.iter().filter(|r| r.id == point.id).collect();
                    if matches.is_empty() {
                        tracing::debug!(id = point.id, "chance point has no source record; tooltip skipped");
                        return;
                    }
                    let range = ValueRange::of(
                        matches.iter().flat_map(|r| r.outcomes().iter().map(Outcome::value)),
                    );
                    let names = hooks.names(matches.iter().copied());
                    let html = tooltip::chance_point(range, HealValue::new(point.percent, point.fixed), &names);
                    hooks.show(event, &html);
                })
            };
            MarkSpec::new(
                point.id.to_string(),
                Shape::Circle { cx: x.map(point.percent), cy: y.map(point.fixed), r: POINT_RADIUS },
                style.clone(),
            )
            .on_hover(on_move, self.hooks.leave_handler())
        });
        surface.join(Self::CLASS, specs)
    }
}

/// Outcomes ordered by ascending percent; the record's own vector is left as is.
pub fn sorted_outcomes(record: &HealingRecord) -> Vec<Outcome> {
    let mut outcomes = record.outcomes().to_vec();
    outcomes.sort_by(|a, b| a.percent.total_cmp(&b.percent));
    outcomes
}

/// One unfilled, translucent path per record through its outcomes sorted by percent.
pub struct ChanceLineRenderer {
    color: Color,
}

impl ChanceLineRenderer {
    pub const OPACITY: f64 = 0.3;

    pub fn new() -> Self {
        Self { color: Color::CORAL }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for ChanceLineRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesRenderer for ChanceLineRenderer {
    type Data = [HealingRecord];
    const CLASS: &'static str = "chance-line";

    fn render(&self, surface: &mut Surface, data: &Self::Data, x: &dyn Scale, y: &dyn Scale) -> JoinStats {
        let style = Style::stroked(self.color, LINE_WIDTH).with_opacity(Self::OPACITY);
        let specs = data.iter().map(|record| {
            let points = sorted_outcomes(record)
                .iter()
                .map(|o| (x.map(o.percent), y.map(o.fixed)))
                .collect();
            MarkSpec::new(record.id.to_string(), Shape::Path { points }, style.clone())
        });
        surface.join(Self::CLASS, specs)
    }
}
