// File: crates/healchart-core/src/series/fixed.rs
// Summary: Scatter points for instant heals and for revival heals.

use std::rc::Rc;

use super::{SeriesRenderer, TooltipHooks, POINT_RADIUS};
use crate::record::{HealValue, HealingRecord};
use crate::scale::Scale;
use crate::surface::{JoinStats, MarkSpec, MoveHandler, PointerEvent, Shape, Style, Surface};
use crate::tooltip;
use crate::types::Color;

type Template = fn(HealValue, &[String]) -> String;

/// One mark per record at `(x(percent), y(fixed))`. Hover lists every record
/// sharing the exact same value.
fn render_instant(
    surface: &mut Surface,
    class: &'static str,
    records: &Rc<[HealingRecord]>,
    x: &dyn Scale,
    y: &dyn Scale,
    hooks: &TooltipHooks,
    color: Color,
    template: Template,
) -> JoinStats {
    let specs = records.iter().map(|record| {
        let value = record.instant_value();
        let on_move: MoveHandler = {
            let records = Rc::clone(records);
            let hooks = hooks.clone();
            Rc::new(move |event: &PointerEvent| {
                let names = hooks.names(records.iter().filter(|r| r.instant_value().same_as(&value)));
                hooks.show(event, &template(value, &names));
            })
        };
        MarkSpec::new(
            record.id.to_string(),
            Shape::Circle { cx: x.map(value.percent), cy: y.map(value.fixed), r: POINT_RADIUS },
            Style::filled(color),
        )
        .on_hover(on_move, hooks.leave_handler())
    });
    surface.join(class, specs)
}

pub struct FixedPointRenderer {
    hooks: TooltipHooks,
    color: Color,
}

impl FixedPointRenderer {
    pub fn new(hooks: TooltipHooks) -> Self {
        Self { hooks, color: Color::STEELBLUE }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl SeriesRenderer for FixedPointRenderer {
    type Data = Rc<[HealingRecord]>;
    const CLASS: &'static str = "fixed-point";

    fn render(&self, surface: &mut Surface, data: &Self::Data, x: &dyn Scale, y: &dyn Scale) -> JoinStats {
        render_instant(surface, Self::CLASS, data, x, y, &self.hooks, self.color, tooltip::fixed_point)
    }
}

/// Same as [`FixedPointRenderer`] for revival items, with its own color and a
/// `Revival:` tooltip header.
pub struct RevivalPointRenderer {
    hooks: TooltipHooks,
    color: Color,
}

impl RevivalPointRenderer {
    pub fn new(hooks: TooltipHooks) -> Self {
        Self { hooks, color: Color::GREEN }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl SeriesRenderer for RevivalPointRenderer {
    type Data = Rc<[HealingRecord]>;
    const CLASS: &'static str = "revival-point";

    fn render(&self, surface: &mut Surface, data: &Self::Data, x: &dyn Scale, y: &dyn Scale) -> JoinStats {
        render_instant(surface, Self::CLASS, data, x, y, &self.hooks, self.color, tooltip::revival_point)
    }
}
