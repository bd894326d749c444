// File: crates/healchart-core/src/series/mod.rs
// Summary: Series renderer trait, tooltip hooks and the shared point/line styling.

use std::cell::RefCell;
use std::rc::Rc;

use crate::record::HealingRecord;
use crate::scale::Scale;
use crate::surface::{JoinStats, LeaveHandler, PointerEvent, Surface};

mod chance;
mod fixed;
mod timed;

pub use chance::{sorted_outcomes, ChanceLineRenderer, ChancePointRenderer};
pub use fixed::{FixedPointRenderer, RevivalPointRenderer};
pub use timed::{progression, TimedLineRenderer, TimedPointRenderer};

/// Radius of every scatter mark, in pixels.
pub const POINT_RADIUS: f64 = 4.0;
/// Stroke width of connecting lines, in pixels.
pub const LINE_WIDTH: f64 = 2.0;

/// Draws one data series onto a surface, scoped to the marks of `CLASS`.
pub trait SeriesRenderer {
    type Data: ?Sized;
    const CLASS: &'static str;

    /// Join `data` against the surface's `CLASS` marks. Calling it again with the
    /// same inputs leaves the surface unchanged.
    fn render(&self, surface: &mut Surface, data: &Self::Data, x: &dyn Scale, y: &dyn Scale) -> JoinStats;
}

/// Points plus the records they were projected from (for tooltip lookups).
#[derive(Clone, Debug)]
pub struct PointSet<P> {
    pub points: Rc<[P]>,
    pub records: Rc<[HealingRecord]>,
}

impl<P> PointSet<P> {
    pub fn new(points: impl Into<Rc<[P]>>, records: impl Into<Rc<[HealingRecord]>>) -> Self {
        Self { points: points.into(), records: records.into() }
    }
}

/// Receiver of tooltip show/hide requests, usually owned by the UI layer.
pub trait TooltipSink {
    fn show(&self, event: &PointerEvent, html: &str);
    fn hide(&self);
}

/// Caller-owned callbacks wired into every hoverable mark.
#[derive(Clone)]
pub struct TooltipHooks {
    show: Rc<dyn Fn(&PointerEvent, &str)>,
    hide: Rc<dyn Fn()>,
    format_name: Rc<dyn Fn(&HealingRecord) -> String>,
}

impl TooltipHooks {
    pub fn new(
        show: impl Fn(&PointerEvent, &str) + 'static,
        hide: impl Fn() + 'static,
        format_name: impl Fn(&HealingRecord) -> String + 'static,
    ) -> Self {
        Self { show: Rc::new(show), hide: Rc::new(hide), format_name: Rc::new(format_name) }
    }

    pub fn from_sink<S>(sink: Rc<S>, format_name: impl Fn(&HealingRecord) -> String + 'static) -> Self
    where
        S: TooltipSink + 'static,
    {
        let hide_sink = Rc::clone(&sink);
        Self::new(
            move |event, html| sink.show(event, html),
            move || hide_sink.hide(),
            format_name,
        )
    }

    pub fn show(&self, event: &PointerEvent, html: &str) {
        (self.show)(event, html)
    }

    pub fn hide(&self) {
        (self.hide)()
    }

    pub fn name(&self, record: &HealingRecord) -> String {
        (self.format_name)(record)
    }

    pub(crate) fn names<'a>(&self, records: impl IntoIterator<Item = &'a HealingRecord>) -> Vec<String> {
        records.into_iter().map(|r| self.name(r)).collect()
    }

    pub(crate) fn leave_handler(&self) -> LeaveHandler {
        let hide = Rc::clone(&self.hide);
        Rc::new(move || hide())
    }
}

/// Sink that keeps the latest tooltip; used for SVG `<title>` export and tests.
#[derive(Debug, Default)]
pub struct TooltipCapture {
    current: RefCell<Option<String>>,
    shown: RefCell<usize>,
}

impl TooltipCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tooltip currently shown, if any.
    pub fn current(&self) -> Option<String> {
        self.current.borrow().clone()
    }

    /// Number of `show` calls so far.
    pub fn shown(&self) -> usize {
        *self.shown.borrow()
    }

    pub fn take(&self) -> Option<String> {
        self.current.borrow_mut().take()
    }
}

impl TooltipSink for TooltipCapture {
    fn show(&self, _event: &PointerEvent, html: &str) {
        *self.current.borrow_mut() = Some(html.to_string());
        *self.shown.borrow_mut() += 1;
    }

    fn hide(&self) {
        *self.current.borrow_mut() = None;
    }
}
