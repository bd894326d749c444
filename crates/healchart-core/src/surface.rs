// File: crates/healchart-core/src/surface.rs
// Summary: Retained drawing surface with a keyed enter/update/exit data-join and pointer dispatch.
// Notes:
// - Each renderer owns one mark class; `join` never touches marks of other classes,
//   so several series can share one surface.
// - Handlers are reference-counted closures: they are installed at render time and
//   fired later from the UI event loop.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::types::Color;

/// Pointer position in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub type MoveHandler = Rc<dyn Fn(&PointerEvent)>;
pub type LeaveHandler = Rc<dyn Fn()>;

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Circle { cx: f64, cy: f64, r: f64 },
    /// Polyline through the points, in order.
    Path { points: Vec<(f64, f64)> },
}

impl Shape {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match *self {
            Shape::Circle { cx, cy, r } => {
                let (dx, dy) = (x - cx, y - cy);
                dx * dx + dy * dy <= r * r
            }
            Shape::Path { .. } => false,
        }
    }
}

/// Presentation attributes; `None` leaves the attribute unset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: Option<f64>,
    pub opacity: Option<f64>,
}

impl Style {
    pub fn filled(color: Color) -> Self {
        Self { fill: Some(color), ..Self::default() }
    }

    pub fn stroked(color: Color, width: f64) -> Self {
        Self { stroke: Some(color), stroke_width: Some(width), ..Self::default() }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

/// One datum's desired mark, as produced by a renderer for `Surface::join`.
pub struct MarkSpec {
    pub key: String,
    pub shape: Shape,
    pub style: Style,
    pub on_move: Option<MoveHandler>,
    pub on_leave: Option<LeaveHandler>,
}

impl MarkSpec {
    pub fn new(key: impl Into<String>, shape: Shape, style: Style) -> Self {
        Self { key: key.into(), shape, style, on_move: None, on_leave: None }
    }

    pub fn on_hover(mut self, on_move: MoveHandler, on_leave: LeaveHandler) -> Self {
        self.on_move = Some(on_move);
        self.on_leave = Some(on_leave);
        self
    }
}

pub struct Mark {
    pub class: &'static str,
    pub key: String,
    pub shape: Shape,
    pub style: Style,
    on_move: Option<MoveHandler>,
    on_leave: Option<LeaveHandler>,
}

impl Mark {
    pub fn is_interactive(&self) -> bool {
        self.on_move.is_some()
    }

    pub fn fire_move(&self, event: &PointerEvent) {
        if let Some(handler) = &self.on_move {
            handler(event);
        }
    }

    pub fn fire_leave(&self) {
        if let Some(handler) = &self.on_leave {
            handler();
        }
    }
}

// Handlers are not comparable; two marks are equal when they draw the same thing.
impl PartialEq for Mark {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class
            && self.key == other.key
            && self.shape == other.shape
            && self.style == other.style
            && self.on_move.is_some() == other.on_move.is_some()
    }
}

impl fmt::Debug for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mark")
            .field("class", &self.class)
            .field("key", &self.key)
            .field("shape", &self.shape)
            .field("style", &self.style)
            .field("interactive", &self.is_interactive())
            .finish()
    }
}

/// Counts from one data-join.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoinStats {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

/// A named region of the chart (an SVG `<g>`), populated by renderers.
pub struct Surface {
    pub name: String,
    marks: Vec<Mark>,
    hovered: Option<(&'static str, String)>,
}

impl Surface {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), marks: Vec::new(), hovered: None }
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn marks_of<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Mark> + 'a {
        self.marks.iter().filter(move |m| m.class == class)
    }

    pub fn find(&self, class: &str, key: &str) -> Option<&Mark> {
        self.marks.iter().find(|m| m.class == class && m.key == key)
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Reconcile the marks of `class` against `items`.
    ///
    /// Keys already present are updated in place, new keys enter, and class marks
    /// whose key is absent from `items` exit. Afterwards the class marks follow the
    /// order of `items` and sit where the class's first mark used to be (or at the
    /// end when the class was empty). A key repeated within `items` is suffixed with
    /// `#n` for its n-th repeat so every datum keeps its own mark.
    pub fn join<I>(&mut self, class: &'static str, items: I) -> JoinStats
    where
        I: IntoIterator<Item = MarkSpec>,
    {
        // Everything before the first class mark belongs to other classes.
        let anchor = self.marks.iter().position(|m| m.class == class);

        let mut others = Vec::with_capacity(self.marks.len());
        let mut previous: HashMap<String, Mark> = HashMap::new();
        for mark in self.marks.drain(..) {
            if mark.class == class {
                previous.insert(mark.key.clone(), mark);
            } else {
                others.push(mark);
            }
        }

        let mut stats = JoinStats::default();
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut joined = Vec::new();
        for spec in items {
            let count = seen.entry(spec.key.clone()).or_insert(0);
            let key = if *count == 0 { spec.key } else { format!("{}#{}", spec.key, count) };
            *count += 1;

            if previous.remove(&key).is_some() {
                stats.updated += 1;
            } else {
                stats.entered += 1;
            }
            joined.push(Mark {
                class,
                key,
                shape: spec.shape,
                style: spec.style,
                on_move: spec.on_move,
                on_leave: spec.on_leave,
            });
        }
        stats.exited = previous.len();

        if let Some((hovered_class, hovered_key)) = &self.hovered {
            if *hovered_class == class && previous.contains_key(hovered_key) {
                self.hovered = None;
            }
        }

        let at = anchor.unwrap_or(others.len()).min(others.len());
        others.splice(at..at, joined);
        self.marks = others;

        tracing::trace!(
            surface = %self.name,
            class,
            entered = stats.entered,
            updated = stats.updated,
            exited = stats.exited,
            "joined marks"
        );
        stats
    }

    /// Topmost interactive mark under the pointer.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&Mark> {
        self.marks
            .iter()
            .rev()
            .find(|m| m.is_interactive() && m.shape.contains(x, y))
    }

    /// Pointer moved over the surface: leave the previously hovered mark if it
    /// changed, then fire the move handler of the mark under the pointer.
    pub fn pointer_move(&mut self, event: &PointerEvent) {
        let hit = self
            .hit_test(event.x, event.y)
            .map(|m| (m.class, m.key.clone()));

        if self.hovered != hit {
            if let Some((class, key)) = self.hovered.take() {
                if let Some(mark) = self.find(class, &key) {
                    mark.fire_leave();
                }
            }
        }
        self.hovered = hit;

        if let Some((class, key)) = &self.hovered {
            if let Some(mark) = self.find(class, key) {
                mark.fire_move(event);
            }
        }
    }

    /// Pointer left the surface.
    pub fn pointer_leave(&mut self) {
        if let Some((class, key)) = self.hovered.take() {
            if let Some(mark) = self.find(class, &key) {
                mark.fire_leave();
            }
        }
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("name", &self.name)
            .field("marks", &self.marks)
            .finish()
    }
}
