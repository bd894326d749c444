// File: crates/healchart-core/src/lib.rs
// Summary: Core library entry point; exports the healing data model, series renderers and chart composition.

pub mod chart;
pub mod error;
pub mod grid;
pub mod points;
pub mod record;
pub mod scale;
pub mod series;
pub mod surface;
pub mod svg;
pub mod theme;
pub mod tooltip;
pub mod types;

pub use chart::{ChartScene, HealingChart, PlotRect, RenderOptions};
pub use error::{ChartError, Result};
pub use points::{chance_points, timed_points, ChancePoint, TimedPoint};
pub use record::{format_name, HealValue, Healing, HealingDataset, HealingRecord, Outcome, Step, TimedHealing};
pub use scale::{LinearScale, Scale};
pub use series::{
    ChanceLineRenderer, ChancePointRenderer, FixedPointRenderer, PointSet, RevivalPointRenderer,
    SeriesRenderer, TimedLineRenderer, TimedPointRenderer, TooltipCapture, TooltipHooks, TooltipSink,
};
pub use surface::{JoinStats, Mark, MarkSpec, PointerEvent, Shape, Style, Surface};
pub use theme::Theme;
pub use types::{Color, Insets};
