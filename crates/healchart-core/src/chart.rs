// File: crates/healchart-core/src/chart.rs
// Summary: Chart composition: shared scales, one surface per series, and SVG output.

use std::path::Path;
use std::rc::Rc;

use serde::Deserialize;

use crate::error::{ChartError, Result};
use crate::grid::extent;
use crate::points::{chance_points, timed_points};
use crate::record::{format_name, Healing, HealingDataset, HealingKind, HealingRecord};
use crate::scale::LinearScale;
use crate::series::{
    ChanceLineRenderer, ChancePointRenderer, FixedPointRenderer, PointSet, RevivalPointRenderer,
    SeriesRenderer, TimedLineRenderer, TimedPointRenderer, TooltipCapture, TooltipHooks,
};
use crate::surface::{JoinStats, PointerEvent, Surface};
use crate::svg;
use crate::theme::{self, Theme};
use crate::types::{Insets, HEIGHT, WIDTH};

/// Layer names in draw order (first is bottom-most).
pub const LAYERS: [&str; 6] = [
    "timed-lines",
    "chance-lines",
    "timed-points",
    "chance-points",
    "fixed-points",
    "revival-points",
];

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: String,
    pub x_label: String,
    pub y_label: String,
    pub tick_count: usize,
    pub draw_labels: bool,
    pub draw_grid: bool,
    /// Attach each hoverable mark's tooltip text as an SVG `<title>`.
    pub embed_tooltips: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: "light".to_string(),
            x_label: "Max HP %".to_string(),
            y_label: "Flat HP".to_string(),
            tick_count: 10,
            draw_labels: true,
            draw_grid: true,
            embed_tooltips: true,
        }
    }
}

/// Plot area in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

pub struct HealingChart {
    pub options: RenderOptions,
    pub theme: Theme,
    name_formatter: Rc<dyn Fn(&HealingRecord) -> String>,
}

impl HealingChart {
    pub fn new(options: RenderOptions) -> Self {
        let theme = theme::find(&options.theme);
        Self { options, theme, name_formatter: Rc::new(format_name) }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_name_formatter(mut self, f: impl Fn(&HealingRecord) -> String + 'static) -> Self {
        self.name_formatter = Rc::new(f);
        self
    }

    pub fn plot_rect(&self) -> Result<PlotRect> {
        let o = &self.options;
        let invalid = || ChartError::InvalidDimensions { width: o.width, height: o.height };
        let hsum = o.insets.hsum().and_then(|s| i32::try_from(s).ok()).ok_or_else(invalid)?;
        let vsum = o.insets.vsum().and_then(|s| i32::try_from(s).ok()).ok_or_else(invalid)?;
        if o.width <= 0 || o.height <= 0 || o.width <= hsum || o.height <= vsum {
            return Err(invalid());
        }
        Ok(PlotRect {
            left: f64::from(o.insets.left),
            top: f64::from(o.insets.top),
            right: f64::from(o.width) - f64::from(o.insets.right),
            bottom: f64::from(o.height) - f64::from(o.insets.bottom),
        })
    }

    /// Percent (x) and fixed (y) scales covering every plotted value, anchored at zero.
    pub fn scales(&self, dataset: &HealingDataset) -> Result<(LinearScale, LinearScale)> {
        let rect = self.plot_rect()?;
        let (xs, ys): (Vec<f64>, Vec<f64>) = plotted_values(dataset).unzip();
        let (x_lo, x_hi) = extent(xs).unwrap_or((0.0, 1.0));
        let (y_lo, y_hi) = extent(ys).unwrap_or((0.0, 1.0));
        let n = self.options.tick_count.max(2);
        let x = LinearScale::new((x_lo.min(0.0), x_hi), (rect.left, rect.right)).nice(n);
        let y = LinearScale::new((y_lo.min(0.0), y_hi), (rect.bottom, rect.top)).nice(n);
        Ok((x, y))
    }

    /// Build the scene: scales, one surface per layer, every series rendered once.
    pub fn compose(&self, dataset: &HealingDataset, hooks: TooltipHooks) -> Result<ChartScene> {
        let rect = self.plot_rect()?;
        let (x, y) = self.scales(dataset)?;
        let mut scene = ChartScene {
            options: self.options.clone(),
            theme: self.theme,
            rect,
            x,
            y,
            layers: LAYERS.iter().map(|name| Surface::new(*name)).collect(),
        };
        scene.render(dataset, &hooks);
        Ok(scene)
    }

    fn capture_hooks(&self) -> (Rc<TooltipCapture>, TooltipHooks) {
        let capture = Rc::new(TooltipCapture::new());
        let formatter = Rc::clone(&self.name_formatter);
        let hooks = TooltipHooks::from_sink(Rc::clone(&capture), move |r| formatter(r));
        (capture, hooks)
    }

    pub fn to_svg_string(&self, dataset: &HealingDataset) -> Result<String> {
        let (capture, hooks) = self.capture_hooks();
        let scene = self.compose(dataset, hooks)?;
        let titles = self.options.embed_tooltips.then_some(&*capture);
        Ok(svg::document(&scene, titles))
    }

    pub fn render_to_svg(&self, dataset: &HealingDataset, output_svg_path: impl AsRef<Path>) -> Result<()> {
        let path = output_svg_path.as_ref();
        let text = self.to_svg_string(dataset)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ChartError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, text).map_err(|source| ChartError::Write { path: path.to_path_buf(), source })?;
        tracing::info!(path = %path.display(), "wrote svg chart");
        Ok(())
    }
}

fn plotted_values(dataset: &HealingDataset) -> impl Iterator<Item = (f64, f64)> + '_ {
    let revival = dataset.revival.iter().filter(|r| r.healing.kind() == HealingKind::Instant);
    dataset.healing.iter().chain(revival).flat_map(|record| {
        let values: Vec<(f64, f64)> = match &record.healing {
            Healing::Instant(v) => vec![(v.percent, v.fixed)],
            Healing::Chance { outcomes } => {
                outcomes.iter().map(|o| (o.percent, o.fixed)).collect()
            }
            Healing::Timed(t) => std::iter::once((t.base.percent, t.base.fixed))
                .chain(t.steps.iter().map(|s| (s.percent, s.fixed)))
                .collect(),
        };
        values
    })
}

/// A composed chart: scales plus the populated layer surfaces.
pub struct ChartScene {
    pub options: RenderOptions,
    pub theme: Theme,
    pub rect: PlotRect,
    pub x: LinearScale,
    pub y: LinearScale,
    pub layers: Vec<Surface>,
}

impl ChartScene {
    pub fn layer(&self, name: &str) -> Option<&Surface> {
        self.layers.iter().find(|s| s.name == name)
    }

    fn layer_mut(&mut self, name: &str) -> &mut Surface {
        let index = match self.layers.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.layers.push(Surface::new(name));
                self.layers.len() - 1
            }
        };
        &mut self.layers[index]
    }

    /// Re-run every series against the existing surfaces. Returns the join stats
    /// summed over all layers.
    pub fn render(&mut self, dataset: &HealingDataset, hooks: &TooltipHooks) -> JoinStats {
        let parts = dataset.partition();
        let fixed: Rc<[HealingRecord]> = parts.fixed.into();
        let revival: Rc<[HealingRecord]> = dataset.instant_revival().into();
        let chance: Rc<[HealingRecord]> = parts.chance.into();
        let timed: Rc<[HealingRecord]> = parts.timed.into();
        let chance_set = PointSet::new(chance_points(&chance), Rc::clone(&chance));
        let timed_set = PointSet::new(timed_points(&timed), Rc::clone(&timed));

        let theme = self.theme;
        let (x, y) = (self.x, self.y);
        let stats = [
            TimedLineRenderer::new()
                .with_color(theme.timed_line)
                .render(self.layer_mut("timed-lines"), &timed, &x, &y),
            ChanceLineRenderer::new()
                .with_color(theme.chance_line)
                .render(self.layer_mut("chance-lines"), &chance, &x, &y),
            TimedPointRenderer::new(hooks.clone())
                .with_color(theme.timed_point)
                .render(self.layer_mut("timed-points"), &timed_set, &x, &y),
            ChancePointRenderer::new(hooks.clone())
                .with_color(theme.chance_point)
                .render(self.layer_mut("chance-points"), &chance_set, &x, &y),
            FixedPointRenderer::new(hooks.clone())
                .with_color(theme.fixed_point)
                .render(self.layer_mut("fixed-points"), &fixed, &x, &y),
            RevivalPointRenderer::new(hooks.clone())
                .with_color(theme.revival_point)
                .render(self.layer_mut("revival-points"), &revival, &x, &y),
        ];

        let total = stats.iter().fold(JoinStats::default(), |acc, s| JoinStats {
            entered: acc.entered + s.entered,
            updated: acc.updated + s.updated,
            exited: acc.exited + s.exited,
        });
        tracing::debug!(
            entered = total.entered,
            updated = total.updated,
            exited = total.exited,
            "rendered healing series"
        );
        total
    }

    /// Route a pointer move to the topmost layer with a hit; every other layer
    /// sees a pointer leave.
    pub fn pointer_move(&mut self, event: &PointerEvent) {
        let target = self
            .layers
            .iter()
            .rposition(|layer| layer.hit_test(event.x, event.y).is_some());
        // Leaves run before the move so a late hide cannot clear the new tooltip.
        for (i, layer) in self.layers.iter_mut().enumerate() {
            if Some(i) != target {
                layer.pointer_leave();
            }
        }
        if let Some(layer) = target.and_then(|i| self.layers.get_mut(i)) {
            layer.pointer_move(event);
        }
    }

    pub fn pointer_leave(&mut self) {
        for layer in &mut self.layers {
            layer.pointer_leave();
        }
    }

    pub fn to_svg_string(&self) -> String {
        svg::document(self, None)
    }
}
