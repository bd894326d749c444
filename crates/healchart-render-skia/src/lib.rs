// File: crates/healchart-render-skia/src/lib.rs
// Summary: Headless Skia raster backend; paints a composed healing chart scene to PNG or RGBA8.

mod text;

use std::path::Path;

use anyhow::{Context, Result};
use healchart_core::tooltip::plain_number;
use healchart_core::{ChartScene, Color, Mark, Shape};
use skia_safe as skia;

pub use text::TextShaper;

/// RGBA8 pixels with width, height and row stride in bytes.
pub type Rgba8 = (Vec<u8>, i32, i32, usize);

pub struct SkiaRenderer {
    shaper: TextShaper,
}

impl SkiaRenderer {
    pub fn new() -> Self {
        Self { shaper: TextShaper::new() }
    }

    fn paint(&self, scene: &ChartScene) -> Result<skia::Surface> {
        let o = &scene.options;
        let mut surface = skia::surfaces::raster_n32_premul((o.width, o.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create {}x{} raster surface", o.width, o.height))?;
        let canvas = surface.canvas();

        canvas.clear(to_skia(scene.theme.background));
        let n = o.tick_count.max(2);
        if o.draw_grid {
            draw_grid(canvas, scene, n);
        }
        draw_axes(canvas, scene);
        if o.draw_labels {
            self.draw_labels(canvas, scene, n);
        }

        // Layers are stored bottom-most first.
        let mut drawn = 0usize;
        for layer in &scene.layers {
            for mark in layer.marks() {
                if draw_mark(canvas, mark) {
                    drawn += 1;
                }
            }
        }
        tracing::debug!(drawn, width = o.width, height = o.height, "painted chart scene");
        Ok(surface)
    }

    pub fn render_to_png_bytes(&self, scene: &ChartScene) -> Result<Vec<u8>> {
        let mut surface = self.paint(scene)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the scene to a PNG at `output_png_path`, creating parent directories.
    pub fn render_to_png(&self, scene: &ChartScene, output_png_path: impl AsRef<Path>) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_to_png_bytes(scene)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote png chart");
        Ok(())
    }

    /// Unpremultiplied RGBA8 pixels, for blitting into a window or comparing in tests.
    pub fn render_to_rgba8(&self, scene: &ChartScene) -> Result<Rgba8> {
        let mut surface = self.paint(scene)?;
        let (w, h) = (scene.options.width, scene.options.height);
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            anyhow::bail!("reading back {w}x{h} pixels failed");
        }
        Ok((pixels, w, h, stride))
    }

    fn draw_labels(&self, canvas: &skia::Canvas, scene: &ChartScene, n: usize) {
        let rect = scene.rect;
        let tick = to_skia(scene.theme.tick);
        for v in scene.x.ticks(n) {
            let x = scene.x.to_px(v) as f32;
            self.shaper.draw_centered(canvas, &label(v), x, rect.bottom as f32 + 18.0, 11.0, tick);
        }
        for v in scene.y.ticks(n) {
            let y = scene.y.to_px(v) as f32;
            self.shaper.draw_right(canvas, &label(v), rect.left as f32 - 6.0, y, 11.0, tick);
        }

        let title = to_skia(scene.theme.axis_label);
        let mid_x = ((rect.left + rect.right) / 2.0) as f32;
        let mid_y = ((rect.top + rect.bottom) / 2.0) as f32;
        self.shaper.draw_centered(canvas, &scene.options.x_label, mid_x, rect.bottom as f32 + 40.0, 13.0, title);
        self.shaper.draw_vertical(canvas, &scene.options.y_label, 16.0, mid_y, 13.0, title);
    }
}

impl Default for SkiaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ---- helpers ----------------------------------------------------------------

fn to_skia(c: Color) -> skia::Color {
    skia::Color::from_argb(255, c.r, c.g, c.b)
}

fn label(v: f64) -> String {
    plain_number((v * 100.0).round() / 100.0)
}

fn draw_grid(canvas: &skia::Canvas, scene: &ChartScene, n: usize) {
    let rect = scene.rect;
    let mut paint = skia::Paint::default();
    paint.set_color(to_skia(scene.theme.grid));
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    for v in scene.x.ticks(n) {
        let x = scene.x.to_px(v) as f32;
        canvas.draw_line((x, rect.top as f32), (x, rect.bottom as f32), &paint);
    }
    for v in scene.y.ticks(n) {
        let y = scene.y.to_px(v) as f32;
        canvas.draw_line((rect.left as f32, y), (rect.right as f32, y), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, scene: &ChartScene) {
    let rect = scene.rect;
    let (l, t, r, b) = (rect.left as f32, rect.top as f32, rect.right as f32, rect.bottom as f32);
    let mut paint = skia::Paint::default();
    paint.set_color(to_skia(scene.theme.axis_line));
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.5);

    canvas.draw_line((l, b), (r, b), &paint);
    canvas.draw_line((l, t), (l, b), &paint);
}

/// Paint one mark; returns false when it has nothing drawable (NaN position, empty path).
fn draw_mark(canvas: &skia::Canvas, mark: &Mark) -> bool {
    let style = &mark.style;
    let alpha = style.opacity.unwrap_or(1.0).clamp(0.0, 1.0) as f32;
    match &mark.shape {
        Shape::Circle { cx, cy, r } => {
            if !(cx.is_finite() && cy.is_finite()) {
                return false;
            }
            let Some(fill) = style.fill else { return false };
            let mut paint = skia::Paint::default();
            paint.set_anti_alias(true);
            paint.set_style(skia::paint::Style::Fill);
            paint.set_color(to_skia(fill));
            paint.set_alpha_f(alpha);
            canvas.draw_circle((*cx as f32, *cy as f32), *r as f32, &paint);
            true
        }
        Shape::Path { points } => {
            let mut finite = points.iter().filter(|(x, y)| x.is_finite() && y.is_finite());
            let Some(&(x0, y0)) = finite.next() else { return false };
            let Some(stroke) = style.stroke else { return false };
            let mut path = skia::Path::new();
            path.move_to((x0 as f32, y0 as f32));
            for &(x, y) in finite {
                path.line_to((x as f32, y as f32));
            }

            let mut paint = skia::Paint::default();
            paint.set_anti_alias(true);
            paint.set_style(skia::paint::Style::Stroke);
            paint.set_stroke_width(style.stroke_width.unwrap_or(1.0) as f32);
            paint.set_color(to_skia(stroke));
            paint.set_alpha_f(alpha);
            canvas.draw_path(&path, &paint);
            true
        }
    }
}
