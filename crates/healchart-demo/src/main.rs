// File: crates/healchart-demo/src/main.rs
// Summary: Loads a healing export and renders the healing-potency chart to SVG (and optionally PNG).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use healchart_core::{theme, HealingChart, HealingDataset, RenderOptions, TooltipHooks};
use healchart_render_skia::SkiaRenderer;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Render a healing export as a scatter/line chart", long_about = None)]
struct Args {
    /// Healing export (`{ "healing": [...], "revival": [...] }`)
    #[arg(default_value = "data.json")]
    input: PathBuf,

    /// SVG output path; defaults to the input path with an .svg extension
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Also rasterize the chart to this PNG path
    #[arg(long)]
    png: Option<PathBuf>,

    /// TOML file with render options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Theme preset (light, dark, solarized-light)
    #[arg(short, long)]
    theme: Option<String>,

    #[arg(long)]
    width: Option<i32>,

    #[arg(long)]
    height: Option<i32>,

    /// Leave hover tooltips out of the SVG
    #[arg(long)]
    no_tooltips: bool,

    /// Print the theme presets and exit
    #[arg(long)]
    list_themes: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if args.list_themes {
        for t in theme::presets() {
            println!("{}", t.name);
        }
        return Ok(());
    }

    let opts = resolve_options(&args)?;
    let dataset = HealingDataset::load(&args.input)
        .with_context(|| format!("failed to load healing export '{}'", args.input.display()))?;
    let parts = dataset.partition();
    info!(
        fixed = parts.fixed.len(),
        chance = parts.chance.len(),
        timed = parts.timed.len(),
        revival = dataset.revival.len(),
        "partitioned records"
    );

    let chart = HealingChart::new(opts);
    let out_svg = args.out.clone().unwrap_or_else(|| args.input.with_extension("svg"));
    chart.render_to_svg(&dataset, &out_svg)?;
    println!("Wrote {}", out_svg.display());

    if let Some(png) = &args.png {
        // No UI to show tooltips in a raster image.
        let hooks = TooltipHooks::new(|_, _| {}, || {}, healchart_core::format_name);
        let scene = chart.compose(&dataset, hooks)?;
        SkiaRenderer::new().render_to_png(&scene, png)?;
        println!("Wrote {}", png.display());
    }
    Ok(())
}

/// Defaults, then the TOML config, then command line flags.
fn resolve_options(args: &Args) -> Result<RenderOptions> {
    let mut opts = match &args.config {
        Some(path) => load_config(path)?,
        None => RenderOptions::default(),
    };
    if let Some(theme) = &args.theme {
        opts.theme = theme.clone();
    }
    if let Some(w) = args.width {
        opts.width = w;
    }
    if let Some(h) = args.height {
        opts.height = h;
    }
    if args.no_tooltips {
        opts.embed_tooltips = false;
    }
    if !theme::presets().iter().any(|t| t.name.eq_ignore_ascii_case(&opts.theme)) {
        tracing::warn!(theme = %opts.theme, "unknown theme; using light");
    }
    Ok(opts)
}

fn load_config(path: &Path) -> Result<RenderOptions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config '{}'", path.display()))?;
    let opts: RenderOptions = toml::from_str(&text)
        .with_context(|| format!("invalid config '{}'", path.display()))?;
    info!(path = %path.display(), "loaded render options");
    Ok(opts)
}
