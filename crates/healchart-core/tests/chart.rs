// File: crates/healchart-core/tests/chart.rs
// Purpose: Chart composition over the sample export: layers, scales, pointer routing and SVG output.

use std::rc::Rc;

use healchart_core::chart::LAYERS;
use healchart_core::{
    ChartError, HealingChart, HealingDataset, PointerEvent, RenderOptions, TooltipCapture, TooltipHooks,
};

fn sample() -> HealingDataset {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample.json");
    HealingDataset::load(path).expect("load sample export")
}

fn hooks() -> (Rc<TooltipCapture>, TooltipHooks) {
    let capture = Rc::new(TooltipCapture::new());
    let hooks = TooltipHooks::from_sink(Rc::clone(&capture), healchart_core::format_name);
    (capture, hooks)
}

#[test]
fn compose_fills_every_layer() {
    let (_capture, hooks) = hooks();
    let scene = HealingChart::new(RenderOptions::default()).compose(&sample(), hooks).expect("compose");

    let names: Vec<_> = scene.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, LAYERS);
    let count = |layer: &str| scene.layer(layer).map_or(0, |s| s.len());
    assert_eq!(count("fixed-points"), 3);
    assert_eq!(count("revival-points"), 1);
    assert_eq!(count("chance-points"), 3);
    assert_eq!(count("chance-lines"), 1);
    assert_eq!(count("timed-points"), 4);
    assert_eq!(count("timed-lines"), 1);
}

#[test]
fn scales_start_at_zero_and_cover_the_data() {
    let chart = HealingChart::new(RenderOptions::default());
    let (x, y) = chart.scales(&sample()).expect("scales");
    assert_eq!(x.d0, 0.0);
    assert!(x.d1 >= 60.0);
    assert_eq!(y.d0, 0.0);
    assert!(y.d1 >= 1500.0);
    let rect = chart.plot_rect().expect("rect");
    assert_eq!(x.to_px(0.0), rect.left);
    assert_eq!(y.to_px(0.0), rect.bottom);
}

#[test]
fn rerender_updates_in_place() {
    let (_capture, hooks) = hooks();
    let ds = sample();
    let mut scene = HealingChart::new(RenderOptions::default()).compose(&ds, hooks.clone()).expect("compose");
    let before = scene.to_svg_string();
    let stats = scene.render(&ds, &hooks);
    assert_eq!((stats.entered, stats.exited), (0, 0));
    assert_eq!(stats.updated, 13);
    assert_eq!(before, scene.to_svg_string());
}

#[test]
fn pointer_reaches_the_topmost_layer() {
    let (capture, hooks) = hooks();
    let mut scene = HealingChart::new(RenderOptions::default()).compose(&sample(), hooks).expect("compose");

    let at = |p: f64, f: f64| PointerEvent::new(scene.x.to_px(p), scene.y.to_px(f));
    let revival = at(25.0, 1500.0);
    let coincident = at(20.0, 900.0);
    let terminal = at(16.0, 450.0);

    scene.pointer_move(&revival);
    assert_eq!(capture.current().as_deref(), Some("<strong>Revival: 25% + 1500</strong><br />Mint Jelly (3★)"));

    scene.pointer_move(&coincident);
    assert_eq!(
        capture.current().as_deref(),
        Some("<strong>20% + 900</strong><br />Sweet Madame (2★)<br />Teyvat Fried Egg (1★)")
    );

    scene.pointer_move(&terminal);
    assert_eq!(capture.current().as_deref(), Some("<strong>10% + 450</strong><br />Adeptus' Temptation (5★)"));

    scene.pointer_leave();
    assert_eq!(capture.current(), None);
}

#[test]
fn svg_embeds_tooltips_as_titles() {
    let svg = HealingChart::new(RenderOptions::default()).to_svg_string(&sample()).expect("svg");
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains(r#"<g class="revival-points">"#));
    assert!(svg.contains("<title>Revival: 25% + 1500\nMint Jelly (3★)</title>"));
    assert!(svg.contains("<title>20~60% + 500~1500\n40% + 1000\nLucky Pie (3★)</title>"));
    // Faded timed points ignore hover, so only the terminal one carries a title.
    assert_eq!(svg.matches("<title>10% + 450").count(), 1);
    assert!(svg.contains(r#"class="chance-line" data-key="108010" d="M"#));
}

#[test]
fn svg_without_tooltips_has_no_titles() {
    let opts = RenderOptions { embed_tooltips: false, ..RenderOptions::default() };
    let svg = HealingChart::new(opts).to_svg_string(&sample()).expect("svg");
    assert!(!svg.contains("<title>"));
}

#[test]
fn custom_name_formatter_is_used() {
    let chart = HealingChart::new(RenderOptions::default()).with_name_formatter(|r| format!("#{}", r.id));
    let svg = chart.to_svg_string(&sample()).expect("svg");
    assert!(!svg.contains("Mint Jelly"));
    assert!(svg.contains("\n#108100</title>"));
}

#[test]
fn rejects_degenerate_dimensions() {
    let opts = RenderOptions { width: 40, height: 40, ..RenderOptions::default() };
    let err = HealingChart::new(opts).to_svg_string(&sample()).expect_err("insets exceed size");
    assert!(matches!(err, ChartError::InvalidDimensions { width: 40, height: 40 }));
}

#[test]
fn theme_name_selects_palette() {
    let opts = RenderOptions { theme: "dark".into(), ..RenderOptions::default() };
    let chart = HealingChart::new(opts);
    assert_eq!(chart.theme.name, "dark");
    let svg = chart.to_svg_string(&sample()).expect("svg");
    assert!(svg.contains(r##"fill="#121214""##));
}

#[test]
fn render_to_svg_writes_file() {
    let out = std::path::PathBuf::from("target/test_out/sample_chart.svg");
    HealingChart::new(RenderOptions::default()).render_to_svg(&sample(), &out).expect("write svg");
    let text = std::fs::read_to_string(&out).expect("output exists");
    assert!(text.trim_end().ends_with("</svg>"));
}

#[test]
fn options_load_from_toml() {
    let opts: RenderOptions = toml::from_str(
        r#"
        width = 800
        theme = "solarized-light"
        embed_tooltips = false
        [insets]
        left = 80
        "#,
    )
    .expect("parse options");
    assert_eq!(opts.width, 800);
    assert_eq!(opts.height, RenderOptions::default().height);
    assert_eq!(opts.insets.left, 80);
    assert_eq!(opts.insets.right, 24);
    assert!(!opts.embed_tooltips);
}

fn instant_json(id: u64, name: &str, percent: f64, fixed: f64) -> String {
    format!(r#"{{ "id": {id}, "name": "{name}", "healing": {{ "type": "instant", "percent": {percent}, "fixed": {fixed} }} }}"#)
}

#[test]
fn moving_down_a_layer_keeps_the_tooltip() {
    let json = format!(
        r#"{{ "healing": [{}], "revival": [{}] }}"#,
        instant_json(1, "Fix", 10.0, 100.0),
        instant_json(2, "Rev", 50.0, 500.0)
    );
    let ds = HealingDataset::from_json_str(&json).expect("parse");
    let (capture, hooks) = hooks();
    let mut scene = HealingChart::new(RenderOptions::default()).compose(&ds, hooks).expect("compose");
    let revival = PointerEvent::new(scene.x.to_px(50.0), scene.y.to_px(500.0));
    let fixed = PointerEvent::new(scene.x.to_px(10.0), scene.y.to_px(100.0));

    scene.pointer_move(&revival);
    assert_eq!(capture.current().as_deref(), Some("<strong>Revival: 50% + 500</strong><br />Rev"));
    scene.pointer_move(&fixed);
    assert_eq!(capture.current().as_deref(), Some("<strong>10% + 100</strong><br />Fix"));
    scene.pointer_move(&revival);
    assert_eq!(capture.shown(), 3);
    assert!(capture.current().is_some_and(|h| h.contains("Revival")));
}

#[test]
fn only_instant_revivals_are_plotted() {
    let json = format!(
        r#"{{ "revival": [{}, {{ "id": 3, "name": "Odd", "healing": {{ "type": "chance",
            "outcomes": [ {{ "probability": 1, "percent": 90, "fixed": 99999 }} ] }} }}] }}"#,
        instant_json(2, "Rev", 50.0, 500.0)
    );
    let ds = HealingDataset::from_json_str(&json).expect("parse");
    assert_eq!(ds.instant_revival().len(), 1);

    let chart = HealingChart::new(RenderOptions::default());
    let (x, y) = chart.scales(&ds).expect("scales");
    assert!(x.d1 < 90.0, "x domain {x:?} stretched by a non-plotted revival");
    assert!(y.d1 < 99999.0, "y domain {y:?} stretched by a non-plotted revival");

    let (_capture, hooks) = hooks();
    let scene = chart.compose(&ds, hooks).expect("compose");
    assert_eq!(scene.layer("revival-points").map(|s| s.len()), Some(1));
    assert!(!scene.to_svg_string().contains("NaN"));
}

#[test]
fn oversized_insets_are_rejected() {
    let opts = RenderOptions {
        insets: healchart_core::Insets::new(u32::MAX, 10, 0, 0),
        ..RenderOptions::default()
    };
    let err = HealingChart::new(opts).plot_rect().expect_err("insets overflow");
    assert!(matches!(err, ChartError::InvalidDimensions { .. }));

    let opts = RenderOptions { insets: healchart_core::Insets::new(0, 0, i32::MAX as u32, 1), ..RenderOptions::default() };
    assert!(HealingChart::new(opts).plot_rect().is_err());
}
