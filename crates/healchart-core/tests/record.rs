// File: crates/healchart-core/tests/record.rs
// Purpose: Loading the healing export and projecting it into plot points.

use healchart_core::record::HealingKind;
use healchart_core::{chance_points, format_name, timed_points, ChartError, HealingDataset};

fn sample() -> HealingDataset {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample.json");
    HealingDataset::load(path).expect("load sample export")
}

#[test]
fn loads_and_partitions_by_kind() {
    let ds = sample();
    assert_eq!(ds.healing.len(), 5);
    assert_eq!(ds.revival.len(), 1);

    let parts = ds.partition();
    assert_eq!(parts.fixed.len(), 3);
    assert_eq!(parts.chance.len(), 1);
    assert_eq!(parts.timed.len(), 1);
    assert!(parts.fixed.iter().all(|r| r.healing.kind() == HealingKind::Instant));
    assert_eq!(parts.chance[0].name, "Lucky Pie");
}

#[test]
fn missing_and_null_numbers_become_nan() {
    let json = r#"{ "healing": [
        { "id": 1, "name": "Blank", "healing": { "type": "instant", "fixed": null } },
        { "id": 2, "name": "Odd", "healing": { "type": "chance", "outcomes": [ { "probability": 1 } ] } }
    ] }"#;
    let ds = HealingDataset::from_json_str(json).expect("parse");
    let v = ds.healing[0].instant_value();
    assert!(v.percent.is_nan() && v.fixed.is_nan());
    assert!(ds.healing[1].outcomes()[0].percent.is_nan());
    assert!(ds.revival.is_empty());
}

#[test]
fn rejects_unknown_healing_type() {
    let json = r#"{ "healing": [ { "id": 1, "healing": { "type": "overheal" } } ] }"#;
    let err = HealingDataset::from_json_str(json).expect_err("unknown type");
    assert!(matches!(err, ChartError::Json(_)));
}

#[test]
fn load_reports_missing_file() {
    let err = HealingDataset::load("does/not/exist.json").expect_err("missing file");
    assert!(matches!(err, ChartError::Read { .. }));
    assert!(err.to_string().contains("exist.json"));
}

#[test]
fn expected_value_weights_outcomes() {
    let ds = sample();
    let ev = ds.partition().chance[0].healing.expected_value().expect("chance heal");
    assert_eq!((ev.percent, ev.fixed), (40.0, 1000.0));
    assert!(ds.healing[0].healing.expected_value().is_none());
}

#[test]
fn names_carry_star_rating() {
    let ds = sample();
    assert_eq!(format_name(&ds.healing[0]), "Sweet Madame (2★)");
    let mut unranked = ds.healing[0].clone();
    unranked.stars = 0;
    assert_eq!(format_name(&unranked), "Sweet Madame");
}

#[test]
fn chance_points_flatten_outcomes_in_order() {
    let parts = sample().partition();
    let pts = chance_points(&parts.chance);
    let coords: Vec<_> = pts.iter().map(|p| (p.percent, p.fixed, p.id)).collect();
    assert_eq!(coords, vec![(40.0, 1000.0, 108010), (20.0, 500.0, 108010), (60.0, 1500.0, 108010)]);
}

#[test]
fn timed_points_mark_only_the_last_tick_terminal() {
    let parts = sample().partition();
    let pts = timed_points(&parts.timed);
    assert_eq!(pts.len(), 4);
    assert_eq!(pts[0].tick, None);
    assert!(pts.iter().all(|p| p.max_ticks == Some(3)));
    let terminal: Vec<_> = pts.iter().map(|p| p.is_terminal()).collect();
    assert_eq!(terminal, vec![false, false, false, true]);
}

#[test]
fn zero_max_ticks_is_never_terminal() {
    let p = healchart_core::TimedPoint { percent: 0.0, fixed: 0.0, id: 1, tick: Some(0), max_ticks: Some(0) };
    assert!(!p.is_terminal());
    let base = healchart_core::TimedPoint { tick: None, max_ticks: None, ..p };
    assert!(!base.is_terminal());
}

#[test]
fn last_step_keeps_first_of_equal_ticks() {
    let json = r#"{ "healing": [ { "id": 3, "healing": { "type": "timed",
        "base": { "percent": 0, "fixed": 0 },
        "steps": [ { "tick": 2, "fixed": 10 }, { "tick": 2, "fixed": 99 }, { "tick": 1, "fixed": 5 } ] } } ] }"#;
    let ds = HealingDataset::from_json_str(json).expect("parse");
    let timed = ds.healing[0].timed().expect("timed");
    assert_eq!(timed.last_step().map(|s| s.fixed), Some(10.0));
    assert_eq!(timed.max_tick(), Some(2));
}
