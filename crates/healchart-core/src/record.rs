// File: crates/healchart-core/src/record.rs
// Summary: Healing records as exported by the item extractor, plus dataset loading.
// Notes:
// - Numeric fields that are missing (or null) load as NaN and flow into marks
//   unchanged; callers filter if they want clean plots.

use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::{ChartError, Result};

fn nan() -> f64 {
    f64::NAN
}

fn nan_if_null<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// One (percent, fixed) healing value.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct HealValue {
    #[serde(default = "nan", deserialize_with = "nan_if_null")]
    pub percent: f64,
    #[serde(default = "nan", deserialize_with = "nan_if_null")]
    pub fixed: f64,
}

impl HealValue {
    pub const NAN: HealValue = HealValue { percent: f64::NAN, fixed: f64::NAN };

    pub const fn new(percent: f64, fixed: f64) -> Self {
        Self { percent, fixed }
    }

    /// Exact match on both components (NaN never matches).
    pub fn same_as(&self, other: &HealValue) -> bool {
        self.percent == other.percent && self.fixed == other.fixed
    }
}

/// One possible result of a chance-based heal.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Outcome {
    #[serde(default)]
    pub probability: f64,
    #[serde(default = "nan", deserialize_with = "nan_if_null")]
    pub percent: f64,
    #[serde(default = "nan", deserialize_with = "nan_if_null")]
    pub fixed: f64,
}

impl Outcome {
    pub fn value(&self) -> HealValue {
        HealValue::new(self.percent, self.fixed)
    }
}

/// Cumulative healing after `tick` think intervals.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub tick: u32,
    #[serde(default)]
    pub time: f64,
    #[serde(default = "nan", deserialize_with = "nan_if_null")]
    pub percent: f64,
    #[serde(default = "nan", deserialize_with = "nan_if_null")]
    pub fixed: f64,
}

impl Step {
    pub fn value(&self) -> HealValue {
        HealValue::new(self.percent, self.fixed)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TimedHealing {
    #[serde(default = "base_nan")]
    pub base: HealValue,
    #[serde(default = "base_nan")]
    pub per_tick: HealValue,
    #[serde(default)]
    pub interval: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn base_nan() -> HealValue {
    HealValue::NAN
}

impl TimedHealing {
    /// Step with the largest tick; the first one wins on ties.
    pub fn last_step(&self) -> Option<&Step> {
        self.steps
            .iter()
            .reduce(|best, s| if s.tick > best.tick { s } else { best })
    }

    pub fn max_tick(&self) -> Option<u32> {
        self.last_step().map(|s| s.tick)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Healing {
    Instant(HealValue),
    Chance {
        #[serde(default)]
        outcomes: Vec<Outcome>,
    },
    Timed(TimedHealing),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealingKind {
    Instant,
    Chance,
    Timed,
}

impl Healing {
    pub fn kind(&self) -> HealingKind {
        match self {
            Healing::Instant(_) => HealingKind::Instant,
            Healing::Chance { .. } => HealingKind::Chance,
            Healing::Timed(_) => HealingKind::Timed,
        }
    }

    /// Probability-weighted (percent, fixed) of a chance heal.
    pub fn expected_value(&self) -> Option<HealValue> {
        match self {
            Healing::Chance { outcomes } => {
                let (percent, fixed) = outcomes.iter().fold((0.0, 0.0), |(p, f), o| {
                    (p + o.probability * o.percent, f + o.probability * o.fixed)
                });
                Some(HealValue::new(percent, fixed))
            }
            _ => None,
        }
    }
}

/// One exported item with its healing payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HealingRecord {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stars: u8,
    #[serde(default)]
    pub quality: String,
    pub healing: Healing,
}

impl HealingRecord {
    /// Instant value, NaN for other kinds.
    pub fn instant_value(&self) -> HealValue {
        match &self.healing {
            Healing::Instant(v) => *v,
            _ => HealValue::NAN,
        }
    }

    /// Chance outcomes, empty for other kinds.
    pub fn outcomes(&self) -> &[Outcome] {
        match &self.healing {
            Healing::Chance { outcomes } => outcomes,
            _ => &[],
        }
    }

    pub fn timed(&self) -> Option<&TimedHealing> {
        match &self.healing {
            Healing::Timed(t) => Some(t),
            _ => None,
        }
    }
}

/// Default display name: `"<name> (<stars>★)"`, or just the name for unranked items.
pub fn format_name(record: &HealingRecord) -> String {
    if record.stars == 0 {
        record.name.clone()
    } else {
        format!("{} ({}★)", record.name, record.stars)
    }
}

/// Records split by what each series renders.
#[derive(Clone, Debug, Default)]
pub struct Partitioned {
    pub fixed: Vec<HealingRecord>,
    pub chance: Vec<HealingRecord>,
    pub timed: Vec<HealingRecord>,
}

/// The `{ "healing": [...], "revival": [...] }` export.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct HealingDataset {
    #[serde(default)]
    pub healing: Vec<HealingRecord>,
    #[serde(default)]
    pub revival: Vec<HealingRecord>,
}

impl HealingDataset {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let dataset: HealingDataset = serde_json::from_str(s)?;
        tracing::debug!(
            healing = dataset.healing.len(),
            revival = dataset.revival.len(),
            "parsed healing export"
        );
        Ok(dataset)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ChartError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json_str(&text)?;
        for record in &dataset.healing {
            if let Some(ev) = record.healing.expected_value() {
                tracing::debug!(
                    id = record.id,
                    "chance heal expected {:.0}% + {:.0}",
                    ev.percent,
                    ev.fixed
                );
            }
        }
        tracing::info!(
            path = %path.display(),
            healing = dataset.healing.len(),
            revival = dataset.revival.len(),
            "loaded healing export"
        );
        Ok(dataset)
    }

    /// Revival records that plot as points. Chance and timed revivals have no
    /// revival series to draw them and are skipped.
    pub fn instant_revival(&self) -> Vec<HealingRecord> {
        let (instant, other): (Vec<_>, Vec<_>) = self
            .revival
            .iter()
            .cloned()
            .partition(|r| r.healing.kind() == HealingKind::Instant);
        if !other.is_empty() {
            tracing::debug!(skipped = other.len(), "revival records without an instant heal are not plotted");
        }
        instant
    }

    /// Split the main collection by healing kind; revival records stay in `self.revival`.
    pub fn partition(&self) -> Partitioned {
        let mut out = Partitioned::default();
        for record in &self.healing {
            let bucket = match record.healing.kind() {
                HealingKind::Instant => &mut out.fixed,
                HealingKind::Chance => &mut out.chance,
                HealingKind::Timed => &mut out.timed,
            };
            bucket.push(record.clone());
        }
        out
    }
}
