use crate::category::PerCategory;
use crate::error::{SkResult, SkinstricError};
use crate::format::RingGeometry;
use crate::ranked::RankedItem;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Cache entry written by the upload step.
pub const DEFAULT_PAYLOAD_KEY: &str = "skinstric_phase_two_response";

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    // === RING ===
    #[arg(long, default_value_t = 384.0)]
    pub ring_size: f64,
    #[arg(long, default_value_t = 3.0)]
    pub ring_stroke_width: f64,

    // === FALLBACK ===
    #[arg(long, default_value = "East asian")]
    pub fallback_race: String,
    #[arg(long, default_value = "20-29")]
    pub fallback_age: String,
    #[arg(long, default_value = "Female")]
    pub fallback_sex: String,
    #[arg(long, default_value_t = 96.0)]
    pub fallback_score: f64,

    // === CACHE ===
    #[arg(long, default_value = DEFAULT_PAYLOAD_KEY)]
    pub payload_key: String,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            ring_size: 384.0,
            ring_stroke_width: 3.0,
            fallback_race: "East asian".to_string(),
            fallback_age: "20-29".to_string(),
            fallback_sex: "Female".to_string(),
            fallback_score: 96.0,
            payload_key: DEFAULT_PAYLOAD_KEY.to_string(),
        }
    }
}

impl ReviewConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SkResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SkinstricError::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            SkinstricError::Config(format!("Failed to parse config '{}': {}", path.display(), e))
        })
    }

    /// Copies only the values the user typed on the command line.
    pub fn merge_from_cli(&mut self, cli: &ReviewConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(ring_size, "ring_size");
        update_if_present!(ring_stroke_width, "ring_stroke_width");

        update_if_present!(fallback_race, "fallback_race");
        update_if_present!(fallback_age, "fallback_age");
        update_if_present!(fallback_sex, "fallback_sex");
        update_if_present!(fallback_score, "fallback_score");

        update_if_present!(payload_key, "payload_key");
    }

    pub fn ring(&self) -> RingGeometry {
        RingGeometry::new(self.ring_size, self.ring_stroke_width)
    }

    /// `FALLBACK_VALUES`: dominant labels used when extraction yields nothing.
    pub fn fallback_values(&self) -> PerCategory<String> {
        PerCategory::new(
            self.fallback_race.clone(),
            self.fallback_age.clone(),
            self.fallback_sex.clone(),
        )
    }

    /// `FALLBACK_RANKED`: one synthetic row per category.
    pub fn fallback_ranked(&self) -> PerCategory<Vec<RankedItem>> {
        PerCategory::from_fn(|category| {
            vec![RankedItem::new(
                self.fallback_values()[category].clone(),
                self.fallback_score,
            )]
        })
    }
}
