//! Turns a cached classifier response into per-category rankings.
use crate::cache::SessionCache;
use crate::category::{Category, PerCategory};
use crate::config::ReviewConfig;
use crate::error::{SkResult, SkinstricError};
use crate::locate::{locate_with_origin, Container};
use crate::policy::{complete_sex_rows, sort_age_rows};
use crate::ranked::{build_ranked, classify, top_label, NodeShape, RankedItem};
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub type DominantValues = PerCategory<String>;
pub type RankedByCategory = PerCategory<Vec<RankedItem>>;

/// Diagnostics for one category: where its node came from and whether defaults were used.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTrace {
    pub origin: Option<(Container, &'static str)>,
    pub shape: NodeShape,
    pub extracted: usize,
    pub used_fallback_value: bool,
    pub used_fallback_ranked: bool,
}

impl CategoryTrace {
    fn missing() -> Self {
        Self {
            origin: None,
            shape: NodeShape::Empty,
            extracted: 0,
            used_fallback_value: true,
            used_fallback_ranked: true,
        }
    }
}

/// Everything the review screen needs, derived once from a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDemographics {
    pub original: DominantValues,
    pub ranked: RankedByCategory,
    pub trace: PerCategory<CategoryTrace>,
}

impl ParsedDemographics {
    /// The known-good state used when no usable payload exists.
    pub fn fallback(config: &ReviewConfig) -> Self {
        let mut ranked = config.fallback_ranked();
        ranked.sex = complete_sex_rows(std::mem::take(&mut ranked.sex));
        Self {
            original: config.fallback_values(),
            ranked,
            trace: PerCategory::from_fn(|_| CategoryTrace::missing()),
        }
    }

    pub fn fallback_categories(&self) -> Vec<Category> {
        Category::all()
            .filter(|c| self.trace[*c].used_fallback_ranked || self.trace[*c].used_fallback_value)
            .collect()
    }
}

/// Parses cached response text. Invalid JSON and non-object roots are errors.
pub fn parse_payload(raw: &str) -> SkResult<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(SkinstricError::MalformedPayload(format!(
            "expected a JSON object at the root, found {}",
            json_kind(&other)
        ))),
    }
}

/// Full load step: text in, rankings out.
pub fn parse_demographics(raw: &str, config: &ReviewConfig) -> SkResult<ParsedDemographics> {
    let payload = parse_payload(raw)?;
    Ok(ingest(&payload, config))
}

/// Reads the configured payload entry from the session cache and parses it.
pub fn load_from_cache(
    cache: &SessionCache,
    config: &ReviewConfig,
) -> SkResult<ParsedDemographics> {
    let raw = cache.require(&config.payload_key)?;
    parse_demographics(raw, config)
}

/// Runs locate, rank, and post-processing for every category.
///
/// Each category falls back independently; this never fails.
pub fn ingest(payload: &Map<String, Value>, config: &ReviewConfig) -> ParsedDemographics {
    let fallback_values = config.fallback_values();
    let fallback_ranked = config.fallback_ranked();

    let mut original = fallback_values.clone();
    let mut ranked = fallback_ranked.clone();
    let mut trace = PerCategory::from_fn(|_| CategoryTrace::missing());

    for category in Category::all() {
        let located = locate_with_origin(payload, category);
        let (extracted, dominant, shape) = match located {
            Some(found) => {
                let items = build_ranked(found.node);
                // Same rule as `dominant_label`, without a second traversal.
                let dominant = top_label(&items);
                (items, dominant, classify(found.node))
            }
            None => (Vec::new(), String::new(), NodeShape::Empty),
        };
        let extracted_len = extracted.len();

        let processed = match category {
            Category::Age => sort_age_rows(&extracted),
            Category::Sex => complete_sex_rows(extracted),
            Category::Race => extracted,
        };

        let used_fallback_value = dominant.is_empty();
        if !used_fallback_value {
            original[category] = dominant;
        }

        let used_fallback_ranked = processed.is_empty();
        let rows = if used_fallback_ranked {
            fallback_ranked[category].clone()
        } else {
            processed
        };
        ranked[category] = match category {
            Category::Sex => complete_sex_rows(rows),
            _ => rows,
        };

        if used_fallback_ranked {
            warn!("No {} predictions found in payload; using defaults", category);
        } else {
            debug!(
                "{}: {} predictions, dominant '{}'",
                category, extracted_len, original[category]
            );
        }

        trace[category] = CategoryTrace {
            origin: located.map(|found| (found.container, found.key)),
            shape,
            extracted: extracted_len,
            used_fallback_value,
            used_fallback_ranked,
        };
    }

    ParsedDemographics {
        original,
        ranked,
        trace,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
