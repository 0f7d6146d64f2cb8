use crate::extract::{pick_label, pick_score, read_number};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Keys probed for a nested prediction array inside an object node.
pub const NESTED_ARRAY_KEYS: &[&str] = &[
    "predictions",
    "items",
    "classes",
    "values",
    "results",
    "data",
];

/// A displayable prediction. `score` keeps the upstream scale (fraction or percent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    pub label: String,
    pub score: f64,
}

impl RankedItem {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Traversal strategy chosen for a category node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeShape {
    /// `[{label, score}, ...]`
    ArrayOfRecords,
    /// `{predictions: [...]}` and friends; carries the key that matched.
    NestedArray(&'static str),
    /// `{label: score}` or `{label: {score, ...}}`
    KeyedScores,
    /// Anything that cannot hold predictions.
    Empty,
}

/// Decides how a node would be traversed, mirroring [`build_ranked`].
pub fn classify(node: &Value) -> NodeShape {
    match node {
        Value::Array(_) => NodeShape::ArrayOfRecords,
        Value::Object(map) => {
            for key in NESTED_ARRAY_KEYS {
                if let Some(nested @ Value::Array(_)) = map.get(*key) {
                    if !build_ranked(nested).is_empty() {
                        return NodeShape::NestedArray(key);
                    }
                }
            }
            NodeShape::KeyedScores
        }
        _ => NodeShape::Empty,
    }
}

/// Builds a descending list of predictions from any node shape.
///
/// Entries lacking a label or a parseable score are dropped. Ties keep
/// their source order.
pub fn build_ranked(node: &Value) -> Vec<RankedItem> {
    let mut items = match node {
        Value::Array(entries) => from_records(entries),
        Value::Object(map) => {
            if let Some(nested) = first_nested_array(map) {
                return nested;
            }
            from_keyed_scores(map)
        }
        _ => return Vec::new(),
    };
    sort_by_raw_score(&mut items);
    items
}

/// Label of the highest raw score, or `""` when nothing is rankable.
pub fn dominant_label(node: &Value) -> String {
    top_label(&build_ranked(node))
}

/// Dominant label of an already built list: its first item, or `""`.
pub fn top_label(items: &[RankedItem]) -> String {
    items
        .first()
        .map(|item| item.label.clone())
        .unwrap_or_default()
}

fn from_records(entries: &[Value]) -> Vec<RankedItem> {
    entries
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|record| {
            let label = pick_label(record);
            let score = pick_score(record)?;
            (!label.is_empty()).then(|| RankedItem::new(label, score))
        })
        .collect()
}

fn first_nested_array(map: &Map<String, Value>) -> Option<Vec<RankedItem>> {
    NESTED_ARRAY_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .filter(|nested| nested.is_array())
        .map(build_ranked)
        .find(|items| !items.is_empty())
}

fn from_keyed_scores(map: &Map<String, Value>) -> Vec<RankedItem> {
    let mut items = Vec::with_capacity(map.len());
    for (key, raw) in map {
        if let Some(score) = read_number(raw) {
            items.push(RankedItem::new(key.clone(), score));
            continue;
        }
        let Some(record) = raw.as_object() else {
            continue;
        };
        let Some(score) = pick_score(record) else {
            continue;
        };
        let label = pick_label(record);
        let label = if label.is_empty() { key.clone() } else { label };
        items.push(RankedItem::new(label, score));
    }
    items
}

/// Stable descending sort on the stored (un-normalized) score.
pub fn sort_by_raw_score(items: &mut [RankedItem]) {
    items.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}
