//! Field readers for loosely-shaped classifier records.
//!
//! Every function here is total: unknown or mistyped fields simply read as
//! "absent" so that a single bad record never poisons the surrounding list.
use serde_json::{Map, Value};

/// Keys that may carry a display label, highest priority first.
pub const LABEL_KEYS: &[&str] = &["label", "name", "value", "range", "group", "class", "title"];

/// Keys that may carry a confidence, highest priority first.
pub const SCORE_KEYS: &[&str] = &[
    "confidence",
    "score",
    "probability",
    "percent",
    "percentage",
    "value",
];

/// Reads a finite number from a JSON number or a numeric string such as `"73%"`.
pub fn read_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_numeric_text(s),
        _ => None,
    }
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reads a trimmed, non-empty string. Non-strings read as absent.
pub fn read_label(value: &Value) -> Option<&str> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// First non-empty label found in [`LABEL_KEYS`] order, or `""`.
pub fn pick_label(record: &Map<String, Value>) -> String {
    LABEL_KEYS
        .iter()
        .filter_map(|key| record.get(*key))
        .find_map(read_label)
        .map(str::to_string)
        .unwrap_or_default()
}

/// First parseable score found in [`SCORE_KEYS`] order.
pub fn pick_score(record: &Map<String, Value>) -> Option<f64> {
    SCORE_KEYS
        .iter()
        .filter_map(|key| record.get(*key))
        .find_map(read_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_percent_text_is_stripped() {
        assert_eq!(pick_score(&record(json!({"probability": "73%"}))), Some(73.0));
        assert_eq!(pick_score(&record(json!({"probability": " 12.5 % "}))), Some(12.5));
    }

    #[test]
    fn test_non_finite_text_rejected() {
        assert_eq!(read_number(&json!("inf")), None);
        assert_eq!(read_number(&json!("NaN")), None);
        assert_eq!(read_number(&json!("")), None);
        assert_eq!(read_number(&json!(true)), None);
    }

    #[test]
    fn test_blank_label_falls_through() {
        let r = record(json!({"label": "   ", "name": " Latino Hispanic "}));
        assert_eq!(pick_label(&r), "Latino Hispanic");
    }
}
