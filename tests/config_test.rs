use skinstric::category::Category;
use skinstric::config::{ReviewConfig, DEFAULT_PAYLOAD_KEY};
use skinstric::error::SkinstricError;
use skinstric::ranked::RankedItem;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_defaults() {
    let config = ReviewConfig::default();
    assert_eq!(config.payload_key, DEFAULT_PAYLOAD_KEY);
    assert_eq!(config.ring().radius(), 190.5);

    let values = config.fallback_values();
    assert_eq!(values[Category::Race], "East asian");
    assert_eq!(values[Category::Age], "20-29");
    assert_eq!(values[Category::Sex], "Female");

    let ranked = config.fallback_ranked();
    for category in Category::all() {
        assert_eq!(
            ranked[category],
            vec![RankedItem::new(values[category].clone(), 96.0)]
        );
    }
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{ "fallback_race": "White", "ring_size": 200.0 }"#,
    )
    .unwrap();

    let config = ReviewConfig::load_from_file(&path).unwrap();
    assert_eq!(config.fallback_race, "White");
    assert_eq!(config.ring_size, 200.0);
    assert_eq!(config.fallback_age, "20-29");
    assert_eq!(config.payload_key, DEFAULT_PAYLOAD_KEY);
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempdir().unwrap();
    let err = ReviewConfig::load_from_file(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, SkinstricError::Config(_)));
}

#[test]
fn test_bad_json_is_config_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ ring_size: }").unwrap();
    let err = ReviewConfig::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}
