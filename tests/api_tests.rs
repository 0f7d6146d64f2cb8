use serde_json::json;
use skinstric::api::{
    confirm_selection, current_view, load_review, reset_selection, select_category, select_row,
    ReviewState,
};
use skinstric::cache::{keys, SessionCache};
use skinstric::category::Category;
use skinstric::config::ReviewConfig;
use skinstric::error::SkinstricError;
use skinstric::session::LoadOutcome;

fn cache_with_payload() -> SessionCache {
    let mut cache = SessionCache::in_memory();
    let payload = json!({
        "data": {
            "race": {"Black": 0.2, "White": 0.55, "Indian": 0.25},
            "age": [
                {"range": "30-39", "probability": "35%"},
                {"range": "20-29", "probability": "65%"}
            ],
            "gender": [{"label": "male", "score": 0.9}]
        }
    });
    cache.set(keys::PHASE_TWO_RESPONSE, payload.to_string());
    cache
}

#[test]
fn test_requires_load_first() {
    let state = ReviewState::default();
    assert!(matches!(
        current_view(&state),
        Err(SkinstricError::Session(_))
    ));
}

#[test]
fn test_review_round_trip_through_service() {
    let state = ReviewState::default();
    let view = load_review(&state, &cache_with_payload(), &ReviewConfig::default()).unwrap();
    assert_eq!(view.dominant_display, "White");
    assert_eq!(view.rows.len(), 3);

    let view = select_category(&state, Category::Sex).unwrap();
    let labels: Vec<_> = view.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["male", "female"]);
    assert_eq!(view.rows[1].display_label, "Female");
    assert_eq!(view.rows[1].percent, "10%");

    let view = select_row(&state, 1).unwrap();
    assert!(view.pending_confirm);
    let view = confirm_selection(&state).unwrap();
    assert_eq!(view.confirmed_values.sex, "female");
    assert!(view.pending_reset);

    let view = reset_selection(&state).unwrap();
    assert_eq!(view.confirmed_values.sex, "male");
    assert!(!view.pending_reset);
}

#[test]
fn test_age_rows_from_string_percents() {
    let state = ReviewState::default();
    load_review(&state, &cache_with_payload(), &ReviewConfig::default()).unwrap();
    let view = select_category(&state, Category::Age).unwrap();
    assert_eq!(view.dominant_display, "20-29 y.o.");
    assert_eq!(view.rows[0].label, "20-29");
    assert_eq!(view.rows[0].percent, "65%");
    assert_eq!(view.active_percent, 65);
}

#[test]
fn test_bad_row_leaves_state_unchanged() {
    let state = ReviewState::default();
    load_review(&state, &cache_with_payload(), &ReviewConfig::default()).unwrap();
    assert!(select_row(&state, 9).is_err());
    assert_eq!(current_view(&state).unwrap().selected_row_index, 0);
}

#[test]
fn test_empty_cache_still_loads() {
    let state = ReviewState::default();
    let view = load_review(&state, &SessionCache::in_memory(), &ReviewConfig::default()).unwrap();
    assert_eq!(view.outcome, LoadOutcome::CacheMiss);
    assert_eq!(view.dominant_display, "East Asian");
    assert_eq!(view.active_percent, 96);
}
