//! Category-specific ordering and completion rules applied after ranking.
use crate::format::{normalize_score_to_percent, round_half_up};
use crate::ranked::RankedItem;
use std::cmp::Ordering;
use tracing::debug;

/// Leading integer of an age bucket label (`"30-39"` -> 30); unparsable labels sort last.
pub fn age_lower_bound(label: &str) -> f64 {
    let digits: String = label
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return f64::INFINITY;
    }
    digits.parse().unwrap_or(f64::INFINITY)
}

/// Orders age buckets by the percent the reviewer actually sees.
///
/// Buckets that all display 0% fall back to chronological order; other
/// display ties fall back to the hidden precision. Anything still tied keeps
/// its position.
pub fn sort_age_rows(rows: &[RankedItem]) -> Vec<RankedItem> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(compare_age_rows);
    sorted
}

fn compare_age_rows(a: &RankedItem, b: &RankedItem) -> Ordering {
    let a_percent = normalize_score_to_percent(a.score);
    let b_percent = normalize_score_to_percent(b.score);
    let a_rounded = round_half_up(a_percent);
    let b_rounded = round_half_up(b_percent);

    if a_rounded != b_rounded {
        return b_rounded.partial_cmp(&a_rounded).unwrap_or(Ordering::Equal);
    }
    if a_rounded == 0.0 {
        return age_lower_bound(&a.label)
            .partial_cmp(&age_lower_bound(&b.label))
            .unwrap_or(Ordering::Equal);
    }
    b_percent.partial_cmp(&a_percent).unwrap_or(Ordering::Equal)
}

/// Infers the missing half of a binary sex prediction.
///
/// Only a lone `female` or `male` row is completed; every other list is
/// returned untouched.
pub fn complete_sex_rows(rows: Vec<RankedItem>) -> Vec<RankedItem> {
    if rows.len() != 1 {
        return rows;
    }
    let only = rows[0].clone();
    let normalized = only.label.trim().to_lowercase();
    let complement = match normalized.as_str() {
        "female" => "male",
        "male" => "female",
        _ => return rows,
    };

    let complement_label = match_case(complement, &only.label);
    let complement_score = (100.0 - normalize_score_to_percent(only.score)).max(0.0);
    debug!(
        "completing sex prediction '{}' with '{}' at {:.2}",
        only.label, complement_label, complement_score
    );

    let mut completed = vec![
        only,
        RankedItem::new(complement_label, complement_score),
    ];
    completed.sort_by(|a, b| {
        normalize_score_to_percent(b.score)
            .partial_cmp(&normalize_score_to_percent(a.score))
            .unwrap_or(Ordering::Equal)
    });
    completed
}

/// Capitalizes `word` when `reference` starts with an uppercase letter.
fn match_case(word: &str, reference: &str) -> String {
    let capitalized = reference
        .trim()
        .chars()
        .next()
        .is_some_and(|c| c.is_uppercase());
    if !capitalized {
        return word.to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
