use crate::category::{Category, PerCategory};
use crate::config::ReviewConfig;
use crate::error::{SkResult, SkinstricError};
use crate::format::{
    age_display, clamp_percent, format_percent, labels_equal, normalize_score_to_percent,
    title_case, RingGeometry,
};
use crate::payload::{DominantValues, ParsedDemographics, RankedByCategory};
use crate::ranked::RankedItem;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// How the initial load resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LoadOutcome {
    /// Payload parsed; lists the categories that still needed defaults.
    Parsed { fallback: Vec<Category> },
    /// Nothing cached under the payload key.
    CacheMiss,
    /// Cached text was unusable; everything uses defaults.
    Malformed { reason: String },
}

/// Review-screen state: the original and confirmed picks, the ranked rows,
/// and the cursor over them.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    selected: Category,
    row: usize,
    original: DominantValues,
    confirmed: DominantValues,
    ranked: RankedByCategory,
    ring: RingGeometry,
    outcome: LoadOutcome,
}

impl ReviewSession {
    /// Seeds a session from the load step, applying defaults when it failed.
    pub fn load(result: SkResult<ParsedDemographics>, config: &ReviewConfig) -> Self {
        let (parsed, outcome) = match result {
            Ok(parsed) => {
                let fallback = parsed.fallback_categories();
                (parsed, LoadOutcome::Parsed { fallback })
            }
            Err(SkinstricError::CacheMiss(key)) => {
                info!("No cached payload under '{}'; showing defaults", key);
                (ParsedDemographics::fallback(config), LoadOutcome::CacheMiss)
            }
            Err(e) => {
                warn!("Cached payload unusable ({}); showing defaults", e);
                (
                    ParsedDemographics::fallback(config),
                    LoadOutcome::Malformed {
                        reason: e.to_string(),
                    },
                )
            }
        };
        Self::from_parsed(parsed, config.ring(), outcome)
    }

    pub fn from_parsed(
        parsed: ParsedDemographics,
        ring: RingGeometry,
        outcome: LoadOutcome,
    ) -> Self {
        Self {
            selected: Category::Race,
            row: 0,
            confirmed: parsed.original.clone(),
            original: parsed.original,
            ranked: parsed.ranked,
            ring,
            outcome,
        }
    }

    // --- transitions ---

    /// Opens a category panel and highlights the row matching its confirmed value.
    pub fn switch_category(&mut self, category: Category) {
        self.selected = category;
        self.row = index_for_label(&self.ranked[category], &self.confirmed[category]);
    }

    pub fn select_row(&mut self, index: usize) -> SkResult<()> {
        let rows = self.active_rows();
        if index >= rows.len() {
            return Err(SkinstricError::Session(format!(
                "row {} out of range for {} ({} rows)",
                index,
                self.selected,
                rows.len()
            )));
        }
        self.row = index;
        Ok(())
    }

    /// Restores the active category to its original value. Returns whether anything changed.
    pub fn reset(&mut self) -> bool {
        let category = self.selected;
        let changed = self.has_pending_reset();
        let original = self.original[category].clone();
        self.row = index_for_label(&self.ranked[category], &original);
        if changed {
            info!("{} reset to '{}'", category, original);
        }
        self.confirmed[category] = original;
        changed
    }

    /// Accepts the highlighted row for the active category. Returns whether anything changed.
    pub fn confirm(&mut self) -> bool {
        let category = self.selected;
        let Some(row) = self.selected_row() else {
            return false;
        };
        let label = row.label.clone();
        let changed = !labels_equal(&label, &self.confirmed[category]);
        if changed {
            info!("{} confirmed as '{}'", category, label);
        }
        self.confirmed[category] = label;
        changed
    }

    // --- accessors ---

    pub fn selected_category(&self) -> Category {
        self.selected
    }

    pub fn selected_row_index(&self) -> usize {
        self.row
    }

    pub fn original(&self) -> &DominantValues {
        &self.original
    }

    pub fn confirmed(&self) -> &DominantValues {
        &self.confirmed
    }

    pub fn ranked(&self) -> &RankedByCategory {
        &self.ranked
    }

    pub fn outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    pub fn active_rows(&self) -> &[RankedItem] {
        &self.ranked[self.selected]
    }

    /// Highlighted row, or the first row if the cursor is stale.
    pub fn selected_row(&self) -> Option<&RankedItem> {
        let rows = self.active_rows();
        rows.get(self.row).or_else(|| rows.first())
    }

    // --- derived display values ---

    pub fn has_pending_confirm(&self) -> bool {
        self.selected_row().is_some_and(|row| {
            !row.label.is_empty() && !labels_equal(&row.label, &self.confirmed[self.selected])
        })
    }

    pub fn has_pending_reset(&self) -> bool {
        !labels_equal(&self.confirmed[self.selected], &self.original[self.selected])
    }

    pub fn dominant_display(&self) -> String {
        dominant_display(self.selected, &self.confirmed[self.selected])
    }

    /// Confidence of the highlighted row as a whole percent in `0..=100`.
    pub fn active_percent(&self) -> u8 {
        let score = self.selected_row().map(|row| row.score).unwrap_or(0.0);
        clamp_percent(normalize_score_to_percent(score))
    }

    pub fn ring_offset(&self) -> f64 {
        self.ring.offset(self.active_percent())
    }

    /// Snapshot of everything the review screen renders.
    pub fn view(&self) -> ReviewView {
        let rows = self
            .active_rows()
            .iter()
            .enumerate()
            .map(|(index, row)| RowView {
                label: row.label.clone(),
                display_label: row_display(self.selected, &row.label),
                percent: format_percent(row.score),
                selected: index == self.row,
            })
            .collect();

        let tiles = Category::all()
            .map(|category| TileView {
                category,
                label: category.panel_label().to_string(),
                value: self.confirmed[category].clone(),
                active: category == self.selected,
            })
            .collect();

        ReviewView {
            selected_category: self.selected,
            panel_label: self.selected.panel_label().to_string(),
            dominant_display: self.dominant_display(),
            active_percent: self.active_percent(),
            ring_circumference: self.ring.circumference(),
            ring_offset: self.ring_offset(),
            selected_row_index: self.row,
            rows,
            tiles,
            pending_confirm: self.has_pending_confirm(),
            pending_reset: self.has_pending_reset(),
            original_values: self.original.clone(),
            confirmed_values: self.confirmed.clone(),
            outcome: self.outcome.clone(),
        }
    }
}

/// Index of the row whose label matches, or 0.
pub fn index_for_label(rows: &[RankedItem], label: &str) -> usize {
    rows.iter()
        .position(|row| labels_equal(&row.label, label))
        .unwrap_or(0)
}

/// Headline text: title case for race and sex, an age suffix for age.
pub fn dominant_display(category: Category, value: &str) -> String {
    match category {
        Category::Age => age_display(value),
        Category::Race | Category::Sex => title_case(value),
    }
}

fn row_display(category: Category, label: &str) -> String {
    match category {
        Category::Age => label.to_string(),
        Category::Race | Category::Sex => title_case(label),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    pub label: String,
    pub display_label: String,
    pub percent: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileView {
    pub category: Category,
    pub label: String,
    pub value: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub selected_category: Category,
    pub panel_label: String,
    pub dominant_display: String,
    pub active_percent: u8,
    pub ring_circumference: f64,
    pub ring_offset: f64,
    pub selected_row_index: usize,
    pub rows: Vec<RowView>,
    pub tiles: Vec<TileView>,
    pub pending_confirm: bool,
    pub pending_reset: bool,
    pub original_values: PerCategory<String>,
    pub confirmed_values: PerCategory<String>,
    pub outcome: LoadOutcome,
}
