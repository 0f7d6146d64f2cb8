use crate::reports;
use clap::Args;
use skinstric::api::{self, ReviewState};
use skinstric::cache::SessionCache;
use skinstric::category::Category;
use skinstric::config::ReviewConfig;
use skinstric::error::SkResult;
use skinstric::session::ReviewView;
use std::str::FromStr;

#[derive(Args, Debug, Clone)]
pub struct ReviewArgs {
    #[command(flatten)]
    pub config: ReviewConfig,

    /// Interactions applied in order: `race`, `age`, `sex`, `row:<n>`, `confirm`, `reset`.
    #[arg(short, long = "action")]
    pub actions: Vec<ReviewAction>,

    /// Print the final view as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Switch(Category),
    Row(usize),
    Confirm,
    Reset,
}

impl FromStr for ReviewAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        match token.as_str() {
            "confirm" => return Ok(Self::Confirm),
            "reset" => return Ok(Self::Reset),
            _ => {}
        }
        if let Some(index) = token.strip_prefix("row:") {
            return index
                .trim()
                .parse()
                .map(Self::Row)
                .map_err(|_| format!("Invalid row index in '{}'", s));
        }
        Category::from_str(&token)
            .map(Self::Switch)
            .map_err(|_| format!("Unknown action '{}' (use race|age|sex|row:<n>|confirm|reset)", s))
    }
}

pub fn run(args: &ReviewArgs, cache_path: &str, config: &ReviewConfig) -> SkResult<()> {
    let cache = SessionCache::open(cache_path)?;
    let state = ReviewState::default();

    let mut view = api::load_review(&state, &cache, config)?;
    for action in &args.actions {
        view = apply(&state, *action)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        reports::print_review(&view);
    }
    Ok(())
}

fn apply(state: &ReviewState, action: ReviewAction) -> SkResult<ReviewView> {
    match action {
        ReviewAction::Switch(category) => api::select_category(state, category),
        ReviewAction::Row(index) => api::select_row(state, index),
        ReviewAction::Confirm => api::confirm_selection(state),
        ReviewAction::Reset => api::reset_selection(state),
    }
}
