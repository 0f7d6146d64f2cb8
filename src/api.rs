use crate::cache::SessionCache;
use crate::category::Category;
use crate::config::ReviewConfig;
use crate::error::{SkResult, SkinstricError};
use crate::payload::load_from_cache;
use crate::session::{ReviewSession, ReviewView};
use std::sync::{Mutex, MutexGuard};

/// Shared state behind a front end driving the review screen.
pub struct ReviewState {
    pub session: Mutex<Option<ReviewSession>>,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            session: Mutex::new(None),
        }
    }
}

impl ReviewState {
    fn lock(&self) -> SkResult<MutexGuard<'_, Option<ReviewSession>>> {
        self.session
            .lock()
            .map_err(|e| SkinstricError::Session(e.to_string()))
    }

    fn with_session<T>(&self, f: impl FnOnce(&mut ReviewSession) -> SkResult<T>) -> SkResult<T> {
        let mut guard = self.lock()?;
        let session = guard.as_mut().ok_or_else(|| {
            SkinstricError::Session("Review not loaded. Load a review first.".to_string())
        })?;
        f(session)
    }
}

/// Service: build the review from the cached upload response.
///
/// A missing or broken payload still yields a usable review.
pub fn load_review(
    state: &ReviewState,
    cache: &SessionCache,
    config: &ReviewConfig,
) -> SkResult<ReviewView> {
    let session = ReviewSession::load(load_from_cache(cache, config), config);
    let view = session.view();
    *state.lock()? = Some(session);
    Ok(view)
}

pub fn current_view(state: &ReviewState) -> SkResult<ReviewView> {
    state.with_session(|s| Ok(s.view()))
}

pub fn select_category(state: &ReviewState, category: Category) -> SkResult<ReviewView> {
    state.with_session(|s| {
        s.switch_category(category);
        Ok(s.view())
    })
}

pub fn select_row(state: &ReviewState, index: usize) -> SkResult<ReviewView> {
    state.with_session(|s| {
        s.select_row(index)?;
        Ok(s.view())
    })
}

pub fn confirm_selection(state: &ReviewState) -> SkResult<ReviewView> {
    state.with_session(|s| {
        s.confirm();
        Ok(s.view())
    })
}

pub fn reset_selection(state: &ReviewState) -> SkResult<ReviewView> {
    state.with_session(|s| {
        s.reset();
        Ok(s.view())
    })
}
