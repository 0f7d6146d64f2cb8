//! The steps that happen before review: the name/location form and the
//! photo upload that produces the cached classifier response.
use crate::cache::{keys, SessionCache};
use crate::error::{SkResult, SkinstricError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;
use tracing::info;

static TEXT_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s'.,-]+$").expect("text value regex must compile"));

pub const INVALID_NAME: &str = "Please enter a valid name (letters only).";
pub const INVALID_LOCATION: &str = "Please enter a valid location (letters only).";
pub const NAME_FIRST: &str = "Please enter a valid name first.";
pub const INVALID_CAPTURE: &str = "Could not process captured image.";

/// Letters, whitespace, and `' . , -` only; blank is invalid.
pub fn is_valid_text_value(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && TEXT_VALUE.is_match(trimmed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntakeStep {
    Name,
    Location,
}

impl IntakeStep {
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Name => "Introduce Yourself",
            Self::Location => "Where are you from?",
        }
    }
}

/// Phase-one request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeSubmission {
    pub name: String,
    pub location: String,
}

impl IntakeSubmission {
    pub fn record(&self, cache: &mut SessionCache) {
        cache.set(keys::NAME, self.name.clone());
        cache.set(keys::LOCATION, self.location.clone());
    }
}

/// Two-step form: a name, then a location.
#[derive(Debug, Clone)]
pub struct IntakeFlow {
    step: IntakeStep,
    input: String,
    name: String,
    error: Option<String>,
}

impl Default for IntakeFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeFlow {
    pub fn new() -> Self {
        Self {
            step: IntakeStep::Name,
            input: String::new(),
            name: String::new(),
            error: None,
        }
    }

    pub fn step(&self) -> IntakeStep {
        self.step
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Submits the current field. Returns the request body once both steps pass.
    pub fn submit(&mut self) -> SkResult<Option<IntakeSubmission>> {
        self.error = None;
        match self.step {
            IntakeStep::Name => self.submit_name().map(|_| None),
            IntakeStep::Location => self.submit_location().map(Some),
        }
    }

    fn submit_name(&mut self) -> SkResult<()> {
        let trimmed = self.input.trim().to_string();
        if !is_valid_text_value(&trimmed) {
            return Err(self.fail(INVALID_NAME));
        }
        self.name = trimmed;
        self.input.clear();
        self.step = IntakeStep::Location;
        Ok(())
    }

    fn submit_location(&mut self) -> SkResult<IntakeSubmission> {
        let location = self.input.trim().to_string();
        if !is_valid_text_value(&location) {
            return Err(self.fail(INVALID_LOCATION));
        }
        if !is_valid_text_value(&self.name) {
            self.step = IntakeStep::Name;
            self.input = self.name.clone();
            return Err(self.fail(NAME_FIRST));
        }
        info!("Intake complete for '{}' from '{}'", self.name, location);
        Ok(IntakeSubmission {
            name: self.name.clone(),
            location,
        })
    }

    /// Steps back from location to name, restoring the name as input.
    pub fn back(&mut self) -> bool {
        if self.step != IntakeStep::Location {
            return false;
        }
        self.step = IntakeStep::Name;
        self.input = self.name.clone();
        self.error = None;
        true
    }

    fn fail(&mut self, message: &str) -> SkinstricError {
        self.error = Some(message.to_string());
        SkinstricError::Validation(message.to_string())
    }
}

/// Phase-two request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSubmission {
    pub image: String,
}

impl ImageSubmission {
    /// Keeps the base64 payload of a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(data_url: &str) -> SkResult<Self> {
        let image = data_url.split(',').nth(1).unwrap_or_default();
        if image.is_empty() {
            return Err(SkinstricError::Validation(INVALID_CAPTURE.to_string()));
        }
        Ok(Self {
            image: image.to_string(),
        })
    }
}

/// Keeps an approved camera capture as the preview and returns its request body.
///
/// The preview is stored as the full data URL; nothing is written if the URL
/// carries no image payload.
pub fn record_capture(cache: &mut SessionCache, data_url: &str) -> SkResult<ImageSubmission> {
    let submission = ImageSubmission::from_data_url(data_url)?;
    cache.set(keys::CAPTURED_PHOTO_PREVIEW, data_url);
    info!("Recorded capture preview ({} base64 chars)", submission.image.len());
    Ok(submission)
}

/// Stores an upload response the way the upload step leaves it for review.
pub fn record_upload_response(
    cache: &mut SessionCache,
    file_name: &str,
    response: &Value,
) -> SkResult<()> {
    cache.set(keys::UPLOADED_FILE_NAME, file_name);
    cache.set(keys::PHASE_TWO_RESPONSE, serde_json::to_string(response)?);
    info!("Recorded upload response for '{}'", file_name);
    Ok(())
}
