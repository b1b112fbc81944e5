//! Form state and its transitions.
//!
//! `FormState` is the only place the form's data lives. Every user event and
//! every service result goes through one of its transition methods, which keep
//! these rules:
//! - ZIP text and explicit country/town selections are never both the source
//!   of the next prediction.
//! - While `Loading`, input events are rejected and a second submit is
//!   suppressed rather than queued.
//! - A result and an error are never shown together.

use zipcast_client::{is_valid_zip, LocationDirectory, PredictionReport, ResolvedLocation};
use zipcast_core::ForecastError;

/// Where the form is in its load/predict cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Loading,
    Success(PredictionReport),
    Error(String),
}

impl WorkflowState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn result(&self) -> Option<&PredictionReport> {
        match self {
            Self::Success(report) => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Validated input for one prediction attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionInput {
    /// Resolve this ZIP token first, then predict for the result.
    Zip(String),
    /// Predict directly for the held selection.
    Selection(ResolvedLocation),
}

/// What a prediction attempt produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionOutcome {
    /// Set when a ZIP token was resolved, even if the prediction then failed.
    pub resolved: Option<ResolvedLocation>,
    pub result: Result<PredictionReport, ForecastError>,
}

/// Check the form fields and pick the input source for a prediction.
///
/// # Errors
/// `InvalidFormat` for a non-empty ZIP that fails the pattern,
/// `MissingInput` when nothing at all was provided.
pub fn validate_input(
    zip: &str,
    location: &ResolvedLocation,
) -> Result<PredictionInput, ForecastError> {
    if !zip.is_empty() {
        if !is_valid_zip(zip) {
            return Err(ForecastError::InvalidFormat);
        }
        return Ok(PredictionInput::Zip(zip.to_string()));
    }

    if location.is_empty() {
        return Err(ForecastError::MissingInput);
    }

    Ok(PredictionInput::Selection(location.clone()))
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    zip: String,
    location: ResolvedLocation,
    directory: LocationDirectory,
    workflow: WorkflowState,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn location(&self) -> &ResolvedLocation {
        &self.location
    }

    pub fn directory(&self) -> &LocationDirectory {
        &self.directory
    }

    pub fn workflow(&self) -> &WorkflowState {
        &self.workflow
    }

    pub fn is_loading(&self) -> bool {
        self.workflow.is_loading()
    }

    /// Update the ZIP field. Clearing it also clears country and town;
    /// typing into it leaves them alone until the next submit.
    ///
    /// Returns false if the input was rejected because the form is loading.
    pub fn set_zip(&mut self, value: impl Into<String>) -> bool {
        if self.reject_while_loading("zip") {
            return false;
        }

        self.zip = value.into();
        if self.zip.is_empty() {
            self.location.clear();
        }
        true
    }

    /// Choose a country, or clear it with `None`. Always clears the town and
    /// the ZIP field.
    pub fn select_country(&mut self, country: Option<&str>) -> bool {
        if self.reject_while_loading("country") {
            return false;
        }

        self.location.country = country.unwrap_or_default().to_string();
        self.location.town.clear();
        self.zip.clear();
        true
    }

    /// Choose a town, or clear it with `None`. Clears the ZIP field only.
    pub fn select_town(&mut self, town: Option<&str>) -> bool {
        if self.reject_while_loading("town") {
            return false;
        }

        self.location.town = town.unwrap_or_default().to_string();
        self.zip.clear();
        true
    }

    /// Raise the loading flag for the startup directory load.
    pub fn begin_directory_load(&mut self) -> bool {
        if self.workflow.is_loading() {
            return false;
        }
        self.workflow = WorkflowState::Loading;
        true
    }

    /// Replace both option lists, or empty both on failure.
    pub fn finish_directory_load(&mut self, result: Result<LocationDirectory, ForecastError>) {
        match result {
            Ok(directory) => {
                self.directory = directory;
                if self.workflow.is_loading() {
                    self.workflow = WorkflowState::Idle;
                }
            }
            Err(e) => {
                self.directory = LocationDirectory::default();
                self.fail(e);
            }
        }
    }

    /// Start a prediction attempt.
    ///
    /// Clears the previous result and error and enters `Loading`. Returns the
    /// validated input to hand to the prediction service, or `None` when the
    /// attempt was suppressed (already loading) or failed validation. A
    /// validation failure is already recorded as the current error.
    pub fn begin_prediction(&mut self) -> Option<PredictionInput> {
        if self.workflow.is_loading() {
            tracing::debug!("Prediction already in flight, ignoring submit");
            return None;
        }

        self.workflow = WorkflowState::Loading;

        match validate_input(&self.zip, &self.location) {
            Ok(input) => Some(input),
            Err(e) => {
                self.fail(e);
                None
            }
        }
    }

    /// Apply the outcome of a prediction attempt and leave `Loading`.
    pub fn finish_prediction(&mut self, outcome: PredictionOutcome) {
        if !self.workflow.is_loading() {
            tracing::warn!("Prediction outcome arrived while not loading; applying anyway");
        }

        if let Some(resolved) = outcome.resolved {
            self.location = resolved;
        }

        match outcome.result {
            Ok(report) => {
                tracing::info!("Prediction ready for {}", report.location);
                self.workflow = WorkflowState::Success(report);
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, e: ForecastError) {
        tracing::warn!("{}", e);
        self.workflow = WorkflowState::Error(e.user_message());
    }

    fn reject_while_loading(&self, field: &str) -> bool {
        if self.workflow.is_loading() {
            tracing::debug!("Ignoring {} input while loading", field);
            return true;
        }
        false
    }
}
