//! Centralized error types for Zipcast.
//!
//! This module provides the typed errors that:
//! - Terminate a prediction attempt or directory load with a UI message
//! - Classify transport failures coming out of reqwest
//! - Preserve full error context for logging

use thiserror::Error;

/// Fixed advisory shown when the location directory cannot be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load location data. Please refresh the page.";
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid ZIP code format";
pub const MISSING_INPUT_MESSAGE: &str = "Please provide a ZIP code, country, or town";
pub const RESOLUTION_FALLBACK_MESSAGE: &str = "Failed to resolve ZIP code";
pub const PREDICTION_FALLBACK_MESSAGE: &str = "Failed to get prediction";

/// Failure of a single workflow attempt.
///
/// Every variant is terminal for the attempt. Use `user_message()` for the
/// text shown in the error block; `Display` is meant for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForecastError {
    /// Countries or towns could not be fetched. The detail is for logs only.
    #[error("Location directory load failed: {0}")]
    Load(String),

    #[error("ZIP token does not match the accepted format")]
    InvalidFormat,

    #[error("No ZIP code, country, or town provided")]
    MissingInput,

    #[error("ZIP resolution failed: {0}")]
    ResolutionFailed(String),

    #[error("Prediction failed: {0}")]
    PredictionFailed(String),
}

impl ForecastError {
    /// Build a resolution failure, falling back to the generic message when
    /// the backend supplied none.
    pub fn resolution_failed(message: Option<&str>) -> Self {
        Self::ResolutionFailed(non_empty_or(message, RESOLUTION_FALLBACK_MESSAGE))
    }

    /// Build a prediction failure, falling back to the generic message when
    /// the backend supplied none.
    pub fn prediction_failed(message: Option<&str>) -> Self {
        Self::PredictionFailed(non_empty_or(message, PREDICTION_FALLBACK_MESSAGE))
    }

    /// Returns the message displayed verbatim in the error block.
    pub fn user_message(&self) -> String {
        match self {
            Self::Load(_) => LOAD_ERROR_MESSAGE.to_string(),
            Self::InvalidFormat => INVALID_FORMAT_MESSAGE.to_string(),
            Self::MissingInput => MISSING_INPUT_MESSAGE.to_string(),
            Self::ResolutionFailed(msg) | Self::PredictionFailed(msg) => msg.clone(),
        }
    }
}

fn non_empty_or(message: Option<&str>, fallback: &str) -> String {
    match message {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => fallback.to_string(),
    }
}

/// Transport-level failures talking to the backend.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_decode() || self.is_body() {
            NetworkError::InvalidResponse(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
