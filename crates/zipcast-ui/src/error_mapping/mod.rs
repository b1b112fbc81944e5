//! Maps backend client errors to zipcast_core::ForecastError for consistent user-facing messages.
//! The same `ClientError` means different things per operation, so each service has its own module.

mod directory;
mod prediction;

pub use directory::directory_error;
pub use prediction::{prediction_error, resolution_error};
