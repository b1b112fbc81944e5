//! Prediction backend client for Zipcast
//!
//! Talks to the backend that lists known locations, resolves ZIP codes, and
//! computes temperature summaries.

pub mod client;
pub mod directory;
pub mod error;
pub mod types;
pub mod zip;

pub use client::{BackendClient, ForecastBackend};
pub use directory::load_directory;
pub use error::{ClientError, ClientResult};
pub use types::*;
pub use zip::is_valid_zip;
