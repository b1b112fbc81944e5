//! Backend client error types.

use thiserror::Error;
use zipcast_core::{NetworkError, ReqwestErrorExt};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid backend URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Non-OK response. `message` is the backend's `error` field, if any.
    #[error("Backend returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// The message the backend attached to a non-OK response.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                message: Some(msg), ..
            } => Some(msg.as_str()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e.into_network_error())
        }
    }
}

/// Result type for backend operations.
pub type ClientResult<T> = Result<T, ClientError>;
