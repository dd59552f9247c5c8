//! Error types for the ice-chart client.

use thiserror::Error;

/// Errors that can occur while querying the ice-chart service.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Service error {code}: {message}")]
    Service { code: i64, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

impl From<ice_common::CommonError> for FetchError {
    fn from(e: ice_common::CommonError) -> Self {
        FetchError::Decode(e.to_string())
    }
}

/// Result type for ice-chart operations.
pub type Result<T> = std::result::Result<T, FetchError>;
