//! Error types shared by the dashboard crates.

use thiserror::Error;

/// Result type alias using CommonError.
pub type CommonResult<T> = Result<T, CommonError>;

/// Errors raised while building or decoding the shared data model.
#[derive(Debug, Error)]
pub enum CommonError {
    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Invalid region code: {0}")]
    InvalidRegionCode(String),

    #[error("Invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CommonError {
    fn from(err: serde_json::Error) -> Self {
        CommonError::InvalidGeoJson(err.to_string())
    }
}
