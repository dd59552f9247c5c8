//! Error types for map and plot rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while rendering or writing outputs.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid region grid {}: {reason}", path.display())]
    Grid { path: PathBuf, reason: String },

    #[error("Cannot allocate {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Png(String),
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RenderError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
