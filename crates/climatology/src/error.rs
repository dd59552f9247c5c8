//! Error types for the climatology crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a temperature table.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for climatology operations.
pub type Result<T> = std::result::Result<T, LoadError>;
