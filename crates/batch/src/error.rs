//! Batch pipeline error types.

use lookup::LookupError;
use thiserror::Error;

/// Errors that can occur while assembling or running a batch.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The requested output cannot be produced with the given options.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The requested output format is not known.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Looking up one of the input addresses failed; the batch is aborted.
    #[error("Lookup of {address} (item {position}) failed: {source}")]
    Lookup {
        position: usize,
        address: String,
        #[source]
        source: LookupError,
    },

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a CSV row failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Encoding the JSON document failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for batch operations.
pub type Result<T> = std::result::Result<T, BatchError>;
