//! CLI error types.

use std::path::PathBuf;

use batch::BatchError;
use lookup::LookupError;
use thiserror::Error;

/// Errors reported to the user by the `ipdata` binary.
#[derive(Debug, Error)]
pub enum Error {
    /// No API key was given and none is stored.
    #[error(
        "Please specify IPData API Key (--api-key, IPDATA_API_KEY, or run `ipdata init <API_KEY>`)"
    )]
    MissingApiKey,

    /// The home directory is unknown, so the credential file cannot be located.
    #[error("Cannot locate the credential file: HOME is not set")]
    MissingHome,

    /// The key given to `init` was rejected by the API.
    #[error("Failed to check the API Key: {0}")]
    InvalidApiKey(#[source] LookupError),

    /// Reading or writing the credential file failed.
    #[error("Credential file {}: {source}", .path.display())]
    Credentials {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    /// The API answered with a record missing an expected field.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("StdIO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, Error>;
