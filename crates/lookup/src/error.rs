//! Lookup error types.

use thiserror::Error;

/// Errors that can occur while resolving an address.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The address is not a valid IPv4 or IPv6 literal.
    #[error("{0} is not a valid IPv4 or IPv6 address")]
    InvalidAddress(String),

    /// The upstream service answered with a non-success status.
    #[error("Lookup failed with status {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not a JSON object.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for lookup operations.
pub type Result<T> = std::result::Result<T, LookupError>;
