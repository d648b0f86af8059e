//! Deezer API error types

use thiserror::Error;

/// Deezer error code for "no data" (unknown track/artist id)
pub(crate) const DATA_NOT_FOUND_CODE: i64 = 800;

/// Deezer API client errors
#[derive(Error, Debug)]
pub enum DeezerError {
    /// Invalid input provided to API method
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Deezer answered with a non-success HTTP status
    #[error("Deezer API returned HTTP {0}")]
    Status(u16),

    /// JSON parsing failed
    #[error("Failed to parse Deezer response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Deezer API returned an error object
    #[error("Deezer API error {code} ({kind}): {message}")]
    Api {
        kind: String,
        message: String,
        code: i64,
    },

    /// The requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request timeout
    #[error("Request to Deezer timed out")]
    Timeout,
}

/// Result type for Deezer operations
pub type DeezerResult<T> = Result<T, DeezerError>;
