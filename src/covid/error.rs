//! Fetch error types
//!
//! Every failure the HTTP collaborator can surface collapses into one of
//! these variants.

use thiserror::Error;

/// Errors that can occur when talking to an upstream JSON API
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request timeout")]
    Timeout,

    #[error("Upstream unavailable")]
    Unavailable,

    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response body: {0}")]
    Decode(String),

    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Unavailable
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Request(e)
        }
    }
}

/// Result type alias for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;
