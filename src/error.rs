//! Error types for the backend client.

use thiserror::Error;

/// Transport-level failure talking to the chat backend.
///
/// Every variant is recovered locally by the widget: a failed chat request
/// becomes an error-flagged transcript message and a failed health probe
/// becomes an `error` connectivity status. Application-level failures (a
/// non-`success` reply status) are not errors at this layer.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed (connection refused, timeout, truncated body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Response body was not the JSON shape we expect.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for backend operations.
pub type Result<T> = std::result::Result<T, ClientError>;
