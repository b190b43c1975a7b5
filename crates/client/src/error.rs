//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A request URL could not be constructed from the base URL.
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// JSON parsing of a response body failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The backend rejected the bearer credential.
    #[error("not authenticated")]
    Unauthorized,

    /// The backend rejected the request with an error payload.
    #[error("backend error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Human-readable message from the backend's error body.
        message: String,
    },
}

impl ApiError {
    /// Whether this error means the credential is no longer valid.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
