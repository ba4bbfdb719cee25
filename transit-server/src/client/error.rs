//! Route backend client error types.

use crate::normalize::NormalizeError;

/// Errors from the route backend client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend rejected the bearer token
    #[error("unauthorized: check ROUTE_BACKEND_TOKEN")]
    Unauthorized,

    /// Backend returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not a route result
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

impl From<NormalizeError> for ClientError {
    fn from(err: NormalizeError) -> Self {
        ClientError::Json {
            message: err.to_string(),
        }
    }
}
