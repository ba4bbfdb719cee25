//! Stop catalog error types.

/// Errors from stop lookup and catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum StopError {
    /// Submitted location is not in the catalog (user-correctable)
    #[error("unknown stop: {0:?}")]
    UnknownStop(String),

    /// Catalog file could not be read
    #[error("failed to read stop catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not a JSON array of names
    #[error("stop catalog JSON parse error: {message}")]
    Json { message: String },
}
