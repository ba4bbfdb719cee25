//! Graph loading error types.

/// Errors that can occur while loading the transit graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Graph file could not be read
    #[error("failed to read transit graph {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Graph file is not valid JSON in the nodes/links format
    #[error("transit graph JSON parse error: {message}")]
    Json { message: String },
}
