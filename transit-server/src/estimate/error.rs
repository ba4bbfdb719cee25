//! Estimation error types.

use crate::domain::TransportMode;

/// Errors from the trip estimator.
///
/// These indicate a caller contract violation (usually an upstream
/// geocoding or routing bug) and are never retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    /// Distance or duration is negative or not a finite number
    #[error("invalid input: {field} must be a finite number >= 0, got {value}")]
    InvalidInput { field: &'static str, value: f64 },

    /// A configured mode factor is not strictly positive
    #[error("invalid factor for {mode}: must be > 0, got {value}")]
    InvalidFactor { mode: TransportMode, value: f64 },
}
