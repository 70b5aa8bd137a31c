//! Error types for GapScout

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoutError {
    // Request validation errors
    #[error("Invalid {field}: {value} (expected {expected})")]
    InvalidCoordinate {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("Radius {radius_m} m outside accepted range [{min_m}, {max_m}] m")]
    RadiusOutOfRange {
        radius_m: f64,
        min_m: f64,
        max_m: f64,
    },

    #[error("Unknown business type: {name}")]
    UnknownBusinessType { name: String },

    // Upstream errors
    #[error("Geo data source unavailable: {reason}")]
    UpstreamUnavailable { reason: String },

    #[error("Location not found: {query}")]
    LocationNotFound { query: String },

    // Consultant errors
    #[error("Consultant unavailable: {reason}")]
    ConsultantUnavailable { reason: String },

    // Pipeline bugs: a classified feature landed in more than one bucket
    // or the breakdown stopped summing to the demand count
    #[error("Internal invariant violated: {reason}")]
    InvariantViolation { reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ScoutError {
    /// Whether a caller may reasonably retry the failed operation.
    ///
    /// Validation and invariant failures are never retryable; upstream
    /// outages are.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ScoutError::UpstreamUnavailable { .. } | ScoutError::ConsultantUnavailable { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
