//! Error types for TRACEBENCH construction and lifecycle failures.
//!
//! Operation-level failures travel as [`crate::Status`] values; the types
//! here cover everything that happens before a backend is ready to serve
//! (registry lookup, property injection, init) and after it stops (cleanup).

use thiserror::Error;

/// Configuration errors raised while interpreting the property map.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required property: {key}")]
    MissingProperty { key: String },

    #[error("Invalid value for {key}: {value} - {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Backend construction and lifecycle errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("Unknown backend: {name}")]
    Unknown { name: String },

    #[error("Backend init failed: {reason}")]
    InitFailed { reason: String },

    #[error("Backend cleanup failed: {reason}")]
    CleanupFailed { reason: String },

    #[error("Invalid batch: {reason}")]
    InvalidBatch { reason: String },
}

/// Master error type for all TRACEBENCH failures.
#[derive(Debug, Clone, Error)]
pub enum BenchError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Result type alias for TRACEBENCH operations.
pub type BenchResult<T> = Result<T, BenchError>;

// =============================================================================
// TESTS
// =============================================================================
