//! Error types for the fingerprinting engine

use thiserror::Error;

/// Errors that can occur while fingerprinting or identifying audio
///
/// Peak extraction, fingerprint forming and index lookups are total over
/// valid inputs, so most variants originate at the edges of the pipeline:
/// configuration, the sample source, and snapshot persistence.
#[derive(Debug, Error)]
pub enum FingerprintError {
    /// The clip is shorter than the configured minimum (or one transform window)
    #[error("Insufficient samples: got {got}, need at least {required}")]
    InsufficientSamples {
        /// Number of samples supplied
        got: usize,
        /// Minimum number of samples required
        required: usize,
    },

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Audio decoding error
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// File access error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot or configuration (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
