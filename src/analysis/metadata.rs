//! Recognition metadata structures

use serde::{Deserialize, Serialize};

/// How query votes are turned into a ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchStrategy {
    /// One vote per distinct shared key
    #[default]
    Votes,
    /// Largest cluster of matches agreeing on a time offset
    Aligned,
}

/// Recognition metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionMetadata {
    /// Query clip duration in seconds
    pub duration_seconds: f32,

    /// Query clip sample rate in Hz
    pub sample_rate: u32,

    /// Peaks extracted from the query
    pub num_peaks: usize,

    /// Fingerprints formed from the query
    pub num_fingerprints: usize,

    /// Ranking strategy used
    pub strategy: MatchStrategy,

    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: f32,

    /// Algorithm version
    pub algorithm_version: String,
}

impl Default for RecognitionMetadata {
    fn default() -> Self {
        Self {
            duration_seconds: 0.0,
            sample_rate: 0,
            num_peaks: 0,
            num_fingerprints: 0,
            strategy: MatchStrategy::default(),
            processing_time_ms: 0.0,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
