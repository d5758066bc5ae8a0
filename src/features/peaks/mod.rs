//! Spectral peak (landmark) extraction
//!
//! Finds time-frequency bins that dominate their neighborhood and clear an
//! amplitude cutoff. Peaks are the only spectrogram information carried
//! forward into fingerprints.

pub mod extractor;
pub mod neighborhood;
pub mod threshold;

pub use extractor::extract_peaks;

use serde::{Deserialize, Serialize};

/// Local-maximum coordinate in a spectrogram
///
/// Ordering is by frame, then bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Peak {
    /// Time frame index
    pub frame: usize,
    /// Frequency bin index
    pub bin: usize,
}

impl Peak {
    /// Create a peak at (frame, bin)
    pub fn new(frame: usize, bin: usize) -> Self {
        Self { frame, bin }
    }
}
