//! Fingerprint forming
//!
//! Pairs each anchor peak with a bounded number of later peaks inside its
//! target zone. Each pair becomes a fixed-width key plus the anchor's frame
//! offset in its clip.

pub mod former;
pub mod key;

pub use former::form_fingerprints;
pub use key::FingerprintKey;

use serde::{Deserialize, Serialize};

/// One anchor/target peak pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Frequency bin of the anchor peak
    pub anchor_freq: u32,
    /// Frequency bin of the target peak
    pub target_freq: u32,
    /// Frames from anchor to target (never negative)
    pub time_delta: u32,
    /// Absolute frame of the anchor within its clip
    pub anchor_time: u32,
}

impl Fingerprint {
    /// Hash key used by the index
    #[inline]
    pub fn key(&self) -> FingerprintKey {
        FingerprintKey::from_parts(self.anchor_freq, self.target_freq, self.time_delta)
    }
}
