//! Fixed-width fingerprint keys
//!
//! Layout of the 64-bit key (most significant first):
//!
//! | bits   | field             |
//! |--------|-------------------|
//! | 63..43 | anchor frequency  |
//! | 42..22 | target frequency  |
//! | 21..0  | time delta        |

use serde::{Deserialize, Serialize};
use std::fmt;

const FREQ_BITS: u32 = 21;
const DELTA_BITS: u32 = 22;

/// Largest frequency bin a key can hold
pub const MAX_FREQ_BIN: u64 = (1 << FREQ_BITS) - 1;

/// Largest time delta a key can hold
pub const MAX_TIME_DELTA: u64 = (1 << DELTA_BITS) - 1;

/// Hash key of an (anchor frequency, target frequency, time delta) triple
///
/// Identical triples always produce identical keys and distinct in-range
/// triples never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FingerprintKey(pub u64);

impl FingerprintKey {
    /// Pack a triple into a key
    ///
    /// Out-of-range fields are masked; configuration validation keeps real
    /// inputs in range.
    ///
    /// # Example
    ///
    /// ```
    /// use stratum_fingerprint::features::fingerprint::FingerprintKey;
    ///
    /// let key = FingerprintKey::from_parts(120, 340, 17);
    /// assert_eq!(key.parts(), (120, 340, 17));
    /// ```
    pub fn from_parts(anchor_freq: u32, target_freq: u32, time_delta: u32) -> Self {
        let f1 = anchor_freq as u64 & MAX_FREQ_BIN;
        let f2 = target_freq as u64 & MAX_FREQ_BIN;
        let dt = time_delta as u64 & MAX_TIME_DELTA;
        Self((f1 << (FREQ_BITS + DELTA_BITS)) | (f2 << DELTA_BITS) | dt)
    }

    /// Unpack into (anchor frequency, target frequency, time delta)
    pub fn parts(self) -> (u32, u32, u32) {
        let f1 = (self.0 >> (FREQ_BITS + DELTA_BITS)) & MAX_FREQ_BIN;
        let f2 = (self.0 >> DELTA_BITS) & MAX_FREQ_BIN;
        let dt = self.0 & MAX_TIME_DELTA;
        (f1 as u32, f2 as u32, dt as u32)
    }
}

impl fmt::Display for FingerprintKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extreme_fields() {
        let key = FingerprintKey::from_parts(
            MAX_FREQ_BIN as u32,
            MAX_FREQ_BIN as u32,
            MAX_TIME_DELTA as u32,
        );
        assert_eq!(key.0, u64::MAX);
        assert_eq!(
            key.parts(),
            (MAX_FREQ_BIN as u32, MAX_FREQ_BIN as u32, MAX_TIME_DELTA as u32)
        );
        assert_eq!(FingerprintKey::from_parts(0, 0, 0).0, 0);
    }

    #[test]
    fn test_field_order_matters() {
        let a = FingerprintKey::from_parts(10, 20, 5);
        let b = FingerprintKey::from_parts(20, 10, 5);
        let c = FingerprintKey::from_parts(10, 20, 6);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, FingerprintKey::from_parts(10, 20, 5));
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(FingerprintKey(255).to_string(), "00000000000000ff");
    }
}
