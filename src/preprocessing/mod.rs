//! Audio preprocessing modules
//!
//! Utilities that prepare decoded audio for fingerprinting. Only channel
//! mixing lives here; resampling and loudness normalization are left to the
//! sample source.

pub mod channel_mixer;
