//! Feature extraction modules
//!
//! The fingerprinting pipeline, in data-flow order:
//! - Spectrogram generation (windowed STFT magnitudes)
//! - Peak extraction (2-D local maxima)
//! - Fingerprint forming (target-zone peak pairs)

pub mod fingerprint;
pub mod peaks;
pub mod spectrogram;
