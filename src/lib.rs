//! # Stratum Fingerprint
//!
//! Landmark-based audio fingerprinting: identify an unknown clip by matching
//! it against a database of previously fingerprinted songs.
//!
//! ## Features
//!
//! - **Spectrogram**: windowed STFT magnitudes with optional log scaling
//! - **Peak Extraction**: 2-D local maxima over a configurable neighborhood
//! - **Fingerprints**: anchor/target peak pairs packed into 64-bit keys, bounded by a target zone and fan-out
//! - **Index**: concurrent inverted index with vote-count and offset-aligned ranking
//! - **Persistence**: JSON snapshots of the index, song catalog and configuration
//!
//! ## Quick Start
//!
//! ```no_run
//! use stratum_fingerprint::{FingerprintConfig, Recognizer};
//!
//! // Mono f32 samples from any source
//! let song: Vec<f32> = vec![]; // Your audio data
//! let clip: Vec<f32> = vec![];
//! let sample_rate = 44100;
//!
//! let recognizer = Recognizer::new(FingerprintConfig::default())?;
//! recognizer.add_song("Song Title", "Artist", &song, sample_rate)?;
//!
//! let result = recognizer.identify(&clip, sample_rate)?;
//! if let Some(best) = result.best() {
//!     println!("Matched {} (score {})", best.label(), best.score);
//! }
//! # Ok::<(), stratum_fingerprint::FingerprintError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Samples → Spectrogram → Peaks → Fingerprints → Index (store / query)
//! ```
//!
//! Every stage before the index is a pure function of its input and the
//! configuration. Songs and queries must be fingerprinted with the same
//! `FingerprintConfig`; a mismatch is not detected and simply produces no
//! matches.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod index;
pub mod io;
pub mod preprocessing;

// Re-export main types
pub use analysis::{ClipFingerprints, MatchStrategy, RankedMatch, RecognitionResult, Recognizer};
pub use config::FingerprintConfig;
pub use error::FingerprintError;
pub use features::fingerprint::{Fingerprint, FingerprintKey};
pub use features::peaks::Peak;
pub use features::spectrogram::{generate_spectrogram, Spectrogram};
pub use index::{FingerprintIndex, SongId};

use features::fingerprint::form_fingerprints;
use features::peaks::extract_peaks;

/// Fingerprint a clip
///
/// Runs spectrogram generation, peak extraction and fingerprint forming.
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `config` - Fingerprinting configuration
///
/// # Errors
///
/// Returns `FingerprintError::InsufficientSamples` for clips shorter than the
/// configured minimum, and `InvalidConfig`/`InvalidInput` for unusable
/// parameters. A clip without peaks is not an error and yields no
/// fingerprints.
///
/// # Example
///
/// ```
/// use stratum_fingerprint::{fingerprint_audio, FingerprintConfig};
///
/// let config = FingerprintConfig { window_size: 512, hop_size: 256, ..Default::default() };
/// let silence = vec![0.0f32; 8000];
/// assert!(fingerprint_audio(&silence, 8000, &config)?.is_empty());
/// # Ok::<(), stratum_fingerprint::FingerprintError>(())
/// ```
pub fn fingerprint_audio(
    samples: &[f32],
    sample_rate: u32,
    config: &FingerprintConfig,
) -> Result<Vec<Fingerprint>, FingerprintError> {
    Ok(extract_clip(samples, sample_rate, config)?.fingerprints)
}

/// Fingerprint a clip and keep the intermediate peaks
///
/// Same as [`fingerprint_audio`] but also returns the peaks and the
/// spectrogram dimensions.
pub fn extract_clip(
    samples: &[f32],
    sample_rate: u32,
    config: &FingerprintConfig,
) -> Result<ClipFingerprints, FingerprintError> {
    log::debug!(
        "Fingerprinting clip: {} samples at {} Hz",
        samples.len(),
        sample_rate
    );

    let spectrogram = generate_spectrogram(samples, sample_rate, config)?;
    let peaks = extract_peaks(&spectrogram, config.neighborhood, config.amplitude_threshold);
    let fingerprints = form_fingerprints(&peaks, config.target_zone, config.fan_out);

    Ok(ClipFingerprints {
        num_frames: spectrogram.num_frames(),
        num_bins: spectrogram.num_bins(),
        peaks,
        fingerprints,
    })
}
