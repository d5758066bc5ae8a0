//! Configuration parameters for fingerprinting
//!
//! One `FingerprintConfig` is threaded through spectrogram generation, peak
//! extraction and fingerprint forming. Songs stored with one configuration
//! can only be recognized by queries fingerprinted with the same one; this
//! is not checked at query time.

use crate::error::FingerprintError;
use crate::features::fingerprint::key::{MAX_FREQ_BIN, MAX_TIME_DELTA};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Window function applied to each frame before the transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowFunction {
    /// Hann window (default)
    Hann,
    /// Hamming window
    Hamming,
    /// Blackman window
    Blackman,
    /// No tapering
    Rectangular,
}

/// Magnitude scaling applied to the spectrogram before peak extraction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MagnitudeScale {
    /// Raw FFT magnitudes
    Linear,
    /// `ln(max(m, floor) / floor)`, compresses dynamic range and stays non-negative
    Log {
        /// Magnitudes below this value are clamped (default: 1e-10)
        floor: f32,
    },
}

/// Shape of the neighborhood a peak must dominate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeighborhoodShape {
    /// All bins within Manhattan distance `radius`
    Diamond,
    /// All bins within Chebyshev distance `radius`
    Square,
}

/// Local-maximum neighborhood
///
/// Larger neighborhoods give fewer, more robust peaks and a lower match density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighborhood {
    /// Neighborhood shape (default: Diamond)
    pub shape: NeighborhoodShape,
    /// Radius in bins along both axes (default: 20)
    pub radius: usize,
}

/// Minimum amplitude a peak must exceed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AmplitudeThreshold {
    /// Fixed magnitude (in the scaled domain)
    Absolute(f32),
    /// Magnitude at this percentile (0.0-1.0) of the whole spectrogram
    Percentile(f32),
}

/// Bounds within which an anchor peak is paired with later peaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetZone {
    /// Minimum frame distance from anchor to target (default: 0)
    pub min_time_delta: usize,
    /// Maximum frame distance from anchor to target (default: 200)
    pub max_time_delta: usize,
    /// Maximum absolute bin distance, `None` for unbounded (default: None)
    pub max_freq_delta: Option<usize>,
}

/// Fingerprinting configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintConfig {
    // Spectrogram
    /// Transform window size in samples (default: 4096)
    pub window_size: usize,

    /// Hop between successive windows in samples (default: 2048)
    pub hop_size: usize,

    /// Window function (default: Hann)
    pub window_function: WindowFunction,

    /// Magnitude scaling (default: Log with floor 1e-10)
    pub magnitude_scale: MagnitudeScale,

    /// Minimum clip duration in seconds (default: 0.0)
    /// A clip must also cover at least one full window
    pub min_clip_seconds: f32,

    // Peak extraction
    /// Local-maximum neighborhood (default: Diamond, radius 20)
    pub neighborhood: Neighborhood,

    /// Amplitude threshold (default: 75th percentile)
    pub amplitude_threshold: AmplitudeThreshold,

    // Fingerprint forming
    /// Target zone for pairing (default: 0..=200 frames, unbounded frequency)
    pub target_zone: TargetZone,

    /// Maximum number of targets paired with each anchor (default: 15)
    pub fan_out: usize,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            window_size: 4096,
            hop_size: 2048,
            window_function: WindowFunction::Hann,
            magnitude_scale: MagnitudeScale::Log { floor: 1e-10 },
            min_clip_seconds: 0.0,
            neighborhood: Neighborhood {
                shape: NeighborhoodShape::Diamond,
                radius: 20,
            },
            amplitude_threshold: AmplitudeThreshold::Percentile(0.75),
            target_zone: TargetZone {
                min_time_delta: 0,
                max_time_delta: 200,
                max_freq_delta: None,
            },
            fan_out: 15,
        }
    }
}

impl FingerprintConfig {
    /// Check that every parameter is usable
    ///
    /// # Errors
    ///
    /// Returns `FingerprintError::InvalidConfig` naming the first bad parameter
    pub fn validate(&self) -> Result<(), FingerprintError> {
        if self.window_size < 2 {
            return Err(invalid(format!(
                "window_size must be >= 2, got {}",
                self.window_size
            )));
        }
        if self.hop_size == 0 || self.hop_size > self.window_size {
            return Err(invalid(format!(
                "hop_size must be in 1..={}, got {}",
                self.window_size, self.hop_size
            )));
        }
        if self.num_bins() as u64 > MAX_FREQ_BIN + 1 {
            return Err(invalid(format!(
                "window_size {} yields more frequency bins than a fingerprint key can hold",
                self.window_size
            )));
        }
        if let MagnitudeScale::Log { floor } = self.magnitude_scale {
            if !(floor.is_finite() && floor > 0.0) {
                return Err(invalid(format!("log floor must be finite and > 0, got {}", floor)));
            }
        }
        if !(self.min_clip_seconds.is_finite() && self.min_clip_seconds >= 0.0) {
            return Err(invalid(format!(
                "min_clip_seconds must be finite and >= 0, got {}",
                self.min_clip_seconds
            )));
        }
        match self.amplitude_threshold {
            AmplitudeThreshold::Absolute(value) if !value.is_finite() => {
                return Err(invalid(format!("absolute threshold must be finite, got {}", value)));
            }
            AmplitudeThreshold::Percentile(p) if !(0.0..=1.0).contains(&p) => {
                return Err(invalid(format!("percentile must be in [0, 1], got {}", p)));
            }
            _ => {}
        }
        let zone = &self.target_zone;
        if zone.min_time_delta > zone.max_time_delta {
            return Err(invalid(format!(
                "target zone min_time_delta {} exceeds max_time_delta {}",
                zone.min_time_delta, zone.max_time_delta
            )));
        }
        if zone.max_time_delta as u64 > MAX_TIME_DELTA {
            return Err(invalid(format!(
                "target zone max_time_delta {} exceeds key capacity {}",
                zone.max_time_delta, MAX_TIME_DELTA
            )));
        }
        if self.fan_out == 0 {
            return Err(invalid("fan_out must be > 0".to_string()));
        }
        Ok(())
    }

    /// Number of frequency bins per spectrogram frame (`window_size / 2 + 1`)
    pub fn num_bins(&self) -> usize {
        self.window_size / 2 + 1
    }

    /// Minimum number of samples a clip at `sample_rate` must contain
    pub fn min_samples(&self, sample_rate: u32) -> usize {
        let by_duration = (self.min_clip_seconds as f64 * sample_rate as f64).ceil() as usize;
        by_duration.max(self.window_size)
    }

    /// Read a configuration from a JSON file and validate it
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FingerprintError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }
}

fn invalid(msg: String) -> FingerprintError {
    FingerprintError::InvalidConfig(msg)
}
