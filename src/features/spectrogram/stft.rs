//! Short-time Fourier transform magnitude spectrogram
//!
//! # Algorithm
//!
//! 1. Validate configuration and clip length
//! 2. Slice the clip into `window_size` frames advanced by `hop_size` (full frames only)
//! 3. Multiply each frame by the configured window
//! 4. FFT each frame and keep the `window_size / 2 + 1` one-sided magnitudes
//! 5. Optionally apply log scaling
//!
//! Frames are transformed in parallel; output order and values do not depend
//! on scheduling.

use super::window::window_coefficients;
use super::Spectrogram;
use crate::config::{FingerprintConfig, MagnitudeScale};
use crate::error::FingerprintError;
use rayon::prelude::*;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Generate a magnitude spectrogram
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `config` - Fingerprinting configuration (window, hop, scaling, minimum duration)
///
/// # Errors
///
/// * `InsufficientSamples` if the clip is shorter than `config.min_samples(sample_rate)`
/// * `InvalidConfig` if the configuration fails validation
/// * `InvalidInput` if the sample rate is zero or a sample is not finite
///
/// # Example
///
/// ```
/// use stratum_fingerprint::{generate_spectrogram, FingerprintConfig};
///
/// let config = FingerprintConfig { window_size: 256, hop_size: 128, ..Default::default() };
/// let samples = vec![0.0f32; 1024];
/// let spec = generate_spectrogram(&samples, 8000, &config)?;
/// assert_eq!(spec.num_frames(), 7);
/// assert_eq!(spec.num_bins(), 129);
/// # Ok::<(), stratum_fingerprint::FingerprintError>(())
/// ```
pub fn generate_spectrogram(
    samples: &[f32],
    sample_rate: u32,
    config: &FingerprintConfig,
) -> Result<Spectrogram, FingerprintError> {
    config.validate()?;

    if sample_rate == 0 {
        return Err(FingerprintError::InvalidInput(
            "Sample rate must be > 0".to_string(),
        ));
    }

    let required = config.min_samples(sample_rate);
    if samples.len() < required {
        return Err(FingerprintError::InsufficientSamples {
            got: samples.len(),
            required,
        });
    }

    if let Some(pos) = samples.iter().position(|s| !s.is_finite()) {
        return Err(FingerprintError::InvalidInput(format!(
            "Sample {} is not finite",
            pos
        )));
    }

    let window_size = config.window_size;
    let hop_size = config.hop_size;
    let num_bins = config.num_bins();
    let num_frames = (samples.len() - window_size) / hop_size + 1;

    log::debug!(
        "Generating spectrogram: {} samples at {} Hz, window={}, hop={}, {} frames x {} bins",
        samples.len(),
        sample_rate,
        window_size,
        hop_size,
        num_frames,
        num_bins
    );

    let window = window_coefficients(config.window_function, window_size);
    let fft = FftPlanner::<f32>::new().plan_fft_forward(window_size);
    let scale = config.magnitude_scale;

    let mut data = vec![0.0f32; num_frames * num_bins];
    data.par_chunks_mut(num_bins)
        .enumerate()
        .for_each(|(frame_idx, out)| {
            let start = frame_idx * hop_size;
            let mut buffer: Vec<Complex<f32>> = samples[start..start + window_size]
                .iter()
                .zip(window.iter())
                .map(|(&s, &w)| Complex { re: s * w, im: 0.0 })
                .collect();

            fft.process(&mut buffer);

            for (dst, c) in out.iter_mut().zip(buffer.iter()) {
                *dst = scale_magnitude(c.norm(), scale);
            }
        });

    Ok(Spectrogram::from_parts(
        data,
        num_frames,
        num_bins,
        sample_rate,
        window_size,
        hop_size,
    ))
}

#[inline]
fn scale_magnitude(magnitude: f32, scale: MagnitudeScale) -> f32 {
    match scale {
        MagnitudeScale::Linear => magnitude,
        MagnitudeScale::Log { floor } => (magnitude.max(floor) / floor).ln(),
    }
}
