//! Window functions for spectral leakage reduction
//!
//! All windows are the symmetric variants (denominator `n - 1`).

use crate::config::WindowFunction;
use std::f32::consts::PI;

/// Compute window coefficients of length `size`
///
/// # Example
///
/// ```
/// use stratum_fingerprint::config::WindowFunction;
/// use stratum_fingerprint::features::spectrogram::window::window_coefficients;
///
/// let w = window_coefficients(WindowFunction::Hann, 5);
/// assert_eq!(w.len(), 5);
/// assert!(w[0].abs() < 1e-6);
/// assert!((w[2] - 1.0).abs() < 1e-6);
/// ```
pub fn window_coefficients(function: WindowFunction, size: usize) -> Vec<f32> {
    if size == 0 {
        return vec![];
    }
    if size == 1 {
        return vec![1.0];
    }

    let denom = (size - 1) as f32;
    (0..size)
        .map(|i| {
            let phase = 2.0 * PI * i as f32 / denom;
            match function {
                WindowFunction::Hann => 0.5 * (1.0 - phase.cos()),
                WindowFunction::Hamming => 0.54 - 0.46 * phase.cos(),
                WindowFunction::Blackman => {
                    0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos()
                }
                WindowFunction::Rectangular => 1.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_endpoints_and_symmetry() {
        let w = window_coefficients(WindowFunction::Hann, 1024);
        assert!(w[0].abs() < 1e-6);
        assert!(w[1023].abs() < 1e-6);
        for i in 0..512 {
            assert!((w[i] - w[1023 - i]).abs() < 1e-5);
        }
    }

    #[test]
    fn test_hamming_floor() {
        let w = window_coefficients(WindowFunction::Hamming, 64);
        assert!((w[0] - 0.08).abs() < 1e-5);
        assert!(w.iter().all(|&x| x > 0.0 && x <= 1.0 + 1e-6));
    }

    #[test]
    fn test_blackman_bounds() {
        let w = window_coefficients(WindowFunction::Blackman, 101);
        assert!(w[0].abs() < 1e-5);
        assert!((w[50] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_rectangular_and_degenerate_sizes() {
        assert!(window_coefficients(WindowFunction::Rectangular, 8)
            .iter()
            .all(|&x| x == 1.0));
        assert!(window_coefficients(WindowFunction::Hann, 0).is_empty());
        assert_eq!(window_coefficients(WindowFunction::Hann, 1), vec![1.0]);
    }
}
