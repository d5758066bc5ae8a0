//! 2-D local maximum search
//!
//! A bin is a peak iff its magnitude exceeds the cutoff and no bin in its
//! neighborhood beats it. Equal magnitudes are resolved by coordinate: the
//! bin with the lower frame (then lower bin) wins, so exactly one bin of a
//! flat plateau survives.
//!
//! # Example
//!
//! ```
//! use stratum_fingerprint::config::{AmplitudeThreshold, Neighborhood, NeighborhoodShape};
//! use stratum_fingerprint::features::peaks::{extract_peaks, Peak};
//! use stratum_fingerprint::features::spectrogram::Spectrogram;
//!
//! let spec = Spectrogram::from_frames(
//!     &[vec![0.0, 0.1, 0.0], vec![0.2, 0.9, 0.1], vec![0.0, 0.3, 0.0]],
//!     8000,
//!     2,
//! );
//! let nbhd = Neighborhood { shape: NeighborhoodShape::Square, radius: 1 };
//! let peaks = extract_peaks(&spec, nbhd, AmplitudeThreshold::Absolute(0.5));
//! assert_eq!(peaks, vec![Peak::new(1, 1)]);
//! ```

use super::neighborhood::neighborhood_offsets;
use super::threshold::resolve_cutoff;
use super::Peak;
use crate::config::{AmplitudeThreshold, Neighborhood};
use crate::features::spectrogram::Spectrogram;
use rayon::prelude::*;

/// Extract peaks in (frame, bin) ascending order
///
/// Never fails: a spectrogram with nothing above the cutoff yields an empty
/// vector.
pub fn extract_peaks(
    spectrogram: &Spectrogram,
    neighborhood: Neighborhood,
    threshold: AmplitudeThreshold,
) -> Vec<Peak> {
    if spectrogram.is_empty() {
        return Vec::new();
    }

    let cutoff = resolve_cutoff(spectrogram, threshold);
    let offsets = neighborhood_offsets(neighborhood);

    log::debug!(
        "Extracting peaks: {} frames x {} bins, cutoff={:.4}, {} neighbors",
        spectrogram.num_frames(),
        spectrogram.num_bins(),
        cutoff,
        offsets.len()
    );

    let peaks: Vec<Peak> = (0..spectrogram.num_frames())
        .into_par_iter()
        .flat_map_iter(|frame| {
            let offsets = &offsets;
            (0..spectrogram.num_bins())
                .filter(move |&bin| is_peak(spectrogram, frame, bin, cutoff, offsets))
                .map(move |bin| Peak { frame, bin })
        })
        .collect();

    if peaks.is_empty() {
        log::warn!("No spectral peaks above cutoff {:.4}", cutoff);
    } else {
        log::debug!("Found {} peaks", peaks.len());
    }

    peaks
}

fn is_peak(
    spectrogram: &Spectrogram,
    frame: usize,
    bin: usize,
    cutoff: f32,
    offsets: &[(isize, isize)],
) -> bool {
    let value = spectrogram.get(frame, bin);
    if value <= cutoff {
        return false;
    }

    let frames = spectrogram.num_frames() as isize;
    let bins = spectrogram.num_bins() as isize;

    for &(dt, df) in offsets {
        let t = frame as isize + dt;
        let f = bin as isize + df;
        if t < 0 || t >= frames || f < 0 || f >= bins {
            continue;
        }

        let other = spectrogram.get(t as usize, f as usize);
        if other > value {
            return false;
        }
        // Plateau: the earlier coordinate keeps the peak
        if other == value && (dt < 0 || (dt == 0 && df < 0)) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NeighborhoodShape;

    fn square(radius: usize) -> Neighborhood {
        Neighborhood {
            shape: NeighborhoodShape::Square,
            radius,
        }
    }

    fn diamond(radius: usize) -> Neighborhood {
        Neighborhood {
            shape: NeighborhoodShape::Diamond,
            radius,
        }
    }

    #[test]
    fn test_single_peak() {
        let spec = Spectrogram::from_frames(
            &[
                vec![0.0, 0.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.2, 0.0],
                vec![0.0, 0.1, 0.0, 0.0],
            ],
            8000,
            2,
        );
        let peaks = extract_peaks(&spec, square(1), AmplitudeThreshold::Absolute(0.5));
        assert_eq!(peaks, vec![Peak::new(1, 1)]);
    }

    #[test]
    fn test_edges_count_as_peaks() {
        let spec = Spectrogram::from_frames(&[vec![0.9, 0.1], vec![0.1, 0.8]], 8000, 2);
        let peaks = extract_peaks(&spec, diamond(1), AmplitudeThreshold::Absolute(0.5));
        assert_eq!(peaks, vec![Peak::new(0, 0), Peak::new(1, 1)]);
    }

    #[test]
    fn test_plateau_yields_one_peak() {
        let spec = Spectrogram::from_frames(
            &[
                vec![0.0, 0.0, 0.0, 0.0],
                vec![0.0, 1.0, 1.0, 0.0],
                vec![0.0, 1.0, 1.0, 0.0],
                vec![0.0, 0.0, 0.0, 0.0],
            ],
            8000,
            2,
        );
        let peaks = extract_peaks(&spec, square(1), AmplitudeThreshold::Absolute(0.5));
        assert_eq!(peaks, vec![Peak::new(1, 1)]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let spec = Spectrogram::from_frames(&[vec![0.0, 0.5, 0.0]], 8000, 2);
        assert!(extract_peaks(&spec, square(1), AmplitudeThreshold::Absolute(0.5)).is_empty());
        assert_eq!(
            extract_peaks(&spec, square(1), AmplitudeThreshold::Absolute(0.49)),
            vec![Peak::new(0, 1)]
        );
    }

    #[test]
    fn test_silence_yields_no_peaks() {
        let spec = Spectrogram::from_frames(&vec![vec![0.0; 16]; 8], 8000, 2);
        assert!(extract_peaks(&spec, diamond(2), AmplitudeThreshold::Percentile(0.75)).is_empty());
    }

    #[test]
    fn test_larger_neighborhood_fewer_peaks() {
        // Ripple with local maxima every 3 bins
        let frames: Vec<Vec<f32>> = (0..12)
            .map(|t| {
                (0..48)
                    .map(|f| 1.0 + ((f + t) % 3) as f32 * 0.5 + (f as f32 * 0.37 + t as f32 * 1.3).sin() * 0.1)
                    .collect()
            })
            .collect();
        let spec = Spectrogram::from_frames(&frames, 8000, 2);
        let small = extract_peaks(&spec, diamond(1), AmplitudeThreshold::Absolute(0.0));
        let large = extract_peaks(&spec, diamond(5), AmplitudeThreshold::Absolute(0.0));
        assert!(!large.is_empty());
        assert!(large.len() < small.len());
    }

    #[test]
    fn test_peaks_dominate_neighborhood_and_are_ordered() {
        let frames: Vec<Vec<f32>> = (0..20)
            .map(|t| {
                (0..32)
                    .map(|f| ((t * 7 + f * 13) % 17) as f32 + ((t * f) % 5) as f32 * 0.25)
                    .collect()
            })
            .collect();
        let spec = Spectrogram::from_frames(&frames, 8000, 2);
        let nbhd = diamond(2);
        let cutoff = 3.0;
        let peaks = extract_peaks(&spec, nbhd, AmplitudeThreshold::Absolute(cutoff));
        assert!(!peaks.is_empty());

        for w in peaks.windows(2) {
            assert!(w[0] < w[1], "peaks must be strictly ordered");
        }

        let offsets = neighborhood_offsets(nbhd);
        for p in &peaks {
            let v = spec.get(p.frame, p.bin);
            assert!(v > cutoff);
            for &(dt, df) in &offsets {
                let t = p.frame as isize + dt;
                let f = p.bin as isize + df;
                if t >= 0 && t < 20 && f >= 0 && f < 32 {
                    assert!(v >= spec.get(t as usize, f as usize));
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let frames: Vec<Vec<f32>> = (0..30)
            .map(|t| (0..40).map(|f| ((t * 31 + f * 17) % 23) as f32).collect())
            .collect();
        let spec = Spectrogram::from_frames(&frames, 8000, 2);
        let a = extract_peaks(&spec, diamond(3), AmplitudeThreshold::Percentile(0.5));
        let b = extract_peaks(&spec, diamond(3), AmplitudeThreshold::Percentile(0.5));
        assert_eq!(a, b);
    }
}
