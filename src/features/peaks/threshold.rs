//! Amplitude cutoff selection

use crate::config::AmplitudeThreshold;
use crate::features::spectrogram::Spectrogram;

/// Resolve the amplitude a peak must strictly exceed
///
/// `Percentile(p)` picks the k-th smallest magnitude with `k = round(len * p)`,
/// clamped to the last index. An empty spectrogram resolves to `+inf`.
pub fn resolve_cutoff(spectrogram: &Spectrogram, threshold: AmplitudeThreshold) -> f32 {
    match threshold {
        AmplitudeThreshold::Absolute(value) => value,
        AmplitudeThreshold::Percentile(p) => percentile(spectrogram.values(), p),
    }
}

/// k-th order statistic at fraction `p` of `values`
pub fn percentile(values: &[f32], p: f32) -> f32 {
    if values.is_empty() {
        return f32::INFINITY;
    }

    let idx = ((values.len() as f64 * p.clamp(0.0, 1.0) as f64).round() as usize)
        .min(values.len() - 1);
    let mut scratch = values.to_vec();
    let (_, kth, _) = scratch.select_nth_unstable_by(idx, f32::total_cmp);
    *kth
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_selects_order_statistic() {
        let values: Vec<f32> = (0..100).rev().map(|v| v as f32).collect();
        assert_eq!(percentile(&values, 0.75), 75.0);
        assert_eq!(percentile(&values, 0.0), 0.0);
        // round(100 * 1.0) clamps to the last index
        assert_eq!(percentile(&values, 1.0), 99.0);
    }

    #[test]
    fn test_percentile_empty() {
        assert_eq!(percentile(&[], 0.5), f32::INFINITY);
    }

    #[test]
    fn test_absolute_passthrough() {
        let spec = Spectrogram::from_frames(&[vec![1.0, 2.0]], 8000, 1);
        assert_eq!(resolve_cutoff(&spec, AmplitudeThreshold::Absolute(0.5)), 0.5);
        assert_eq!(resolve_cutoff(&spec, AmplitudeThreshold::Percentile(0.0)), 1.0);
    }
}
