//! Target-zone pairing
//!
//! # Algorithm
//!
//! For each peak in (frame, bin) order, walk forward through the later
//! peaks. Stop once a target is more than `max_time_delta` frames away
//! (peaks are time-ordered, so nothing further can qualify) or once
//! `fan_out` targets have been accepted. Targets closer than
//! `min_time_delta` or further than `max_freq_delta` bins are skipped.
//!
//! At most `peaks.len() * fan_out` fingerprints are produced.

use super::Fingerprint;
use crate::config::TargetZone;
use crate::features::peaks::Peak;
use std::borrow::Cow;

/// Form fingerprints from time-ordered peaks
///
/// Unordered input is sorted first; the result is identical for any
/// permutation of the same peak set.
///
/// # Example
///
/// ```
/// use stratum_fingerprint::config::TargetZone;
/// use stratum_fingerprint::features::fingerprint::form_fingerprints;
/// use stratum_fingerprint::features::peaks::Peak;
///
/// let peaks = vec![Peak::new(0, 10), Peak::new(2, 30), Peak::new(5, 12)];
/// let zone = TargetZone { min_time_delta: 0, max_time_delta: 4, max_freq_delta: None };
/// let fps = form_fingerprints(&peaks, zone, 2);
/// // (0,10)->(2,30), (2,30)->(5,12); (0,10)->(5,12) is outside the zone
/// assert_eq!(fps.len(), 2);
/// assert_eq!(fps[0].time_delta, 2);
/// ```
pub fn form_fingerprints(peaks: &[Peak], zone: TargetZone, fan_out: usize) -> Vec<Fingerprint> {
    let peaks: Cow<'_, [Peak]> = if peaks.windows(2).all(|w| w[0] <= w[1]) {
        Cow::Borrowed(peaks)
    } else {
        let mut sorted = peaks.to_vec();
        sorted.sort_unstable();
        Cow::Owned(sorted)
    };

    let mut fingerprints = Vec::with_capacity(peaks.len() * fan_out.min(8));

    for (i, anchor) in peaks.iter().enumerate() {
        let mut paired = 0;
        for target in &peaks[i + 1..] {
            if paired >= fan_out {
                break;
            }

            let dt = target.frame - anchor.frame;
            if dt > zone.max_time_delta {
                break;
            }
            if dt < zone.min_time_delta {
                continue;
            }
            if let Some(max_df) = zone.max_freq_delta {
                if anchor.bin.abs_diff(target.bin) > max_df {
                    continue;
                }
            }

            fingerprints.push(Fingerprint {
                anchor_freq: anchor.bin as u32,
                target_freq: target.bin as u32,
                time_delta: dt as u32,
                anchor_time: anchor.frame as u32,
            });
            paired += 1;
        }
    }

    log::debug!(
        "Formed {} fingerprints from {} peaks (fan-out {})",
        fingerprints.len(),
        peaks.len(),
        fan_out
    );

    fingerprints
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(min_dt: usize, max_dt: usize, max_df: Option<usize>) -> TargetZone {
        TargetZone {
            min_time_delta: min_dt,
            max_time_delta: max_dt,
            max_freq_delta: max_df,
        }
    }

    fn dense_peaks(n: usize) -> Vec<Peak> {
        (0..n).map(|i| Peak::new(i / 3, (i * 7) % 50)).collect()
    }

    #[test]
    fn test_fan_out_bound() {
        let peaks = dense_peaks(90);
        for fan_out in [1, 3, 5, 15] {
            let fps = form_fingerprints(&peaks, zone(0, 1000, None), fan_out);
            assert!(fps.len() <= peaks.len() * fan_out);
        }
        // With an unbounded zone every anchor except the tail gets a full fan
        let fps = form_fingerprints(&peaks, zone(0, 1000, None), 5);
        assert_eq!(fps.len(), (90 - 5) * 5 + (4 + 3 + 2 + 1));
    }

    #[test]
    fn test_time_delta_bounds() {
        let peaks = dense_peaks(60);
        let fps = form_fingerprints(&peaks, zone(1, 3, None), 10);
        assert!(!fps.is_empty());
        assert!(fps.iter().all(|f| f.time_delta >= 1 && f.time_delta <= 3));
    }

    #[test]
    fn test_frequency_delta_bound() {
        let peaks = vec![
            Peak::new(0, 100),
            Peak::new(1, 105),
            Peak::new(2, 300),
            Peak::new(3, 96),
        ];
        let fps = form_fingerprints(&peaks, zone(0, 10, Some(10)), 10);
        let pairs: Vec<(u32, u32)> = fps.iter().map(|f| (f.anchor_freq, f.target_freq)).collect();
        assert_eq!(pairs, vec![(100, 105), (100, 96), (105, 96)]);
    }

    #[test]
    fn test_anchor_time_and_key() {
        let peaks = vec![Peak::new(7, 40), Peak::new(9, 55)];
        let fps = form_fingerprints(&peaks, zone(0, 10, None), 3);
        assert_eq!(fps.len(), 1);
        assert_eq!(fps[0].anchor_time, 7);
        assert_eq!(fps[0].key().parts(), (40, 55, 2));
    }

    #[test]
    fn test_same_frame_pairs_have_zero_delta() {
        let peaks = vec![Peak::new(4, 10), Peak::new(4, 20)];
        let fps = form_fingerprints(&peaks, zone(0, 10, None), 3);
        assert_eq!(fps.len(), 1);
        assert_eq!(fps[0].time_delta, 0);

        let fps = form_fingerprints(&peaks, zone(1, 10, None), 3);
        assert!(fps.is_empty());
    }

    #[test]
    fn test_unordered_input_is_sorted() {
        let peaks = dense_peaks(30);
        let mut shuffled = peaks.clone();
        shuffled.reverse();
        assert_eq!(
            form_fingerprints(&peaks, zone(0, 4, None), 4),
            form_fingerprints(&shuffled, zone(0, 4, None), 4)
        );
    }

    #[test]
    fn test_empty_and_single() {
        assert!(form_fingerprints(&[], zone(0, 10, None), 5).is_empty());
        assert!(form_fingerprints(&[Peak::new(0, 1)], zone(0, 10, None), 5).is_empty());
    }
}
