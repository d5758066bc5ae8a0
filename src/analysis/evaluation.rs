//! Recognition accuracy evaluation
//!
//! Carves random contiguous clips out of a known recording and checks how
//! often the recognizer ranks the right song first.

use super::metadata::MatchStrategy;
use super::recognizer::Recognizer;
use crate::error::FingerprintError;
use crate::index::SongId;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Cut `n` random clips of `seconds` each from `samples`
///
/// Clip starts are drawn uniformly from every position that leaves room for
/// a full clip.
///
/// # Errors
///
/// Returns `InvalidInput` if the clip length is zero or longer than the
/// recording.
///
/// # Example
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use stratum_fingerprint::analysis::evaluation::random_clips;
///
/// let samples: Vec<f32> = (0..60_000).map(|i| i as f32).collect();
/// let mut rng = StdRng::seed_from_u64(7);
/// let clips = random_clips(&samples, 1000, 5, 10.0, &mut rng)?;
/// assert_eq!(clips.len(), 5);
/// assert!(clips.iter().all(|c| c.len() == 10_000));
/// # Ok::<(), stratum_fingerprint::FingerprintError>(())
/// ```
pub fn random_clips<R: Rng>(
    samples: &[f32],
    sample_rate: u32,
    n: usize,
    seconds: f32,
    rng: &mut R,
) -> Result<Vec<Vec<f32>>, FingerprintError> {
    let clip_len = (seconds as f64 * sample_rate as f64) as usize;
    if clip_len == 0 {
        return Err(FingerprintError::InvalidInput(format!(
            "Clip length must be > 0 samples ({} s at {} Hz)",
            seconds, sample_rate
        )));
    }
    if clip_len > samples.len() {
        return Err(FingerprintError::InvalidInput(format!(
            "Clip of {} samples does not fit in a recording of {}",
            clip_len,
            samples.len()
        )));
    }

    let latest_start = samples.len() - clip_len;
    Ok((0..n)
        .map(|_| {
            let start = rng.random_range(0..=latest_start);
            samples[start..start + clip_len].to_vec()
        })
        .collect())
}

/// Outcome of an evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Song every clip was cut from
    pub expected: SongId,
    /// Number of clips evaluated
    pub clips: usize,
    /// Clips whose best match was `expected`
    pub hits: usize,
    /// Clips with no match at all
    pub no_match: usize,
    /// Per-clip best song (None when nothing matched)
    pub predictions: Vec<Option<SongId>>,
}

impl EvaluationReport {
    /// Fraction of clips identified correctly (0.0 when no clips)
    pub fn accuracy(&self) -> f32 {
        if self.clips == 0 {
            return 0.0;
        }
        self.hits as f32 / self.clips as f32
    }
}

/// Identify every clip and tally hits against `expected`
///
/// # Errors
///
/// Propagates the first clip that cannot be processed (e.g. too short).
pub fn evaluate(
    recognizer: &Recognizer,
    expected: SongId,
    clips: &[Vec<f32>],
    sample_rate: u32,
    strategy: MatchStrategy,
) -> Result<EvaluationReport, FingerprintError> {
    let mut predictions = Vec::with_capacity(clips.len());
    for clip in clips {
        let result = recognizer.identify_with(clip, sample_rate, strategy)?;
        predictions.push(result.best().map(|m| m.song_id));
    }

    let hits = predictions.iter().filter(|p| **p == Some(expected)).count();
    let no_match = predictions.iter().filter(|p| p.is_none()).count();

    log::info!(
        "Evaluated {} clips of song {}: {} hits, {} without match",
        clips.len(),
        expected,
        hits,
        no_match
    );

    Ok(EvaluationReport {
        expected,
        clips: clips.len(),
        hits,
        no_match,
        predictions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_clips_are_contiguous_slices() {
        let samples: Vec<f32> = (0..5000).map(|i| i as f32).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let clips = random_clips(&samples, 100, 20, 2.5, &mut rng).unwrap();
        assert_eq!(clips.len(), 20);
        for clip in &clips {
            assert_eq!(clip.len(), 250);
            for w in clip.windows(2) {
                assert_eq!(w[1] - w[0], 1.0);
            }
            assert!(*clip.last().unwrap() < 5000.0);
        }
    }

    #[test]
    fn test_clip_exactly_recording_length() {
        let samples = vec![0.5f32; 300];
        let mut rng = StdRng::seed_from_u64(1);
        let clips = random_clips(&samples, 100, 3, 3.0, &mut rng).unwrap();
        assert!(clips.iter().all(|c| c.len() == 300));
    }

    #[test]
    fn test_clip_too_long_or_empty() {
        let samples = vec![0.0f32; 100];
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_clips(&samples, 100, 1, 2.0, &mut rng).is_err());
        assert!(random_clips(&samples, 100, 1, 0.0, &mut rng).is_err());
    }

    #[test]
    fn test_accuracy() {
        let report = EvaluationReport {
            expected: SongId(1),
            clips: 4,
            hits: 3,
            no_match: 0,
            predictions: vec![Some(SongId(1)), Some(SongId(1)), Some(SongId(0)), Some(SongId(1))],
        };
        assert!((report.accuracy() - 0.75).abs() < 1e-6);
    }
}
