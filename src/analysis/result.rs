//! Recognition result types

use super::metadata::RecognitionMetadata;
use crate::features::fingerprint::Fingerprint;
use crate::features::peaks::Peak;
use crate::index::{SongId, SongInfo};
use serde::{Deserialize, Serialize};

/// Intermediate products of fingerprinting one clip
#[derive(Debug, Clone)]
pub struct ClipFingerprints {
    /// Spectrogram frame count
    pub num_frames: usize,
    /// Spectrogram bin count
    pub num_bins: usize,
    /// Extracted peaks in (frame, bin) order
    pub peaks: Vec<Peak>,
    /// Fingerprints formed from `peaks`
    pub fingerprints: Vec<Fingerprint>,
}

/// Candidate song in a recognition result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    /// Song identifier
    pub song_id: SongId,

    /// Song metadata, if the id is registered
    pub info: Option<SongInfo>,

    /// Match score (shared keys, or aligned matches)
    pub score: usize,

    /// Best-aligned offset of the query within the song, in frames
    /// (aligned strategy only)
    pub offset_frames: Option<i64>,

    /// `offset_frames` converted to seconds
    pub offset_seconds: Option<f32>,
}

impl RankedMatch {
    /// "Title by Artist", or the bare id for unregistered songs
    pub fn label(&self) -> String {
        match &self.info {
            Some(info) => format!("{} by {}", info.title, info.artist),
            None => format!("song #{}", self.song_id),
        }
    }
}

/// Complete recognition result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// Candidates, best first
    pub matches: Vec<RankedMatch>,

    /// Processing metadata
    pub metadata: RecognitionMetadata,
}

impl RecognitionResult {
    /// Top-ranked candidate
    pub fn best(&self) -> Option<&RankedMatch> {
        self.matches.first()
    }

    /// True when nothing in the database matched
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Ratio of the best score to the runner-up's (infinite with a single candidate)
    ///
    /// Useful as a rough confidence signal: close to 1.0 means ambiguous.
    pub fn margin(&self) -> Option<f32> {
        let best = self.matches.first()?;
        match self.matches.get(1) {
            Some(second) if second.score > 0 => Some(best.score as f32 / second.score as f32),
            _ => Some(f32::INFINITY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(id: u32, score: usize) -> RankedMatch {
        RankedMatch {
            song_id: SongId(id),
            info: None,
            score,
            offset_frames: None,
            offset_seconds: None,
        }
    }

    #[test]
    fn test_best_and_margin() {
        let result = RecognitionResult {
            matches: vec![ranked(2, 30), ranked(0, 10)],
            metadata: RecognitionMetadata::default(),
        };
        assert_eq!(result.best().unwrap().song_id, SongId(2));
        assert!((result.margin().unwrap() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_result() {
        let result = RecognitionResult {
            matches: vec![],
            metadata: RecognitionMetadata::default(),
        };
        assert!(result.is_empty());
        assert!(result.best().is_none());
        assert!(result.margin().is_none());
    }

    #[test]
    fn test_label() {
        let mut m = ranked(4, 1);
        assert_eq!(m.label(), "song #4");
        m.info = Some(SongInfo {
            title: "Fly Me to the Moon".to_string(),
            artist: "Frank Sinatra".to_string(),
        });
        assert_eq!(m.label(), "Fly Me to the Moon by Frank Sinatra");
    }
}
