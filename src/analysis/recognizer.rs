//! Song recognizer
//!
//! Owns one configuration, one index and one catalog so that songs and
//! queries are always fingerprinted identically. All methods take `&self`;
//! share a recognizer across threads with `Arc`.

use super::metadata::{MatchStrategy, RecognitionMetadata};
use super::result::{RankedMatch, RecognitionResult};
use crate::config::FingerprintConfig;
use crate::error::FingerprintError;
use crate::extract_clip;
use crate::index::{FingerprintIndex, IndexSnapshot, SongCatalog, SongId, SongInfo};
use parking_lot::RwLock;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

/// Fingerprint database with ingestion and identification
#[derive(Debug)]
pub struct Recognizer {
    config: FingerprintConfig,
    index: FingerprintIndex<SongId>,
    catalog: RwLock<SongCatalog>,
    // 0 until the first song is ingested
    reference_rate: AtomicU32,
}

impl Recognizer {
    /// Create an empty recognizer
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `config` does not validate
    pub fn new(config: FingerprintConfig) -> Result<Self, FingerprintError> {
        config.validate()?;
        Ok(Self {
            config,
            index: FingerprintIndex::new(),
            catalog: RwLock::new(SongCatalog::new()),
            reference_rate: AtomicU32::new(0),
        })
    }

    /// Configuration used for ingestion and queries
    pub fn config(&self) -> &FingerprintConfig {
        &self.config
    }

    /// Underlying fingerprint index
    pub fn index(&self) -> &FingerprintIndex<SongId> {
        &self.index
    }

    /// Copy of the song catalog
    pub fn catalog(&self) -> SongCatalog {
        self.catalog.read().clone()
    }

    /// Metadata for a registered song
    pub fn song_info(&self, id: SongId) -> Option<SongInfo> {
        self.catalog.read().get(id).cloned()
    }

    /// Number of registered songs
    pub fn song_count(&self) -> usize {
        self.catalog.read().len()
    }

    /// Fingerprint a song and add it to the database
    ///
    /// The song is only registered once fingerprinting succeeds.
    ///
    /// # Errors
    ///
    /// Propagates spectrogram errors such as `InsufficientSamples`
    pub fn add_song(
        &self,
        title: &str,
        artist: &str,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<SongId, FingerprintError> {
        let clip = extract_clip(samples, sample_rate, &self.config)?;
        self.check_rate(sample_rate);

        let id = self.catalog.write().register(title, artist);
        let added = self.index.store(id, &clip.fingerprints);

        log::info!(
            "Stored song {} ({} by {}): {} peaks, {} fingerprints, {} new postings",
            id,
            title,
            artist,
            clip.peaks.len(),
            clip.fingerprints.len(),
            added
        );

        Ok(id)
    }

    /// Identify a clip by plain vote counting
    pub fn identify(&self, samples: &[f32], sample_rate: u32) -> Result<RecognitionResult, FingerprintError> {
        self.identify_with(samples, sample_rate, MatchStrategy::Votes)
    }

    /// Identify a clip by time-offset-consistent vote counting
    pub fn identify_aligned(
        &self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<RecognitionResult, FingerprintError> {
        self.identify_with(samples, sample_rate, MatchStrategy::Aligned)
    }

    /// Identify a clip with an explicit ranking strategy
    ///
    /// # Errors
    ///
    /// Propagates spectrogram errors; a clip without peaks is not an error
    /// and yields an empty result.
    pub fn identify_with(
        &self,
        samples: &[f32],
        sample_rate: u32,
        strategy: MatchStrategy,
    ) -> Result<RecognitionResult, FingerprintError> {
        let start_time = Instant::now();

        let clip = extract_clip(samples, sample_rate, &self.config)?;
        if let Some(reference) = self.reference_rate() {
            if reference != sample_rate {
                log::warn!(
                    "Query sample rate {} Hz differs from database rate {} Hz; matches will be unreliable",
                    sample_rate,
                    reference
                );
            }
        }

        let seconds_per_frame = self.config.hop_size as f32 / sample_rate as f32;
        let catalog = self.catalog.read();
        let matches: Vec<RankedMatch> = match strategy {
            MatchStrategy::Votes => self
                .index
                .query(&clip.fingerprints)
                .into_iter()
                .map(|m| RankedMatch {
                    song_id: m.song_id,
                    info: catalog.get(m.song_id).cloned(),
                    score: m.score,
                    offset_frames: None,
                    offset_seconds: None,
                })
                .collect(),
            MatchStrategy::Aligned => self
                .index
                .query_aligned(&clip.fingerprints)
                .into_iter()
                .map(|m| RankedMatch {
                    song_id: m.song_id,
                    info: catalog.get(m.song_id).cloned(),
                    score: m.score,
                    offset_frames: Some(m.offset),
                    offset_seconds: Some(m.offset as f32 * seconds_per_frame),
                })
                .collect(),
        };
        drop(catalog);

        let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;
        match matches.first() {
            Some(best) => log::debug!(
                "Best match {} with score {} ({} candidates, {:.1} ms)",
                best.song_id,
                best.score,
                matches.len(),
                processing_time_ms
            ),
            None => log::debug!("No match ({:.1} ms)", processing_time_ms),
        }

        Ok(RecognitionResult {
            matches,
            metadata: RecognitionMetadata {
                duration_seconds: samples.len() as f32 / sample_rate as f32,
                sample_rate,
                num_peaks: clip.peaks.len(),
                num_fingerprints: clip.fingerprints.len(),
                strategy,
                processing_time_ms,
                ..Default::default()
            },
        })
    }

    /// Capture the database as a serializable snapshot
    pub fn snapshot(&self) -> IndexSnapshot {
        IndexSnapshot::capture(&self.config, &self.catalog.read(), &self.index)
    }

    /// Rebuild a recognizer from a snapshot, adopting its configuration
    pub fn from_snapshot(snapshot: IndexSnapshot) -> Result<Self, FingerprintError> {
        let (config, catalog, index) = snapshot.into_parts()?;
        Ok(Self {
            config,
            index,
            catalog: RwLock::new(catalog),
            reference_rate: AtomicU32::new(0),
        })
    }

    /// Save the database to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FingerprintError> {
        self.snapshot().save(path)
    }

    /// Load a database from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FingerprintError> {
        Self::from_snapshot(IndexSnapshot::load(path)?)
    }

    fn reference_rate(&self) -> Option<u32> {
        match self.reference_rate.load(Ordering::Relaxed) {
            0 => None,
            rate => Some(rate),
        }
    }

    fn check_rate(&self, sample_rate: u32) {
        if let Err(existing) =
            self.reference_rate
                .compare_exchange(0, sample_rate, Ordering::Relaxed, Ordering::Relaxed)
        {
            if existing != sample_rate {
                log::warn!(
                    "Song sample rate {} Hz differs from earlier songs ({} Hz)",
                    sample_rate,
                    existing
                );
            }
        }
    }
}
