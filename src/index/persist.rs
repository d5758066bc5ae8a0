//! JSON snapshots of a fingerprint database
//!
//! A snapshot bundles the index postings with the catalog and the
//! configuration that produced them, so a reloaded database keeps
//! fingerprinting queries the same way it fingerprinted its songs.

use super::catalog::{SongCatalog, SongId};
use super::{FingerprintIndex, Posting};
use crate::config::FingerprintConfig;
use crate::error::FingerprintError;
use crate::features::fingerprint::FingerprintKey;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Snapshot format version written by this crate
pub const SNAPSHOT_VERSION: u32 = 1;

/// All postings of one key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Fingerprint key
    pub key: FingerprintKey,
    /// Postings for the key, sorted
    pub postings: Vec<Posting<SongId>>,
}

/// Serializable image of a database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    /// Format version
    pub version: u32,
    /// Configuration the postings were produced with
    pub config: FingerprintConfig,
    /// Song metadata
    pub catalog: SongCatalog,
    /// Index entries sorted by key
    pub entries: Vec<SnapshotEntry>,
}

impl IndexSnapshot {
    /// Capture the current contents of an index
    pub fn capture(
        config: &FingerprintConfig,
        catalog: &SongCatalog,
        index: &FingerprintIndex<SongId>,
    ) -> Self {
        let entries = index
            .entries()
            .into_iter()
            .map(|(key, postings)| SnapshotEntry { key, postings })
            .collect();
        Self {
            version: SNAPSHOT_VERSION,
            config: config.clone(),
            catalog: catalog.clone(),
            entries,
        }
    }

    /// Rebuild the configuration, catalog and index
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an unknown snapshot version and
    /// `InvalidConfig` if the stored configuration no longer validates.
    pub fn into_parts(
        self,
    ) -> Result<(FingerprintConfig, SongCatalog, FingerprintIndex<SongId>), FingerprintError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(FingerprintError::InvalidInput(format!(
                "Unsupported snapshot version {} (expected {})",
                self.version, SNAPSHOT_VERSION
            )));
        }
        self.config.validate()?;

        let index = self
            .entries
            .into_iter()
            .flat_map(|entry| {
                let key = entry.key;
                entry.postings.into_iter().map(move |p| (key, p))
            })
            .collect();

        Ok((self.config, self.catalog, index))
    }

    /// Serialize as JSON into `writer`
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), FingerprintError> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Deserialize from JSON in `reader`
    pub fn read_from<R: Read>(reader: R) -> Result<Self, FingerprintError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Write the snapshot to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FingerprintError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        log::info!(
            "Saved snapshot with {} keys and {} songs to {}",
            self.entries.len(),
            self.catalog.len(),
            path.display()
        );
        Ok(())
    }

    /// Read a snapshot from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FingerprintError> {
        let path = path.as_ref();
        let snapshot = Self::read_from(BufReader::new(File::open(path)?))?;
        log::info!(
            "Loaded snapshot with {} keys and {} songs from {}",
            snapshot.entries.len(),
            snapshot.catalog.len(),
            path.display()
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::fingerprint::Fingerprint;

    fn sample_database() -> (FingerprintConfig, SongCatalog, FingerprintIndex<SongId>) {
        let config = FingerprintConfig::default();
        let mut catalog = SongCatalog::new();
        let index = FingerprintIndex::new();

        for (title, base) in [("First", 10u32), ("Second", 40u32)] {
            let id = catalog.register(title, "Tester");
            let fps: Vec<Fingerprint> = (0..20)
                .map(|i| Fingerprint {
                    anchor_freq: base + i,
                    target_freq: base + 2 * i,
                    time_delta: i % 4,
                    anchor_time: i * 3,
                })
                .collect();
            index.store(id, &fps);
        }
        (config, catalog, index)
    }

    #[test]
    fn test_round_trip_through_json() {
        let (config, catalog, index) = sample_database();
        let snapshot = IndexSnapshot::capture(&config, &catalog, &index);

        let mut buffer = Vec::new();
        snapshot.write_to(&mut buffer).unwrap();
        let restored = IndexSnapshot::read_from(buffer.as_slice()).unwrap();
        assert_eq!(restored, snapshot);

        let (config2, catalog2, index2) = restored.into_parts().unwrap();
        assert_eq!(config2, config);
        assert_eq!(catalog2, catalog);
        assert_eq!(index2.entries(), index.entries());
    }

    #[test]
    fn test_save_and_load_file() {
        let (config, catalog, index) = sample_database();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");

        IndexSnapshot::capture(&config, &catalog, &index)
            .save(&path)
            .unwrap();
        let (_, catalog2, index2) = IndexSnapshot::load(&path).unwrap().into_parts().unwrap();
        assert_eq!(catalog2.len(), 2);
        assert_eq!(index2.posting_count(), index.posting_count());
    }

    #[test]
    fn test_rejects_unknown_version() {
        let (config, catalog, index) = sample_database();
        let mut snapshot = IndexSnapshot::capture(&config, &catalog, &index);
        snapshot.version = 99;
        assert!(matches!(
            snapshot.into_parts(),
            Err(FingerprintError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            IndexSnapshot::load("/definitely/not/here.json"),
            Err(FingerprintError::Io(_))
        ));
    }
}
