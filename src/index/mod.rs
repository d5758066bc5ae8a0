//! Fingerprint index and song bookkeeping
//!
//! - `store`: inverted index from fingerprint key to song postings
//! - `tally`: ranking of per-query votes
//! - `catalog`: song id allocation and metadata
//! - `persist`: JSON snapshots of an index with its catalog and config

pub mod catalog;
pub mod persist;
pub mod store;
mod tally;

pub use catalog::{SongCatalog, SongId, SongInfo};
pub use persist::IndexSnapshot;
pub use store::FingerprintIndex;

use serde::{Deserialize, Serialize};

/// One stored occurrence of a key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Posting<S> {
    /// Owning song
    pub song_id: S,
    /// Anchor frame within the song
    pub offset: u32,
}

/// Song ranked by plain vote count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongScore<S> {
    /// Candidate song
    pub song_id: S,
    /// Number of distinct query keys the song shares
    pub score: usize,
}

/// Song ranked by its best time-consistent match cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedMatch<S> {
    /// Candidate song
    pub song_id: S,
    /// Matches agreeing on `offset`
    pub score: usize,
    /// Stored anchor frame minus query anchor frame
    pub offset: i64,
}
