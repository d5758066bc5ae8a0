//! Inverted fingerprint index
//!
//! Maps each fingerprint key to the set of (song, anchor offset) postings
//! that produced it. The whole table sits behind one reader/writer lock:
//! `store` holds the write lock for its entire batch, so a concurrent query
//! observes either none or all of that batch.

use super::tally::{rank_aligned, rank_votes};
use super::{AlignedMatch, Posting, SongScore};
use crate::features::fingerprint::{Fingerprint, FingerprintKey};
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// Concurrent mapping from fingerprint key to song postings
///
/// Song identifiers are opaque; any `Clone + Eq + Hash + Ord` type works.
/// Share across threads with `Arc<FingerprintIndex<S>>`.
///
/// # Example
///
/// ```
/// use stratum_fingerprint::features::fingerprint::Fingerprint;
/// use stratum_fingerprint::index::FingerprintIndex;
///
/// let fp = |f1, f2, dt, t| Fingerprint { anchor_freq: f1, target_freq: f2, time_delta: dt, anchor_time: t };
/// let index = FingerprintIndex::new();
/// index.store("A", &[fp(1, 2, 3, 0), fp(4, 5, 6, 10)]);
/// index.store("B", &[fp(4, 5, 6, 5)]);
///
/// let ranked = index.query(&[fp(1, 2, 3, 0), fp(4, 5, 6, 0)]);
/// assert_eq!(ranked[0].song_id, "A");
/// assert_eq!(ranked[0].score, 2);
/// assert_eq!(ranked[1].score, 1);
/// ```
pub struct FingerprintIndex<S> {
    table: RwLock<HashMap<FingerprintKey, HashSet<Posting<S>>>>,
}

impl<S> Default for FingerprintIndex<S> {
    fn default() -> Self {
        Self {
            table: RwLock::new(HashMap::new()),
        }
    }
}

impl<S> fmt::Debug for FingerprintIndex<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.read();
        f.debug_struct("FingerprintIndex")
            .field("keys", &table.len())
            .field("postings", &table.values().map(HashSet::len).sum::<usize>())
            .finish()
    }
}

impl<S> FingerprintIndex<S>
where
    S: Clone + Eq + Hash + Ord,
{
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a song's fingerprints
    ///
    /// Each (key, song, offset) triple is stored once; storing the same
    /// fingerprints again changes nothing.
    ///
    /// # Returns
    ///
    /// Number of postings that were not already present
    pub fn store(&self, song_id: S, fingerprints: &[Fingerprint]) -> usize {
        let mut table = self.table.write();
        let mut added = 0;

        for fp in fingerprints {
            let inserted = table.entry(fp.key()).or_default().insert(Posting {
                song_id: song_id.clone(),
                offset: fp.anchor_time,
            });
            if inserted {
                added += 1;
            }
        }

        log::debug!(
            "Stored {} new postings ({} fingerprints), index now has {} keys",
            added,
            fingerprints.len(),
            table.len()
        );

        added
    }

    /// Rank songs by the number of distinct query keys they share
    ///
    /// A song earns at most one vote per distinct key no matter how many of
    /// its stored offsets carry that key. Songs without votes are omitted.
    /// Ordering is by descending score, then ascending song id.
    pub fn query(&self, fingerprints: &[Fingerprint]) -> Vec<SongScore<S>> {
        let keys: HashSet<FingerprintKey> = fingerprints.iter().map(Fingerprint::key).collect();

        let mut votes: HashMap<S, usize> = HashMap::new();
        {
            let table = self.table.read();
            let mut voters: HashSet<&S> = HashSet::new();
            for key in &keys {
                let Some(postings) = table.get(key) else {
                    continue;
                };
                voters.clear();
                voters.extend(postings.iter().map(|p| &p.song_id));
                for song in voters.iter() {
                    *votes.entry((*song).clone()).or_default() += 1;
                }
            }
        }

        log::debug!(
            "Query: {} fingerprints, {} distinct keys, {} candidate songs",
            fingerprints.len(),
            keys.len(),
            votes.len()
        );

        rank_votes(votes)
    }

    /// Rank songs by their largest group of time-consistent matches
    ///
    /// Every (query fingerprint, stored posting) pair sharing a key votes for
    /// `(song, stored_offset - query_offset)`. A song's score is its best
    /// single offset's vote count, which discards incidental key collisions
    /// that do not line up in time.
    pub fn query_aligned(&self, fingerprints: &[Fingerprint]) -> Vec<AlignedMatch<S>> {
        let distinct: HashSet<(FingerprintKey, u32)> = fingerprints
            .iter()
            .map(|fp| (fp.key(), fp.anchor_time))
            .collect();

        let mut votes: HashMap<(S, i64), usize> = HashMap::new();
        {
            let table = self.table.read();
            for (key, query_offset) in &distinct {
                let Some(postings) = table.get(key) else {
                    continue;
                };
                for posting in postings {
                    let delta = posting.offset as i64 - *query_offset as i64;
                    *votes.entry((posting.song_id.clone(), delta)).or_default() += 1;
                }
            }
        }

        log::debug!(
            "Aligned query: {} distinct fingerprints, {} (song, offset) bins",
            distinct.len(),
            votes.len()
        );

        rank_aligned(votes)
    }

    /// Number of distinct keys
    pub fn key_count(&self) -> usize {
        self.table.read().len()
    }

    /// Total number of (key, song, offset) postings
    pub fn posting_count(&self) -> usize {
        self.table.read().values().map(HashSet::len).sum()
    }

    /// True until the first posting is stored
    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    /// Distinct songs with at least one posting, ascending
    pub fn songs(&self) -> Vec<S> {
        let table = self.table.read();
        let songs: BTreeSet<&S> = table
            .values()
            .flat_map(|postings| postings.iter().map(|p| &p.song_id))
            .collect();
        songs.into_iter().cloned().collect()
    }

    /// Number of distinct songs
    pub fn song_count(&self) -> usize {
        self.songs().len()
    }

    /// True if any posting belongs to `song_id`
    pub fn contains_song(&self, song_id: &S) -> bool {
        self.table
            .read()
            .values()
            .any(|postings| postings.iter().any(|p| &p.song_id == song_id))
    }

    /// Copy of every entry, sorted by key and posting
    pub fn entries(&self) -> Vec<(FingerprintKey, Vec<Posting<S>>)> {
        let table = self.table.read();
        let mut entries: Vec<(FingerprintKey, Vec<Posting<S>>)> = table
            .iter()
            .map(|(key, postings)| {
                let mut postings: Vec<Posting<S>> = postings.iter().cloned().collect();
                postings.sort();
                (*key, postings)
            })
            .collect();
        entries.sort_by_key(|(key, _)| *key);
        entries
    }
}

impl<S> FromIterator<(FingerprintKey, Posting<S>)> for FingerprintIndex<S>
where
    S: Clone + Eq + Hash + Ord,
{
    fn from_iter<I: IntoIterator<Item = (FingerprintKey, Posting<S>)>>(iter: I) -> Self {
        let mut table: HashMap<FingerprintKey, HashSet<Posting<S>>> = HashMap::new();
        for (key, posting) in iter {
            table.entry(key).or_default().insert(posting);
        }
        Self {
            table: RwLock::new(table),
        }
    }
}
