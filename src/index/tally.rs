//! Vote ranking
//!
//! Turns per-query vote tallies into deterministic ranked lists.

use super::{AlignedMatch, SongScore};
use std::collections::HashMap;
use std::hash::Hash;

/// Sort plain vote counts: descending score, ascending song id
pub(crate) fn rank_votes<S: Ord>(votes: HashMap<S, usize>) -> Vec<SongScore<S>> {
    let mut ranked: Vec<SongScore<S>> = votes
        .into_iter()
        .filter(|(_, score)| *score > 0)
        .map(|(song_id, score)| SongScore { song_id, score })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.song_id.cmp(&b.song_id)));
    ranked
}

/// Reduce (song, offset) votes to each song's best offset, then rank
///
/// Offset ties within a song resolve to the smallest offset.
pub(crate) fn rank_aligned<S: Ord + Hash + Eq>(votes: HashMap<(S, i64), usize>) -> Vec<AlignedMatch<S>> {
    let mut best: HashMap<S, (usize, i64)> = HashMap::new();

    for ((song_id, offset), count) in votes {
        best.entry(song_id)
            .and_modify(|(best_count, best_offset)| {
                if count > *best_count || (count == *best_count && offset < *best_offset) {
                    *best_count = count;
                    *best_offset = offset;
                }
            })
            .or_insert((count, offset));
    }

    let mut ranked: Vec<AlignedMatch<S>> = best
        .into_iter()
        .filter(|(_, (score, _))| *score > 0)
        .map(|(song_id, (score, offset))| AlignedMatch {
            song_id,
            score,
            offset,
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.song_id.cmp(&b.song_id)));
    ranked
}
