//! Song identifiers and metadata

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Sequential song identifier handed out by a `SongCatalog`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(pub u32);

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Song metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongInfo {
    /// Song title
    pub title: String,
    /// Performing artist
    pub artist: String,
}

/// Registry of known songs, indexed by `SongId`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongCatalog {
    songs: Vec<SongInfo>,
}

impl SongCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a song and return its new id
    pub fn register(&mut self, title: impl Into<String>, artist: impl Into<String>) -> SongId {
        let id = SongId(self.songs.len() as u32);
        self.songs.push(SongInfo {
            title: title.into(),
            artist: artist.into(),
        });
        id
    }

    /// Metadata for `id`, if registered
    pub fn get(&self, id: SongId) -> Option<&SongInfo> {
        self.songs.get(id.0 as usize)
    }

    /// Number of registered songs
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// True if no songs are registered
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Registered songs in id order
    pub fn iter(&self) -> impl Iterator<Item = (SongId, &SongInfo)> {
        self.songs
            .iter()
            .enumerate()
            .map(|(i, info)| (SongId(i as u32), info))
    }

    /// Distinct artists, sorted
    pub fn artists(&self) -> BTreeSet<&str> {
        self.songs.iter().map(|s| s.artist.as_str()).collect()
    }
}

impl fmt::Display for SongCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let artists = self.artists();
        writeln!(f, "Total songs in the database:    {}", self.len())?;
        writeln!(f, "Unique artists in the database: {}", artists.len())?;
        writeln!(f)?;
        writeln!(f, "Songs:")?;
        for (id, info) in self.iter() {
            writeln!(f, "\tID: {:>4} - {:>25} by {:>25}", id, info.title, info.artist)?;
        }
        writeln!(f)?;
        writeln!(f, "Artists:")?;
        for artist in artists {
            writeln!(f, "\t{}", artist)?;
        }
        Ok(())
    }
}
