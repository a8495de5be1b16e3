//! Song entity and its projections.

use crate::{AlbumId, PlaylistId, SongId};
use serde::{Deserialize, Serialize};

/// A song with all persisted attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub performer: String,
    pub duration: Option<i32>,
    pub album_id: Option<AlbumId>,
}

/// Listing projection used by `songs:all`, album detail and playlist detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongSummary {
    pub id: SongId,
    pub title: String,
    pub performer: String,
}

impl From<&Song> for SongSummary {
    fn from(song: &Song) -> Self {
        Self {
            id: song.id.clone(),
            title: song.title.clone(),
            performer: song.performer.clone(),
        }
    }
}

/// Attributes supplied when adding or editing a song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongPayload {
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub performer: String,
    pub duration: Option<i32>,
    pub album_id: Option<AlbumId>,
}

impl SongPayload {
    /// Materializes the payload as a song with the given id.
    #[must_use]
    pub fn into_song(self, id: SongId) -> Song {
        Song {
            id,
            title: self.title,
            year: self.year,
            genre: self.genre,
            performer: self.performer,
            duration: self.duration,
            album_id: self.album_id,
        }
    }
}

/// Optional filters for listing songs.
///
/// An empty query selects the whole collection, which is cache-eligible.
/// Any filter turns the read into an uncached search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongQuery {
    pub title: Option<String>,
    pub performer: Option<String>,
}

impl SongQuery {
    /// Query selecting every song.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// True when at least one non-empty filter is present.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.title) || present(&self.performer)
    }
}

/// Identity and links of a song touched by a write.
///
/// For edits `album_id` is the album the song belonged to before the update.
/// `playlists` lists every playlist that contained the song when the write
/// ran; for deletes this is captured before the links cascade away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffectedSong {
    pub id: SongId,
    pub album_id: Option<AlbumId>,
    pub playlists: Vec<PlaylistId>,
}
