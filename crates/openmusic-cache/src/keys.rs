//! Cache key generators for consistent key naming.
//!
//! A key is `<namespace>:<identifier>`. Per-entity keys and collection keys
//! live in different namespaces (`song:` vs `songs:`), so deleting one never
//! touches the other.

use openmusic_core::{AlbumId, PlaylistId, SongId, UserId};
use std::fmt;

/// Identifier segment of collection-wide keys.
const ALL: &str = "all";

/// Key namespaces, one per cached read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// A single song.
    Song,
    /// The whole song collection.
    Songs,
    /// An album with its songs.
    Album,
    /// The playlists visible to one user.
    Playlists,
    /// One playlist with its songs.
    Playlist,
    /// Like count of one album.
    AlbumLikes,
}

impl Namespace {
    /// Namespace segment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Song => "song",
            Self::Songs => "songs",
            Self::Album => "album",
            Self::Playlists => "playlists",
            Self::Playlist => "playlist",
            Self::AlbumLikes => "album_likes",
        }
    }
}

/// A logical cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    namespace: Namespace,
    rendered: String,
}

impl CacheKey {
    fn new(namespace: Namespace, id: &str) -> Self {
        Self {
            namespace,
            rendered: format!("{}:{}", namespace.as_str(), id),
        }
    }

    /// `song:<id>`
    #[must_use]
    pub fn song(id: &SongId) -> Self {
        Self::new(Namespace::Song, id.as_str())
    }

    /// `songs:all`
    #[must_use]
    pub fn all_songs() -> Self {
        Self::new(Namespace::Songs, ALL)
    }

    /// `album:<id>`
    #[must_use]
    pub fn album(id: &AlbumId) -> Self {
        Self::new(Namespace::Album, id.as_str())
    }

    /// `playlists:<user>`
    #[must_use]
    pub fn playlists_of(user: &UserId) -> Self {
        Self::new(Namespace::Playlists, user.as_str())
    }

    /// `playlist:<id>`
    #[must_use]
    pub fn playlist_songs(id: &PlaylistId) -> Self {
        Self::new(Namespace::Playlist, id.as_str())
    }

    /// `album_likes:<albumId>`
    #[must_use]
    pub fn album_likes(id: &AlbumId) -> Self {
        Self::new(Namespace::AlbumLikes, id.as_str())
    }

    /// Namespace of this key.
    #[must_use]
    pub const fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Rendered key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}
