//! Invalidation policy: which cache keys each mutation makes stale.
//!
//! The table is the derived-data dependency graph of the catalog. A song
//! appears in its own entry, in the song listing, inside its album, and in
//! the song list of every playlist that contains it; a
//! playlist appears in its song list and in the listing of every user who can
//! see it. Entity and collection keys are independent (see [`crate::keys`]),
//! so every affected key is named explicitly.

use crate::keys::CacheKey;
use openmusic_core::{AlbumId, PlaylistId, SongId, UserId};

/// A committed write, described by the identifiers its invalidation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// A song was inserted.
    SongAdded {
        song_id: SongId,
        album_id: Option<AlbumId>,
    },
    /// A song was updated. `previous_album` is the album it belonged to
    /// before the update; `playlists` are the playlists listing it.
    SongEdited {
        song_id: SongId,
        previous_album: Option<AlbumId>,
        album_id: Option<AlbumId>,
        playlists: Vec<PlaylistId>,
    },
    /// A song was removed, along with its links to `playlists`.
    SongDeleted {
        song_id: SongId,
        album_id: Option<AlbumId>,
        playlists: Vec<PlaylistId>,
    },
    /// An album's own fields (name, year, cover) changed.
    AlbumChanged { album_id: AlbumId },
    /// An album was removed; its songs were detached from it.
    AlbumDeleted {
        album_id: AlbumId,
        detached_songs: Vec<SongId>,
    },
    /// A playlist was created.
    PlaylistAdded { owner: UserId },
    /// A playlist was removed together with its collaborations.
    PlaylistDeleted {
        playlist_id: PlaylistId,
        owner: UserId,
        collaborators: Vec<UserId>,
    },
    /// A song was added to or removed from a playlist.
    PlaylistSongsChanged { playlist_id: PlaylistId },
    /// A user gained or lost collaborator access to a playlist.
    CollaborationChanged { user_id: UserId },
    /// A like on an album was added or removed.
    AlbumLikesChanged { album_id: AlbumId },
}

impl Mutation {
    /// Short name used in logs and metrics labels.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SongAdded { .. } => "song_added",
            Self::SongEdited { .. } => "song_edited",
            Self::SongDeleted { .. } => "song_deleted",
            Self::AlbumChanged { .. } => "album_changed",
            Self::AlbumDeleted { .. } => "album_deleted",
            Self::PlaylistAdded { .. } => "playlist_added",
            Self::PlaylistDeleted { .. } => "playlist_deleted",
            Self::PlaylistSongsChanged { .. } => "playlist_songs_changed",
            Self::CollaborationChanged { .. } => "collaboration_changed",
            Self::AlbumLikesChanged { .. } => "album_likes_changed",
        }
    }
}

/// Static mapping from [`Mutation`] to the keys it invalidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvalidationPolicy;

impl InvalidationPolicy {
    /// Keys to delete after `mutation` commits, without duplicates.
    #[must_use]
    pub fn keys_for(mutation: &Mutation) -> Vec<CacheKey> {
        let mut keys = Vec::new();

        match mutation {
            Mutation::SongAdded { song_id, album_id } => {
                keys.push(CacheKey::song(song_id));
                keys.push(CacheKey::all_songs());
                keys.extend(album_id.iter().map(CacheKey::album));
            }
            Mutation::SongDeleted {
                song_id,
                album_id,
                playlists,
            } => {
                keys.push(CacheKey::song(song_id));
                keys.push(CacheKey::all_songs());
                keys.extend(album_id.iter().map(CacheKey::album));
                keys.extend(playlists.iter().map(CacheKey::playlist_songs));
            }
            Mutation::SongEdited {
                song_id,
                previous_album,
                album_id,
                playlists,
            } => {
                keys.push(CacheKey::song(song_id));
                keys.push(CacheKey::all_songs());
                keys.extend(previous_album.iter().map(CacheKey::album));
                keys.extend(album_id.iter().map(CacheKey::album));
                keys.extend(playlists.iter().map(CacheKey::playlist_songs));
            }
            Mutation::AlbumChanged { album_id } => {
                keys.push(CacheKey::album(album_id));
            }
            Mutation::AlbumDeleted {
                album_id,
                detached_songs,
            } => {
                keys.push(CacheKey::album(album_id));
                keys.push(CacheKey::album_likes(album_id));
                keys.extend(detached_songs.iter().map(CacheKey::song));
            }
            Mutation::PlaylistAdded { owner } => {
                keys.push(CacheKey::playlists_of(owner));
            }
            Mutation::PlaylistDeleted {
                playlist_id,
                owner,
                collaborators,
            } => {
                keys.push(CacheKey::playlists_of(owner));
                keys.push(CacheKey::playlist_songs(playlist_id));
                keys.extend(collaborators.iter().map(CacheKey::playlists_of));
            }
            Mutation::PlaylistSongsChanged { playlist_id } => {
                keys.push(CacheKey::playlist_songs(playlist_id));
            }
            Mutation::CollaborationChanged { user_id } => {
                keys.push(CacheKey::playlists_of(user_id));
            }
            Mutation::AlbumLikesChanged { album_id } => {
                keys.push(CacheKey::album_likes(album_id));
            }
        }

        dedup_in_order(keys)
    }
}

fn dedup_in_order(keys: Vec<CacheKey>) -> Vec<CacheKey> {
    let mut unique: Vec<CacheKey> = Vec::with_capacity(keys.len());
    for key in keys {
        if !unique.contains(&key) {
            unique.push(key);
        }
    }
    unique
}
