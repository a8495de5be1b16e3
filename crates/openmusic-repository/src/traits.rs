//! Repository traits.
//!
//! These are the domain interfaces the service layer depends on. Reads that
//! participate in the cache return [`Sourced`] so callers can report where the
//! value came from. Every write returns only after the cache keys it affects
//! have been invalidated.

use async_trait::async_trait;
use openmusic_core::{
    ActivityAction, ActivityId, AlbumDetail, AlbumId, AlbumPayload, CatalogResult,
    CollaborationId, Interface, LikeId, NewPlaylist, PlaylistActivities, PlaylistDetail,
    PlaylistId, PlaylistSummary, Song, SongId, SongPayload, SongQuery, SongSummary, Sourced,
    UserId,
};

/// Song repository.
#[async_trait]
pub trait SongRepository: Interface + Send + Sync {
    /// Adds a song and returns its generated id.
    async fn add_song(&self, payload: SongPayload) -> CatalogResult<SongId>;

    /// Lists songs. An unfiltered query is served from `songs:all`; a
    /// filtered one always hits the database and is never cached.
    async fn list_songs(&self, query: &SongQuery) -> CatalogResult<Sourced<Vec<SongSummary>>>;

    /// Gets a song by id.
    async fn get_song(&self, id: &SongId) -> CatalogResult<Sourced<Song>>;

    /// Replaces a song's fields.
    async fn edit_song(&self, id: &SongId, payload: SongPayload) -> CatalogResult<()>;

    /// Deletes a song.
    async fn delete_song(&self, id: &SongId) -> CatalogResult<()>;

    /// Fails with `NotFound` unless the song exists.
    async fn verify_song_exists(&self, id: &SongId) -> CatalogResult<()>;
}

/// Album repository.
#[async_trait]
pub trait AlbumRepository: Interface + Send + Sync {
    /// Adds an album and returns its generated id.
    async fn add_album(&self, payload: AlbumPayload) -> CatalogResult<AlbumId>;

    /// Gets an album together with its songs.
    async fn get_album(&self, id: &AlbumId) -> CatalogResult<Sourced<AlbumDetail>>;

    /// Replaces an album's name and year.
    async fn edit_album(&self, id: &AlbumId, payload: AlbumPayload) -> CatalogResult<()>;

    /// Deletes an album. Its songs stay, detached.
    async fn delete_album(&self, id: &AlbumId) -> CatalogResult<()>;

    /// Stores the URL of an uploaded cover.
    async fn update_album_cover(&self, id: &AlbumId, cover_url: &str) -> CatalogResult<()>;

    /// Fails with `NotFound` unless the album exists.
    async fn verify_album_exists(&self, id: &AlbumId) -> CatalogResult<()>;
}

/// Playlist repository.
#[async_trait]
pub trait PlaylistRepository: Interface + Send + Sync {
    /// Creates a playlist and returns its generated id.
    async fn add_playlist(&self, playlist: NewPlaylist) -> CatalogResult<PlaylistId>;

    /// Playlists the user owns or collaborates on.
    async fn list_playlists(&self, user: &UserId) -> CatalogResult<Sourced<Vec<PlaylistSummary>>>;

    /// Deletes a playlist.
    async fn delete_playlist(&self, id: &PlaylistId) -> CatalogResult<()>;

    /// Adds a song to a playlist.
    async fn add_playlist_song(&self, id: &PlaylistId, song: &SongId) -> CatalogResult<()>;

    /// Gets a playlist with its songs.
    async fn get_playlist_songs(&self, id: &PlaylistId) -> CatalogResult<Sourced<PlaylistDetail>>;

    /// Removes a song from a playlist.
    async fn delete_playlist_song(&self, id: &PlaylistId, song: &SongId) -> CatalogResult<()>;

    /// Appends to the playlist activity log.
    async fn add_activity(
        &self,
        id: &PlaylistId,
        song: &SongId,
        user: &UserId,
        action: ActivityAction,
    ) -> CatalogResult<ActivityId>;

    /// Reads the playlist activity log.
    async fn list_activities(&self, id: &PlaylistId) -> CatalogResult<PlaylistActivities>;

    /// Owner of a playlist, `None` if it does not exist.
    async fn find_owner(&self, id: &PlaylistId) -> CatalogResult<Option<UserId>>;
}

/// Collaboration repository.
#[async_trait]
pub trait CollaborationRepository: Interface + Send + Sync {
    /// Grants `user` collaborator access to `playlist`.
    async fn add_collaborator(&self, playlist: &PlaylistId, user: &UserId) -> CatalogResult<CollaborationId>;

    /// Revokes collaborator access.
    async fn remove_collaborator(&self, playlist: &PlaylistId, user: &UserId) -> CatalogResult<()>;

    /// Succeeds if `user` collaborates on `playlist`, `NotFound` otherwise.
    async fn verify_collaborator(&self, playlist: &PlaylistId, user: &UserId) -> CatalogResult<()>;

    /// Collaborators of a playlist.
    async fn collaborator_ids(&self, playlist: &PlaylistId) -> CatalogResult<Vec<UserId>>;
}

/// Album like repository.
#[async_trait]
pub trait AlbumLikeRepository: Interface + Send + Sync {
    /// Records that `user` likes `album`.
    async fn add_like(&self, user: &UserId, album: &AlbumId) -> CatalogResult<LikeId>;

    /// Removes a like.
    async fn remove_like(&self, user: &UserId, album: &AlbumId) -> CatalogResult<()>;

    /// Number of likes on an album.
    async fn like_count(&self, album: &AlbumId) -> CatalogResult<Sourced<u64>>;
}
