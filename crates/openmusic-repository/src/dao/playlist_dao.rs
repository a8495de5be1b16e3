//! PlaylistDao trait: playlists, their songs, and their activity log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use openmusic_core::{
    ActivityAction, ActivityId, CatalogResult, Interface, NewPlaylist, PlaylistActivity,
    PlaylistId, PlaylistSummary, SongId, SongSummary, UserId,
};

/// One row of the playlist activity log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    pub id: ActivityId,
    pub playlist_id: PlaylistId,
    pub song_id: SongId,
    pub user_id: UserId,
    pub action: ActivityAction,
    pub time: DateTime<Utc>,
}

/// Low-level playlist data access object.
#[async_trait]
pub trait PlaylistDao: Interface + Send + Sync {
    /// Inserts a playlist.
    async fn insert(&self, id: &PlaylistId, playlist: &NewPlaylist) -> CatalogResult<PlaylistId>;

    /// Playlists a user owns or collaborates on.
    async fn find_for_user(&self, user: &UserId) -> CatalogResult<Vec<PlaylistSummary>>;

    /// Owner of a playlist, `None` if the playlist does not exist.
    async fn find_owner(&self, id: &PlaylistId) -> CatalogResult<Option<UserId>>;

    /// Playlist header with the owner's username.
    async fn find_header(&self, id: &PlaylistId) -> CatalogResult<Option<PlaylistSummary>>;

    /// Songs linked to a playlist.
    async fn find_songs(&self, id: &PlaylistId) -> CatalogResult<Vec<SongSummary>>;

    /// Deletes a playlist and, by cascade, its songs, collaborations and activities.
    async fn delete(&self, id: &PlaylistId) -> CatalogResult<bool>;

    /// Links a song to a playlist. Returns `false` if nothing was inserted.
    async fn insert_song(&self, id: &PlaylistId, song: &SongId) -> CatalogResult<bool>;

    /// Unlinks a song. Returns `false` if the link did not exist.
    async fn delete_song(&self, id: &PlaylistId, song: &SongId) -> CatalogResult<bool>;

    /// Appends an activity log entry.
    async fn insert_activity(&self, record: &ActivityRecord) -> CatalogResult<ActivityId>;

    /// Activity log of a playlist, oldest first.
    async fn find_activities(&self, id: &PlaylistId) -> CatalogResult<Vec<PlaylistActivity>>;
}
