//! Playlist service trait.

use async_trait::async_trait;
use openmusic_core::{
    CatalogResult, CollaborationId, Interface, PlaylistActivities, PlaylistDetail, PlaylistId,
    PlaylistSummary, SongId, Sourced, UserId,
};

/// Playlist operations performed on behalf of a caller.
///
/// Reads and song edits require owner or collaborator access; deletion and
/// collaborator management are owner-only.
#[async_trait]
pub trait PlaylistService: Interface + Send + Sync {
    /// Creates a playlist owned by `owner`.
    async fn create_playlist(&self, owner: &UserId, name: &str) -> CatalogResult<PlaylistId>;

    /// Playlists `user` owns or collaborates on.
    async fn list_playlists(&self, user: &UserId) -> CatalogResult<Sourced<Vec<PlaylistSummary>>>;

    /// Deletes a playlist. Owner only.
    async fn delete_playlist(&self, playlist: &PlaylistId, caller: &UserId) -> CatalogResult<()>;

    /// Adds an existing song and records an `add` activity.
    async fn add_song(&self, playlist: &PlaylistId, song: &SongId, caller: &UserId) -> CatalogResult<()>;

    /// Playlist header and songs.
    async fn get_songs(&self, playlist: &PlaylistId, caller: &UserId) -> CatalogResult<Sourced<PlaylistDetail>>;

    /// Removes a song and records a `delete` activity.
    async fn remove_song(&self, playlist: &PlaylistId, song: &SongId, caller: &UserId) -> CatalogResult<()>;

    /// Activity log of a playlist.
    async fn get_activities(&self, playlist: &PlaylistId, caller: &UserId) -> CatalogResult<PlaylistActivities>;

    /// Grants `collaborator` access. Owner only.
    async fn add_collaborator(
        &self,
        playlist: &PlaylistId,
        caller: &UserId,
        collaborator: &UserId,
    ) -> CatalogResult<CollaborationId>;

    /// Revokes `collaborator` access. Owner only.
    async fn remove_collaborator(
        &self,
        playlist: &PlaylistId,
        caller: &UserId,
        collaborator: &UserId,
    ) -> CatalogResult<()>;
}
