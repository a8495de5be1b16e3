//! CollaborationDao trait: playlist ↔ collaborator relation.

use async_trait::async_trait;
use openmusic_core::{CatalogResult, CollaborationId, Interface, PlaylistId, UserId};

/// Low-level collaboration data access object.
#[async_trait]
pub trait CollaborationDao: Interface + Send + Sync {
    /// Inserts a collaboration record.
    async fn insert(
        &self,
        id: &CollaborationId,
        playlist: &PlaylistId,
        user: &UserId,
    ) -> CatalogResult<CollaborationId>;

    /// Deletes a collaboration record. Returns `false` if none matched.
    async fn delete(&self, playlist: &PlaylistId, user: &UserId) -> CatalogResult<bool>;

    /// Checks if `user` collaborates on `playlist`.
    async fn exists(&self, playlist: &PlaylistId, user: &UserId) -> CatalogResult<bool>;

    /// Collaborators of a playlist.
    async fn user_ids(&self, playlist: &PlaylistId) -> CatalogResult<Vec<UserId>>;
}
