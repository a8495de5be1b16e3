//! AlbumLikeDao trait.

use async_trait::async_trait;
use openmusic_core::{AlbumId, CatalogResult, Interface, LikeId, UserId};

/// Low-level album like data access object.
#[async_trait]
pub trait AlbumLikeDao: Interface + Send + Sync {
    /// Records a like.
    async fn insert(&self, id: &LikeId, user: &UserId, album: &AlbumId) -> CatalogResult<LikeId>;

    /// Removes a like. Returns `false` if the user had not liked the album.
    async fn delete(&self, user: &UserId, album: &AlbumId) -> CatalogResult<bool>;

    /// Checks if `user` likes `album`.
    async fn exists(&self, user: &UserId, album: &AlbumId) -> CatalogResult<bool>;

    /// Number of likes on an album.
    async fn count(&self, album: &AlbumId) -> CatalogResult<u64>;
}
