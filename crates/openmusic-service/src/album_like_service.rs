//! Album like service trait.

use async_trait::async_trait;
use openmusic_core::{AlbumId, CatalogResult, Interface, LikeId, Sourced, UserId};

/// Likes on albums.
#[async_trait]
pub trait AlbumLikeService: Interface + Send + Sync {
    async fn like_album(&self, user: &UserId, album: &AlbumId) -> CatalogResult<LikeId>;

    async fn unlike_album(&self, user: &UserId, album: &AlbumId) -> CatalogResult<()>;

    /// Like count, tagged with where it was read from.
    async fn like_count(&self, album: &AlbumId) -> CatalogResult<Sourced<u64>>;
}
