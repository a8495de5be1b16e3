//! Album like service implementation.

use crate::album_like_service::AlbumLikeService;
use async_trait::async_trait;
use openmusic_core::{AlbumId, CatalogResult, LikeId, Sourced, UserId};
use openmusic_repository::AlbumLikeRepository;
use std::sync::Arc;
use tracing::debug;

/// Album like service.
pub struct AlbumLikeServiceImpl {
    likes: Arc<dyn AlbumLikeRepository>,
}

impl AlbumLikeServiceImpl {
    #[must_use]
    pub fn new(likes: Arc<dyn AlbumLikeRepository>) -> Self {
        Self { likes }
    }
}

#[async_trait]
impl AlbumLikeService for AlbumLikeServiceImpl {
    async fn like_album(&self, user: &UserId, album: &AlbumId) -> CatalogResult<LikeId> {
        debug!("{} likes {}", user, album);
        self.likes.add_like(user, album).await
    }

    async fn unlike_album(&self, user: &UserId, album: &AlbumId) -> CatalogResult<()> {
        debug!("{} unlikes {}", user, album);
        self.likes.remove_like(user, album).await
    }

    async fn like_count(&self, album: &AlbumId) -> CatalogResult<Sourced<u64>> {
        self.likes.like_count(album).await
    }
}
