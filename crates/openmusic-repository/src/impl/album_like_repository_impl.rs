//! `AlbumLikeRepositoryImpl`: album likes with a cached count.

use crate::{
    dao::{AlbumDao, AlbumLikeDao},
    traits::AlbumLikeRepository,
    RepositoryContext,
};
use async_trait::async_trait;
use openmusic_cache::{CacheKey, Mutation};
use openmusic_core::{AlbumId, CatalogError, CatalogResult, LikeId, Sourced, UserId};
use std::sync::Arc;
use tracing::debug;

/// Album like repository. Caches `album_likes:<albumId>`.
pub struct AlbumLikeRepositoryImpl {
    likes: Arc<dyn AlbumLikeDao>,
    albums: Arc<dyn AlbumDao>,
    ctx: RepositoryContext,
}

impl AlbumLikeRepositoryImpl {
    /// Creates a new `AlbumLikeRepositoryImpl`.
    #[must_use]
    pub fn new(likes: Arc<dyn AlbumLikeDao>, albums: Arc<dyn AlbumDao>, ctx: RepositoryContext) -> Self {
        Self { likes, albums, ctx }
    }

    async fn ensure_album(&self, album: &AlbumId) -> CatalogResult<()> {
        if self.ctx.db("albums.exists", || self.albums.exists(album)).await? {
            Ok(())
        } else {
            Err(CatalogError::not_found("Album", album))
        }
    }
}

#[async_trait]
impl AlbumLikeRepository for AlbumLikeRepositoryImpl {
    async fn add_like(&self, user: &UserId, album: &AlbumId) -> CatalogResult<LikeId> {
        debug!("Repository: add_like {} -> {}", user, album);
        self.ensure_album(album).await?;

        if self.ctx.db("likes.exists", || self.likes.exists(user, album)).await? {
            return Err(CatalogError::invariant("Album already liked by this user"));
        }

        let id = LikeId::generate();
        let id = self
            .ctx
            .db("likes.insert", || self.likes.insert(&id, user, album))
            .await?;

        self.ctx
            .invalidate(Mutation::AlbumLikesChanged {
                album_id: album.clone(),
            })
            .await?;
        Ok(id)
    }

    async fn remove_like(&self, user: &UserId, album: &AlbumId) -> CatalogResult<()> {
        debug!("Repository: remove_like {} -> {}", user, album);
        let removed = self.ctx.db("likes.delete", || self.likes.delete(user, album)).await?;
        if !removed {
            return Err(CatalogError::not_found("Album like", album));
        }

        self.ctx
            .invalidate(Mutation::AlbumLikesChanged {
                album_id: album.clone(),
            })
            .await
    }

    async fn like_count(&self, album: &AlbumId) -> CatalogResult<Sourced<u64>> {
        self.ctx
            .cache()
            .read_through(&CacheKey::album_likes(album), || async {
                self.ensure_album(album).await?;
                self.ctx.db("likes.count", || self.likes.count(album)).await
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context, memory_store, InMemoryCatalog};
    use crate::{AlbumRepository, AlbumRepositoryImpl};
    use openmusic_core::{AlbumPayload, DataSource};

    async fn setup() -> (Arc<InMemoryCatalog>, AlbumLikeRepositoryImpl, AlbumId) {
        let db = InMemoryCatalog::new();
        let store = memory_store();
        let albums = AlbumRepositoryImpl::new(db.clone(), context(store.clone()));
        let album_id = albums
            .add_album(AlbumPayload {
                name: "Ghost Stories".to_string(),
                year: 2014,
            })
            .await
            .unwrap();
        let likes = AlbumLikeRepositoryImpl::new(db.clone(), db.clone(), context(store));
        (db, likes, album_id)
    }

    #[tokio::test]
    async fn test_like_count_scenario() {
        let (db, likes, album) = setup().await;
        let user = UserId::new("user-1");

        likes.add_like(&user, &album).await.unwrap();

        db.reset_queries();
        let first = likes.like_count(&album).await.unwrap();
        assert_eq!(first, Sourced::fresh(1));
        let after_first = db.queries();
        assert!(after_first > 0);

        let second = likes.like_count(&album).await.unwrap();
        assert_eq!(second.value, 1);
        assert_eq!(second.source, DataSource::Cache);
        assert_eq!(db.queries(), after_first);

        likes.remove_like(&user, &album).await.unwrap();
        let third = likes.like_count(&album).await.unwrap();
        assert_eq!(third, Sourced::fresh(0));
    }

    #[tokio::test]
    async fn test_duplicate_like_is_invariant_error() {
        let (_db, likes, album) = setup().await;
        let user = UserId::new("user-1");

        likes.add_like(&user, &album).await.unwrap();
        assert!(matches!(
            likes.add_like(&user, &album).await,
            Err(CatalogError::Invariant(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_album_and_missing_like_are_not_found() {
        let (_db, likes, album) = setup().await;
        let user = UserId::new("user-1");
        let missing = AlbumId::new("album-missing");

        assert!(matches!(
            likes.add_like(&user, &missing).await,
            Err(CatalogError::NotFound { .. })
        ));
        assert!(matches!(
            likes.like_count(&missing).await,
            Err(CatalogError::NotFound { .. })
        ));
        assert!(matches!(
            likes.remove_like(&user, &album).await,
            Err(CatalogError::NotFound { .. })
        ));
    }
}
