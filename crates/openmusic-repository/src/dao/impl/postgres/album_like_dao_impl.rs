//! PostgreSQL implementation of [`AlbumLikeDao`].
//!
//! [`AlbumLikeDao`]: crate::dao::AlbumLikeDao

use crate::{dao::AlbumLikeDao, DatabasePoolInterface};
use async_trait::async_trait;
use openmusic_core::{AlbumId, CatalogError, CatalogResult, LikeId, UserId};
use std::sync::Arc;

/// PostgreSQL album like DAO.
#[derive(Clone)]
pub struct PgAlbumLikeDaoImpl {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgAlbumLikeDaoImpl {
    /// Creates a new DAO over the shared pool.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlbumLikeDao for PgAlbumLikeDaoImpl {
    async fn insert(&self, id: &LikeId, user: &UserId, album: &AlbumId) -> CatalogResult<LikeId> {
        let id: String = sqlx::query_scalar(
            "INSERT INTO user_album_likes (id, user_id, album_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(id.as_str())
        .bind(user.as_str())
        .bind(album.as_str())
        .fetch_one(self.pool.inner())
        .await?;

        Ok(LikeId::new(id))
    }

    async fn delete(&self, user: &UserId, album: &AlbumId) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM user_album_likes WHERE user_id = $1 AND album_id = $2")
            .bind(user.as_str())
            .bind(album.as_str())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, user: &UserId, album: &AlbumId) -> CatalogResult<bool> {
        let row: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM user_album_likes WHERE user_id = $1 AND album_id = $2")
                .bind(user.as_str())
                .bind(album.as_str())
                .fetch_optional(self.pool.inner())
                .await?;
        Ok(row.is_some())
    }

    async fn count(&self, album: &AlbumId) -> CatalogResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_album_likes WHERE album_id = $1")
            .bind(album.as_str())
            .fetch_one(self.pool.inner())
            .await?;

        u64::try_from(count).map_err(|e| CatalogError::internal(format!("negative like count: {}", e)))
    }
}
