//! PostgreSQL implementation of [`CollaborationDao`].
//!
//! [`CollaborationDao`]: crate::dao::CollaborationDao

use crate::{dao::CollaborationDao, DatabasePoolInterface};
use async_trait::async_trait;
use openmusic_core::{CatalogResult, CollaborationId, PlaylistId, UserId};
use std::sync::Arc;

/// PostgreSQL collaboration DAO.
#[derive(Clone)]
pub struct PgCollaborationDaoImpl {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgCollaborationDaoImpl {
    /// Creates a new DAO over the shared pool.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollaborationDao for PgCollaborationDaoImpl {
    async fn insert(
        &self,
        id: &CollaborationId,
        playlist: &PlaylistId,
        user: &UserId,
    ) -> CatalogResult<CollaborationId> {
        let id: String = sqlx::query_scalar(
            "INSERT INTO collaborations (id, playlist_id, user_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(id.as_str())
        .bind(playlist.as_str())
        .bind(user.as_str())
        .fetch_one(self.pool.inner())
        .await?;

        Ok(CollaborationId::new(id))
    }

    async fn delete(&self, playlist: &PlaylistId, user: &UserId) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM collaborations WHERE playlist_id = $1 AND user_id = $2")
            .bind(playlist.as_str())
            .bind(user.as_str())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, playlist: &PlaylistId, user: &UserId) -> CatalogResult<bool> {
        let row: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM collaborations WHERE playlist_id = $1 AND user_id = $2")
                .bind(playlist.as_str())
                .bind(user.as_str())
                .fetch_optional(self.pool.inner())
                .await?;
        Ok(row.is_some())
    }

    async fn user_ids(&self, playlist: &PlaylistId) -> CatalogResult<Vec<UserId>> {
        let ids: Vec<String> =
            sqlx::query_scalar("SELECT user_id FROM collaborations WHERE playlist_id = $1 ORDER BY user_id")
                .bind(playlist.as_str())
                .fetch_all(self.pool.inner())
                .await?;

        Ok(ids.into_iter().map(UserId::new).collect())
    }
}
