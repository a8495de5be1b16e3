//! PostgreSQL implementation of [`AlbumDao`].
//!
//! [`AlbumDao`]: crate::dao::AlbumDao

use super::song_dao_impl::SongSummaryRow;
use crate::{dao::AlbumDao, DatabasePoolInterface};
use async_trait::async_trait;
use openmusic_core::{Album, AlbumId, AlbumPayload, CatalogResult, SongId, SongSummary};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL album DAO.
#[derive(Clone)]
pub struct PgAlbumDaoImpl {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgAlbumDaoImpl {
    /// Creates a new DAO over the shared pool.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AlbumRow {
    id: String,
    name: String,
    year: i32,
    cover: Option<String>,
}

impl From<AlbumRow> for Album {
    fn from(row: AlbumRow) -> Self {
        Self {
            id: AlbumId::new(row.id),
            name: row.name,
            year: row.year,
            cover_url: row.cover,
        }
    }
}

#[async_trait]
impl AlbumDao for PgAlbumDaoImpl {
    async fn insert(&self, album: &Album) -> CatalogResult<AlbumId> {
        debug!("Inserting album {}", album.id);

        let id: String = sqlx::query_scalar(
            "INSERT INTO albums (id, name, year, cover) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(album.id.as_str())
        .bind(&album.name)
        .bind(album.year)
        .bind(album.cover_url.as_deref())
        .fetch_one(self.pool.inner())
        .await?;

        Ok(AlbumId::new(id))
    }

    async fn find_by_id(&self, id: &AlbumId) -> CatalogResult<Option<Album>> {
        let row = sqlx::query_as::<_, AlbumRow>(
            "SELECT id, name, year, cover FROM albums WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Album::from))
    }

    async fn find_songs(&self, id: &AlbumId) -> CatalogResult<Vec<SongSummary>> {
        let rows = sqlx::query_as::<_, SongSummaryRow>(
            "SELECT id, title, performer FROM songs WHERE album_id = $1 ORDER BY id",
        )
        .bind(id.as_str())
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(SongSummary::from).collect())
    }

    async fn update(&self, id: &AlbumId, payload: &AlbumPayload) -> CatalogResult<bool> {
        let result = sqlx::query("UPDATE albums SET name = $2, year = $3 WHERE id = $1")
            .bind(id.as_str())
            .bind(&payload.name)
            .bind(payload.year)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_cover(&self, id: &AlbumId, cover_url: &str) -> CatalogResult<bool> {
        let result = sqlx::query("UPDATE albums SET cover = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(cover_url)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &AlbumId) -> CatalogResult<Option<Vec<SongId>>> {
        debug!("Deleting album {}", id);

        let mut tx = self.pool.inner().begin().await?;

        // songs.album_id is ON DELETE SET NULL; capture the ids before they detach
        let song_ids: Vec<String> =
            sqlx::query_scalar("SELECT id FROM songs WHERE album_id = $1 FOR UPDATE")
                .bind(id.as_str())
                .fetch_all(&mut *tx)
                .await?;

        let deleted = sqlx::query("DELETE FROM albums WHERE id = $1")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(song_ids.into_iter().map(SongId::new).collect()))
    }

    async fn exists(&self, id: &AlbumId) -> CatalogResult<bool> {
        let row: Option<i32> = sqlx::query_scalar("SELECT 1 FROM albums WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(self.pool.inner())
            .await?;
        Ok(row.is_some())
    }
}
