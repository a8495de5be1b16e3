//! PostgreSQL implementation of [`SongDao`].
//!
//! [`SongDao`]: crate::dao::SongDao

use crate::{dao::SongDao, DatabasePoolInterface};
use async_trait::async_trait;
use openmusic_core::{
    AffectedSong, AlbumId, CatalogResult, PlaylistId, Song, SongId, SongQuery, SongSummary,
};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL song DAO.
#[derive(Clone)]
pub struct PgSongDaoImpl {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgSongDaoImpl {
    /// Creates a new DAO over the shared pool.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SongRow {
    id: String,
    title: String,
    year: i32,
    genre: String,
    performer: String,
    duration: Option<i32>,
    album_id: Option<String>,
}

impl From<SongRow> for Song {
    fn from(row: SongRow) -> Self {
        Self {
            id: SongId::new(row.id),
            title: row.title,
            year: row.year,
            genre: row.genre,
            performer: row.performer,
            duration: row.duration,
            album_id: row.album_id.map(AlbumId::new),
        }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct SongSummaryRow {
    id: String,
    title: String,
    performer: String,
}

impl From<SongSummaryRow> for SongSummary {
    fn from(row: SongSummaryRow) -> Self {
        Self {
            id: SongId::new(row.id),
            title: row.title,
            performer: row.performer,
        }
    }
}

#[derive(Debug, FromRow)]
struct AffectedRow {
    id: String,
    album_id: Option<String>,
    playlist_ids: Vec<String>,
}

impl From<AffectedRow> for AffectedSong {
    fn from(row: AffectedRow) -> Self {
        Self {
            id: SongId::new(row.id),
            album_id: row.album_id.map(AlbumId::new),
            playlists: row.playlist_ids.into_iter().map(PlaylistId::new).collect(),
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

#[async_trait]
impl SongDao for PgSongDaoImpl {
    async fn insert(&self, song: &Song) -> CatalogResult<SongId> {
        debug!("Inserting song {}", song.id);

        let id: String = sqlx::query_scalar(
            r#"
            INSERT INTO songs (id, title, year, genre, performer, duration, album_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(song.id.as_str())
        .bind(&song.title)
        .bind(song.year)
        .bind(&song.genre)
        .bind(&song.performer)
        .bind(song.duration)
        .bind(song.album_id.as_ref().map(AlbumId::as_str))
        .fetch_one(self.pool.inner())
        .await?;

        Ok(SongId::new(id))
    }

    async fn find_all_summaries(&self) -> CatalogResult<Vec<SongSummary>> {
        let rows = sqlx::query_as::<_, SongSummaryRow>(
            "SELECT id, title, performer FROM songs ORDER BY id",
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(SongSummary::from).collect())
    }

    async fn search(&self, query: &SongQuery) -> CatalogResult<Vec<SongSummary>> {
        debug!("Searching songs: {:?}", query);

        let rows = sqlx::query_as::<_, SongSummaryRow>(
            r#"
            SELECT id, title, performer
            FROM songs
            WHERE ($1::text IS NULL OR title ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR performer ILIKE '%' || $2 || '%')
            ORDER BY id
            "#,
        )
        .bind(non_empty(query.title.as_ref()))
        .bind(non_empty(query.performer.as_ref()))
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(SongSummary::from).collect())
    }

    async fn find_by_id(&self, id: &SongId) -> CatalogResult<Option<Song>> {
        let row = sqlx::query_as::<_, SongRow>(
            r#"
            SELECT id, title, year, genre, performer, duration, album_id
            FROM songs
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Song::from))
    }

    async fn update(&self, song: &Song) -> CatalogResult<Option<AffectedSong>> {
        debug!("Updating song {}", song.id);

        // previous.album_id is read from the pre-update snapshot
        let row = sqlx::query_as::<_, AffectedRow>(
            r#"
            WITH previous AS (
                SELECT id, album_id FROM songs WHERE id = $1 FOR UPDATE
            ),
            linked AS (
                SELECT COALESCE(array_agg(playlist_id), '{}')::text[] AS playlist_ids
                FROM playlist_songs WHERE song_id = $1
            )
            UPDATE songs
            SET title = $2, year = $3, genre = $4, performer = $5,
                duration = $6, album_id = $7
            FROM previous, linked
            WHERE songs.id = previous.id
            RETURNING songs.id AS id, previous.album_id AS album_id, linked.playlist_ids
            "#,
        )
        .bind(song.id.as_str())
        .bind(&song.title)
        .bind(song.year)
        .bind(&song.genre)
        .bind(&song.performer)
        .bind(song.duration)
        .bind(song.album_id.as_ref().map(AlbumId::as_str))
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(AffectedSong::from))
    }

    async fn delete(&self, id: &SongId) -> CatalogResult<Option<AffectedSong>> {
        debug!("Deleting song {}", id);

        // playlist links are read in the statement snapshot, before the cascade
        let row = sqlx::query_as::<_, AffectedRow>(
            r#"
            WITH linked AS (
                SELECT COALESCE(array_agg(playlist_id), '{}')::text[] AS playlist_ids
                FROM playlist_songs WHERE song_id = $1
            )
            DELETE FROM songs USING linked
            WHERE songs.id = $1
            RETURNING songs.id AS id, songs.album_id AS album_id, linked.playlist_ids
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(AffectedSong::from))
    }

    async fn exists(&self, id: &SongId) -> CatalogResult<bool> {
        let row: Option<i32> = sqlx::query_scalar("SELECT 1 FROM songs WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(self.pool.inner())
            .await?;
        Ok(row.is_some())
    }
}
