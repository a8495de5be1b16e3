//! PostgreSQL implementation of [`PlaylistDao`].
//!
//! [`PlaylistDao`]: crate::dao::PlaylistDao

use super::song_dao_impl::SongSummaryRow;
use crate::dao::playlist_dao::{ActivityRecord, PlaylistDao};
use crate::DatabasePoolInterface;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use openmusic_core::{
    playlist_song_id, ActivityAction, ActivityId, CatalogError, CatalogResult, NewPlaylist,
    PlaylistActivity, PlaylistId, PlaylistSummary, SongId, SongSummary, UserId,
};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL playlist DAO.
#[derive(Clone)]
pub struct PgPlaylistDaoImpl {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgPlaylistDaoImpl {
    /// Creates a new DAO over the shared pool.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PlaylistRow {
    id: String,
    name: String,
    username: String,
}

impl From<PlaylistRow> for PlaylistSummary {
    fn from(row: PlaylistRow) -> Self {
        Self {
            id: PlaylistId::new(row.id),
            name: row.name,
            username: row.username,
        }
    }
}

#[derive(Debug, FromRow)]
struct ActivityRow {
    username: String,
    title: String,
    action: String,
    time: DateTime<Utc>,
}

impl TryFrom<ActivityRow> for PlaylistActivity {
    type Error = CatalogError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        let action = row
            .action
            .parse::<ActivityAction>()
            .map_err(CatalogError::Internal)?;

        Ok(Self {
            username: row.username,
            title: row.title,
            action,
            time: row.time,
        })
    }
}

#[async_trait]
impl PlaylistDao for PgPlaylistDaoImpl {
    async fn insert(&self, id: &PlaylistId, playlist: &NewPlaylist) -> CatalogResult<PlaylistId> {
        debug!("Inserting playlist {} for {}", id, playlist.owner);

        let id: String = sqlx::query_scalar(
            "INSERT INTO playlists (id, name, owner) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(id.as_str())
        .bind(&playlist.name)
        .bind(playlist.owner.as_str())
        .fetch_one(self.pool.inner())
        .await?;

        Ok(PlaylistId::new(id))
    }

    async fn find_for_user(&self, user: &UserId) -> CatalogResult<Vec<PlaylistSummary>> {
        let rows = sqlx::query_as::<_, PlaylistRow>(
            r#"
            SELECT playlists.id, playlists.name, users.username
            FROM playlists
            JOIN users ON playlists.owner = users.id
            LEFT JOIN collaborations ON playlists.id = collaborations.playlist_id
            WHERE playlists.owner = $1 OR collaborations.user_id = $1
            GROUP BY playlists.id, playlists.name, users.username
            ORDER BY playlists.id
            "#,
        )
        .bind(user.as_str())
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(PlaylistSummary::from).collect())
    }

    async fn find_owner(&self, id: &PlaylistId) -> CatalogResult<Option<UserId>> {
        let owner: Option<String> = sqlx::query_scalar("SELECT owner FROM playlists WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(owner.map(UserId::new))
    }

    async fn find_header(&self, id: &PlaylistId) -> CatalogResult<Option<PlaylistSummary>> {
        let row = sqlx::query_as::<_, PlaylistRow>(
            r#"
            SELECT playlists.id, playlists.name, users.username
            FROM playlists
            JOIN users ON playlists.owner = users.id
            WHERE playlists.id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(PlaylistSummary::from))
    }

    async fn find_songs(&self, id: &PlaylistId) -> CatalogResult<Vec<SongSummary>> {
        let rows = sqlx::query_as::<_, SongSummaryRow>(
            r#"
            SELECT songs.id, songs.title, songs.performer
            FROM songs
            JOIN playlist_songs ON songs.id = playlist_songs.song_id
            WHERE playlist_songs.playlist_id = $1
            ORDER BY songs.id
            "#,
        )
        .bind(id.as_str())
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(SongSummary::from).collect())
    }

    async fn delete(&self, id: &PlaylistId) -> CatalogResult<bool> {
        debug!("Deleting playlist {}", id);

        let result = sqlx::query("DELETE FROM playlists WHERE id = $1")
            .bind(id.as_str())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_song(&self, id: &PlaylistId, song: &SongId) -> CatalogResult<bool> {
        let inserted: Option<String> = sqlx::query_scalar(
            r#"
            INSERT INTO playlist_songs (id, playlist_id, song_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (playlist_id, song_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(playlist_song_id())
        .bind(id.as_str())
        .bind(song.as_str())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(inserted.is_some())
    }

    async fn delete_song(&self, id: &PlaylistId, song: &SongId) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = $1 AND song_id = $2")
            .bind(id.as_str())
            .bind(song.as_str())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_activity(&self, record: &ActivityRecord) -> CatalogResult<ActivityId> {
        let id: String = sqlx::query_scalar(
            r#"
            INSERT INTO playlist_song_activities (id, playlist_id, song_id, user_id, action, time)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(record.id.as_str())
        .bind(record.playlist_id.as_str())
        .bind(record.song_id.as_str())
        .bind(record.user_id.as_str())
        .bind(record.action.as_str())
        .bind(record.time)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(ActivityId::new(id))
    }

    async fn find_activities(&self, id: &PlaylistId) -> CatalogResult<Vec<PlaylistActivity>> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT users.username, songs.title,
                   playlist_song_activities.action,
                   playlist_song_activities.time
            FROM playlist_song_activities
            JOIN users ON users.id = playlist_song_activities.user_id
            JOIN songs ON songs.id = playlist_song_activities.song_id
            WHERE playlist_song_activities.playlist_id = $1
            ORDER BY playlist_song_activities.time ASC
            "#,
        )
        .bind(id.as_str())
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(PlaylistActivity::try_from).collect()
    }
}
