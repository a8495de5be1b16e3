//! SongDao trait: low-level song data access.

use async_trait::async_trait;
use openmusic_core::{AffectedSong, CatalogResult, Interface, Song, SongId, SongQuery, SongSummary};

/// Low-level song data access object.
#[async_trait]
pub trait SongDao: Interface + Send + Sync {
    /// Inserts a song and returns its id.
    async fn insert(&self, song: &Song) -> CatalogResult<SongId>;

    /// Lists every song as a summary.
    async fn find_all_summaries(&self) -> CatalogResult<Vec<SongSummary>>;

    /// Case-insensitive substring search on title and/or performer.
    async fn search(&self, query: &SongQuery) -> CatalogResult<Vec<SongSummary>>;

    /// Finds a song by id.
    async fn find_by_id(&self, id: &SongId) -> CatalogResult<Option<Song>>;

    /// Overwrites a song. Returns the id, the album it belonged to
    /// *before* the update and the playlists listing it, or `None` if no
    /// row matched.
    async fn update(&self, song: &Song) -> CatalogResult<Option<AffectedSong>>;

    /// Deletes a song. Returns the id and album of the removed row, plus the
    /// playlists that listed it before their links were dropped.
    async fn delete(&self, id: &SongId) -> CatalogResult<Option<AffectedSong>>;

    /// Checks if a song exists.
    async fn exists(&self, id: &SongId) -> CatalogResult<bool>;
}
