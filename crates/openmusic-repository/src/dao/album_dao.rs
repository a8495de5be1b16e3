//! AlbumDao trait: low-level album data access.

use async_trait::async_trait;
use openmusic_core::{Album, AlbumId, AlbumPayload, CatalogResult, Interface, SongId, SongSummary};

/// Low-level album data access object.
#[async_trait]
pub trait AlbumDao: Interface + Send + Sync {
    /// Inserts an album and returns its id.
    async fn insert(&self, album: &Album) -> CatalogResult<AlbumId>;

    /// Finds an album by id.
    async fn find_by_id(&self, id: &AlbumId) -> CatalogResult<Option<Album>>;

    /// Lists the songs that belong to an album.
    async fn find_songs(&self, id: &AlbumId) -> CatalogResult<Vec<SongSummary>>;

    /// Updates name and year. Returns `false` if no row matched.
    async fn update(&self, id: &AlbumId, payload: &AlbumPayload) -> CatalogResult<bool>;

    /// Sets the cover URL. Returns `false` if no row matched.
    async fn update_cover(&self, id: &AlbumId, cover_url: &str) -> CatalogResult<bool>;

    /// Deletes an album, detaching its songs. Returns the detached song ids,
    /// or `None` if no row matched.
    async fn delete(&self, id: &AlbumId) -> CatalogResult<Option<Vec<SongId>>>;

    /// Checks if an album exists.
    async fn exists(&self, id: &AlbumId) -> CatalogResult<bool>;
}
