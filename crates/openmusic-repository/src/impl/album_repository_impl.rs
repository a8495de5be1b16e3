//! `AlbumRepositoryImpl`: cache-aware album repository.

use crate::{dao::AlbumDao, traits::AlbumRepository, RepositoryContext};
use async_trait::async_trait;
use openmusic_cache::{CacheKey, Mutation};
use openmusic_core::{
    Album, AlbumDetail, AlbumId, AlbumPayload, CatalogError, CatalogResult, Sourced,
};
use std::sync::Arc;
use tracing::debug;

const RESOURCE: &str = "Album";

/// Album repository over an [`AlbumDao`]. Caches `album:<id>` with the
/// album's songs embedded.
pub struct AlbumRepositoryImpl {
    albums: Arc<dyn AlbumDao>,
    ctx: RepositoryContext,
}

impl AlbumRepositoryImpl {
    /// Creates a new `AlbumRepositoryImpl`.
    #[must_use]
    pub fn new(albums: Arc<dyn AlbumDao>, ctx: RepositoryContext) -> Self {
        Self { albums, ctx }
    }

    async fn load_detail(&self, id: &AlbumId) -> CatalogResult<AlbumDetail> {
        let album = self
            .ctx
            .db("albums.find_by_id", || self.albums.find_by_id(id))
            .await?
            .ok_or_else(|| CatalogError::not_found(RESOURCE, id))?;
        let songs = self
            .ctx
            .db("albums.find_songs", || self.albums.find_songs(id))
            .await?;

        Ok(AlbumDetail { album, songs })
    }

    fn found(updated: bool, id: &AlbumId) -> CatalogResult<()> {
        if updated {
            Ok(())
        } else {
            Err(CatalogError::not_found(RESOURCE, id))
        }
    }
}

#[async_trait]
impl AlbumRepository for AlbumRepositoryImpl {
    async fn add_album(&self, payload: AlbumPayload) -> CatalogResult<AlbumId> {
        let album = Album {
            id: AlbumId::generate(),
            name: payload.name,
            year: payload.year,
            cover_url: None,
        };
        debug!("Repository: add_album {}", album.id);

        // nothing can have cached a key for a freshly generated id
        self.ctx.db("albums.insert", || self.albums.insert(&album)).await
    }

    async fn get_album(&self, id: &AlbumId) -> CatalogResult<Sourced<AlbumDetail>> {
        self.ctx
            .cache()
            .read_through(&CacheKey::album(id), || self.load_detail(id))
            .await
    }

    async fn edit_album(&self, id: &AlbumId, payload: AlbumPayload) -> CatalogResult<()> {
        debug!("Repository: edit_album {}", id);
        let updated = self
            .ctx
            .db("albums.update", || self.albums.update(id, &payload))
            .await?;
        Self::found(updated, id)?;

        self.ctx
            .invalidate(Mutation::AlbumChanged {
                album_id: id.clone(),
            })
            .await
    }

    async fn delete_album(&self, id: &AlbumId) -> CatalogResult<()> {
        debug!("Repository: delete_album {}", id);
        let detached_songs = self
            .ctx
            .db("albums.delete", || self.albums.delete(id))
            .await?
            .ok_or_else(|| CatalogError::not_found(RESOURCE, id))?;

        self.ctx
            .invalidate(Mutation::AlbumDeleted {
                album_id: id.clone(),
                detached_songs,
            })
            .await
    }

    async fn update_album_cover(&self, id: &AlbumId, cover_url: &str) -> CatalogResult<()> {
        debug!("Repository: update_album_cover {}", id);
        let updated = self
            .ctx
            .db("albums.update_cover", || self.albums.update_cover(id, cover_url))
            .await?;
        Self::found(updated, id)?;

        self.ctx
            .invalidate(Mutation::AlbumChanged {
                album_id: id.clone(),
            })
            .await
    }

    async fn verify_album_exists(&self, id: &AlbumId) -> CatalogResult<()> {
        let exists = self.ctx.db("albums.exists", || self.albums.exists(id)).await?;
        Self::found(exists, id)
    }
}
