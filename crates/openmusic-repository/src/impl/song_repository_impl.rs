//! `SongRepositoryImpl`: cache-aware song repository.

use crate::{dao::SongDao, traits::SongRepository, RepositoryContext};
use async_trait::async_trait;
use openmusic_cache::{CacheKey, Mutation};
use openmusic_core::{
    CatalogError, CatalogResult, Song, SongId, SongPayload, SongQuery, SongSummary, Sourced,
};
use std::sync::Arc;
use tracing::debug;

const RESOURCE: &str = "Song";

/// Song repository over a [`SongDao`].
///
/// Cached reads: `song:<id>` and `songs:all`. Every write also clears the
/// album entry of the song's old and new album, since album reads embed
/// their song list.
pub struct SongRepositoryImpl {
    songs: Arc<dyn SongDao>,
    ctx: RepositoryContext,
}

impl SongRepositoryImpl {
    /// Creates a new `SongRepositoryImpl`.
    #[must_use]
    pub fn new(songs: Arc<dyn SongDao>, ctx: RepositoryContext) -> Self {
        Self { songs, ctx }
    }
}

#[async_trait]
impl SongRepository for SongRepositoryImpl {
    async fn add_song(&self, payload: SongPayload) -> CatalogResult<SongId> {
        let song = payload.into_song(SongId::generate());
        debug!("Repository: add_song {}", song.id);

        let id = self.ctx.db("songs.insert", || self.songs.insert(&song)).await?;

        self.ctx
            .invalidate(Mutation::SongAdded {
                song_id: id.clone(),
                album_id: song.album_id,
            })
            .await?;
        Ok(id)
    }

    async fn list_songs(&self, query: &SongQuery) -> CatalogResult<Sourced<Vec<SongSummary>>> {
        if query.is_filtered() {
            debug!("Repository: search songs {:?}", query);
            let songs = self.ctx.db("songs.search", || self.songs.search(query)).await?;
            return Ok(Sourced::fresh(songs));
        }

        self.ctx
            .cache()
            .read_through(&CacheKey::all_songs(), || {
                self.ctx
                    .db("songs.find_all", || self.songs.find_all_summaries())
            })
            .await
    }

    async fn get_song(&self, id: &SongId) -> CatalogResult<Sourced<Song>> {
        self.ctx
            .cache()
            .read_through(&CacheKey::song(id), || async {
                self.ctx
                    .db("songs.find_by_id", || self.songs.find_by_id(id))
                    .await?
                    .ok_or_else(|| CatalogError::not_found(RESOURCE, id))
            })
            .await
    }

    async fn edit_song(&self, id: &SongId, payload: SongPayload) -> CatalogResult<()> {
        debug!("Repository: edit_song {}", id);
        let song = payload.into_song(id.clone());

        let affected = self
            .ctx
            .db("songs.update", || self.songs.update(&song))
            .await?
            .ok_or_else(|| CatalogError::not_found(RESOURCE, id))?;

        self.ctx
            .invalidate(Mutation::SongEdited {
                song_id: affected.id,
                previous_album: affected.album_id,
                album_id: song.album_id,
                playlists: affected.playlists,
            })
            .await
    }

    async fn delete_song(&self, id: &SongId) -> CatalogResult<()> {
        debug!("Repository: delete_song {}", id);

        let affected = self
            .ctx
            .db("songs.delete", || self.songs.delete(id))
            .await?
            .ok_or_else(|| CatalogError::not_found(RESOURCE, id))?;

        self.ctx
            .invalidate(Mutation::SongDeleted {
                song_id: affected.id,
                album_id: affected.album_id,
                playlists: affected.playlists,
            })
            .await
    }

    async fn verify_song_exists(&self, id: &SongId) -> CatalogResult<()> {
        if self.ctx.db("songs.exists", || self.songs.exists(id)).await? {
            Ok(())
        } else {
            Err(CatalogError::not_found(RESOURCE, id))
        }
    }
}
