//! `PlaylistRepositoryImpl`: playlists, playlist songs, and activity log.

use crate::dao::{ActivityRecord, CollaborationDao, PlaylistDao};
use crate::{traits::PlaylistRepository, RepositoryContext};
use async_trait::async_trait;
use chrono::Utc;
use openmusic_cache::{CacheKey, Mutation};
use openmusic_core::{
    ActivityAction, ActivityId, CatalogError, CatalogResult, NewPlaylist, PlaylistActivities,
    PlaylistDetail, PlaylistId, PlaylistSummary, SongId, Sourced, UserId,
};
use std::sync::Arc;
use tracing::debug;

const RESOURCE: &str = "Playlist";

/// Playlist repository.
///
/// Cached reads: `playlists:<user>` (owned or collaborated) and
/// `playlist:<id>` (header plus songs). The activity log is not cached.
pub struct PlaylistRepositoryImpl {
    playlists: Arc<dyn PlaylistDao>,
    collaborations: Arc<dyn CollaborationDao>,
    ctx: RepositoryContext,
}

impl PlaylistRepositoryImpl {
    /// Creates a new `PlaylistRepositoryImpl`.
    #[must_use]
    pub fn new(
        playlists: Arc<dyn PlaylistDao>,
        collaborations: Arc<dyn CollaborationDao>,
        ctx: RepositoryContext,
    ) -> Self {
        Self {
            playlists,
            collaborations,
            ctx,
        }
    }

    async fn load_detail(&self, id: &PlaylistId) -> CatalogResult<PlaylistDetail> {
        let header = self
            .ctx
            .db("playlists.find_header", || self.playlists.find_header(id))
            .await?
            .ok_or_else(|| CatalogError::not_found(RESOURCE, id))?;
        let songs = self
            .ctx
            .db("playlists.find_songs", || self.playlists.find_songs(id))
            .await?;

        Ok(PlaylistDetail::new(header, songs))
    }
}

#[async_trait]
impl PlaylistRepository for PlaylistRepositoryImpl {
    async fn add_playlist(&self, playlist: NewPlaylist) -> CatalogResult<PlaylistId> {
        let id = PlaylistId::generate();
        debug!("Repository: add_playlist {} for {}", id, playlist.owner);

        let id = self
            .ctx
            .db("playlists.insert", || self.playlists.insert(&id, &playlist))
            .await?;

        self.ctx
            .invalidate(Mutation::PlaylistAdded {
                owner: playlist.owner,
            })
            .await?;
        Ok(id)
    }

    async fn list_playlists(&self, user: &UserId) -> CatalogResult<Sourced<Vec<PlaylistSummary>>> {
        self.ctx
            .cache()
            .read_through(&CacheKey::playlists_of(user), || {
                self.ctx
                    .db("playlists.find_for_user", || self.playlists.find_for_user(user))
            })
            .await
    }

    async fn delete_playlist(&self, id: &PlaylistId) -> CatalogResult<()> {
        debug!("Repository: delete_playlist {}", id);

        let owner = self
            .ctx
            .db("playlists.find_owner", || self.playlists.find_owner(id))
            .await?
            .ok_or_else(|| CatalogError::not_found(RESOURCE, id))?;
        // read before the cascade removes them
        let collaborators = self
            .ctx
            .db("collaborations.user_ids", || self.collaborations.user_ids(id))
            .await?;

        let deleted = self
            .ctx
            .db("playlists.delete", || self.playlists.delete(id))
            .await?;
        if !deleted {
            return Err(CatalogError::not_found(RESOURCE, id));
        }

        self.ctx
            .invalidate(Mutation::PlaylistDeleted {
                playlist_id: id.clone(),
                owner,
                collaborators,
            })
            .await
    }

    async fn add_playlist_song(&self, id: &PlaylistId, song: &SongId) -> CatalogResult<()> {
        debug!("Repository: add_playlist_song {} <- {}", id, song);
        let inserted = self
            .ctx
            .db("playlists.insert_song", || self.playlists.insert_song(id, song))
            .await?;
        if !inserted {
            return Err(CatalogError::invariant(format!(
                "Song {} is already in playlist {}",
                song, id
            )));
        }

        self.ctx
            .invalidate(Mutation::PlaylistSongsChanged {
                playlist_id: id.clone(),
            })
            .await
    }

    async fn get_playlist_songs(&self, id: &PlaylistId) -> CatalogResult<Sourced<PlaylistDetail>> {
        self.ctx
            .cache()
            .read_through(&CacheKey::playlist_songs(id), || self.load_detail(id))
            .await
    }

    async fn delete_playlist_song(&self, id: &PlaylistId, song: &SongId) -> CatalogResult<()> {
        debug!("Repository: delete_playlist_song {} -> {}", id, song);
        let removed = self
            .ctx
            .db("playlists.delete_song", || self.playlists.delete_song(id, song))
            .await?;
        if !removed {
            return Err(CatalogError::invariant(format!(
                "Song {} is not in playlist {}",
                song, id
            )));
        }

        self.ctx
            .invalidate(Mutation::PlaylistSongsChanged {
                playlist_id: id.clone(),
            })
            .await
    }

    async fn add_activity(
        &self,
        id: &PlaylistId,
        song: &SongId,
        user: &UserId,
        action: ActivityAction,
    ) -> CatalogResult<ActivityId> {
        let record = ActivityRecord {
            id: ActivityId::generate(),
            playlist_id: id.clone(),
            song_id: song.clone(),
            user_id: user.clone(),
            action,
            time: Utc::now(),
        };

        self.ctx
            .db("playlists.insert_activity", || self.playlists.insert_activity(&record))
            .await
    }

    async fn list_activities(&self, id: &PlaylistId) -> CatalogResult<PlaylistActivities> {
        let activities = self
            .ctx
            .db("playlists.find_activities", || self.playlists.find_activities(id))
            .await?;

        Ok(PlaylistActivities {
            playlist_id: id.clone(),
            activities,
        })
    }

    async fn find_owner(&self, id: &PlaylistId) -> CatalogResult<Option<UserId>> {
        self.ctx
            .db("playlists.find_owner", || self.playlists.find_owner(id))
            .await
    }
}
