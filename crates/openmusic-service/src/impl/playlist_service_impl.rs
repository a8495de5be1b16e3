//! Playlist service implementation.

use crate::authorization::PlaylistAccessResolver;
use crate::playlist_service::PlaylistService;
use async_trait::async_trait;
use openmusic_core::{
    ActivityAction, CatalogResult, CollaborationId, NewPlaylist, PlaylistActivities,
    PlaylistDetail, PlaylistId, PlaylistSummary, SongId, Sourced, UserId,
};
use openmusic_repository::{CollaborationRepository, PlaylistRepository, SongRepository};
use std::sync::Arc;
use tracing::{debug, info};

/// Playlist service over the playlist, song, and collaboration repositories.
pub struct PlaylistServiceImpl {
    playlists: Arc<dyn PlaylistRepository>,
    songs: Arc<dyn SongRepository>,
    collaborations: Arc<dyn CollaborationRepository>,
    access: PlaylistAccessResolver,
}

impl PlaylistServiceImpl {
    /// Creates a new playlist service.
    #[must_use]
    pub fn new(
        playlists: Arc<dyn PlaylistRepository>,
        songs: Arc<dyn SongRepository>,
        collaborations: Arc<dyn CollaborationRepository>,
    ) -> Self {
        let access = PlaylistAccessResolver::new(Arc::clone(&playlists), Arc::clone(&collaborations));
        Self {
            playlists,
            songs,
            collaborations,
            access,
        }
    }

    /// The resolver used for access checks.
    #[must_use]
    pub fn access(&self) -> &PlaylistAccessResolver {
        &self.access
    }
}

#[async_trait]
impl PlaylistService for PlaylistServiceImpl {
    async fn create_playlist(&self, owner: &UserId, name: &str) -> CatalogResult<PlaylistId> {
        debug!("Creating playlist '{}' for {}", name, owner);

        let id = self
            .playlists
            .add_playlist(NewPlaylist {
                name: name.to_string(),
                owner: owner.clone(),
            })
            .await?;

        info!("Playlist created: {}", id);
        Ok(id)
    }

    async fn list_playlists(&self, user: &UserId) -> CatalogResult<Sourced<Vec<PlaylistSummary>>> {
        self.playlists.list_playlists(user).await
    }

    async fn delete_playlist(&self, playlist: &PlaylistId, caller: &UserId) -> CatalogResult<()> {
        self.access.verify_owner(playlist, caller).await?;
        self.playlists.delete_playlist(playlist).await?;
        info!("Playlist deleted: {}", playlist);
        Ok(())
    }

    async fn add_song(&self, playlist: &PlaylistId, song: &SongId, caller: &UserId) -> CatalogResult<()> {
        debug!("Adding {} to {} as {}", song, playlist, caller);

        self.access.verify_access(playlist, caller).await?;
        self.songs.verify_song_exists(song).await?;
        self.playlists.add_playlist_song(playlist, song).await?;
        self.playlists
            .add_activity(playlist, song, caller, ActivityAction::Add)
            .await?;
        Ok(())
    }

    async fn get_songs(&self, playlist: &PlaylistId, caller: &UserId) -> CatalogResult<Sourced<PlaylistDetail>> {
        self.access.verify_access(playlist, caller).await?;
        self.playlists.get_playlist_songs(playlist).await
    }

    async fn remove_song(&self, playlist: &PlaylistId, song: &SongId, caller: &UserId) -> CatalogResult<()> {
        debug!("Removing {} from {} as {}", song, playlist, caller);

        self.access.verify_access(playlist, caller).await?;
        self.playlists.delete_playlist_song(playlist, song).await?;
        self.playlists
            .add_activity(playlist, song, caller, ActivityAction::Delete)
            .await?;
        Ok(())
    }

    async fn get_activities(&self, playlist: &PlaylistId, caller: &UserId) -> CatalogResult<PlaylistActivities> {
        self.access.verify_access(playlist, caller).await?;
        self.playlists.list_activities(playlist).await
    }

    async fn add_collaborator(
        &self,
        playlist: &PlaylistId,
        caller: &UserId,
        collaborator: &UserId,
    ) -> CatalogResult<CollaborationId> {
        self.access.verify_owner(playlist, caller).await?;
        let id = self.collaborations.add_collaborator(playlist, collaborator).await?;
        info!("{} now collaborates on {}", collaborator, playlist);
        Ok(id)
    }

    async fn remove_collaborator(
        &self,
        playlist: &PlaylistId,
        caller: &UserId,
        collaborator: &UserId,
    ) -> CatalogResult<()> {
        self.access.verify_owner(playlist, caller).await?;
        self.collaborations.remove_collaborator(playlist, collaborator).await?;
        info!("{} no longer collaborates on {}", collaborator, playlist);
        Ok(())
    }
}
