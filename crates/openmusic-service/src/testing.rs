//! Mock repositories for service tests.

use async_trait::async_trait;
use mockall::mock;
use openmusic_core::{
    ActivityAction, ActivityId, AlbumDetail, AlbumId, AlbumPayload, CatalogResult, CollaborationId, LikeId, NewPlaylist,
    PlaylistActivities, PlaylistDetail, PlaylistId, PlaylistSummary, Song, SongId, SongPayload,
    SongQuery, SongSummary, Sourced, UserId,
};
use openmusic_repository::{
    AlbumLikeRepository, AlbumRepository, CollaborationRepository, PlaylistRepository, SongRepository,
};

mock! {
    pub PlaylistRepo {}

    #[async_trait]
    impl PlaylistRepository for PlaylistRepo {
        async fn add_playlist(&self, playlist: NewPlaylist) -> CatalogResult<PlaylistId>;
        async fn list_playlists(&self, user: &UserId) -> CatalogResult<Sourced<Vec<PlaylistSummary>>>;
        async fn delete_playlist(&self, id: &PlaylistId) -> CatalogResult<()>;
        async fn add_playlist_song(&self, id: &PlaylistId, song: &SongId) -> CatalogResult<()>;
        async fn get_playlist_songs(&self, id: &PlaylistId) -> CatalogResult<Sourced<PlaylistDetail>>;
        async fn delete_playlist_song(&self, id: &PlaylistId, song: &SongId) -> CatalogResult<()>;
        async fn add_activity(
            &self,
            id: &PlaylistId,
            song: &SongId,
            user: &UserId,
            action: ActivityAction,
        ) -> CatalogResult<ActivityId>;
        async fn list_activities(&self, id: &PlaylistId) -> CatalogResult<PlaylistActivities>;
        async fn find_owner(&self, id: &PlaylistId) -> CatalogResult<Option<UserId>>;
    }
}

mock! {
    pub CollaborationRepo {}

    #[async_trait]
    impl CollaborationRepository for CollaborationRepo {
        async fn add_collaborator(&self, playlist: &PlaylistId, user: &UserId) -> CatalogResult<CollaborationId>;
        async fn remove_collaborator(&self, playlist: &PlaylistId, user: &UserId) -> CatalogResult<()>;
        async fn verify_collaborator(&self, playlist: &PlaylistId, user: &UserId) -> CatalogResult<()>;
        async fn collaborator_ids(&self, playlist: &PlaylistId) -> CatalogResult<Vec<UserId>>;
    }
}

mock! {
    pub SongRepo {}

    #[async_trait]
    impl SongRepository for SongRepo {
        async fn add_song(&self, payload: SongPayload) -> CatalogResult<SongId>;
        async fn list_songs(&self, query: &SongQuery) -> CatalogResult<Sourced<Vec<SongSummary>>>;
        async fn get_song(&self, id: &SongId) -> CatalogResult<Sourced<Song>>;
        async fn edit_song(&self, id: &SongId, payload: SongPayload) -> CatalogResult<()>;
        async fn delete_song(&self, id: &SongId) -> CatalogResult<()>;
        async fn verify_song_exists(&self, id: &SongId) -> CatalogResult<()>;
    }
}

mock! {
    pub AlbumRepo {}

    #[async_trait]
    impl AlbumRepository for AlbumRepo {
        async fn add_album(&self, payload: AlbumPayload) -> CatalogResult<AlbumId>;
        async fn get_album(&self, id: &AlbumId) -> CatalogResult<Sourced<AlbumDetail>>;
        async fn edit_album(&self, id: &AlbumId, payload: AlbumPayload) -> CatalogResult<()>;
        async fn delete_album(&self, id: &AlbumId) -> CatalogResult<()>;
        async fn update_album_cover(&self, id: &AlbumId, cover_url: &str) -> CatalogResult<()>;
        async fn verify_album_exists(&self, id: &AlbumId) -> CatalogResult<()>;
    }
}

mock! {
    pub AlbumLikeRepo {}

    #[async_trait]
    impl AlbumLikeRepository for AlbumLikeRepo {
        async fn add_like(&self, user: &UserId, album: &AlbumId) -> CatalogResult<LikeId>;
        async fn remove_like(&self, user: &UserId, album: &AlbumId) -> CatalogResult<()>;
        async fn like_count(&self, album: &AlbumId) -> CatalogResult<Sourced<u64>>;
    }
}

/// Playlist repository mock whose `find_owner` always answers `owner`.
pub fn playlists_owned_by(owner: &'static str) -> MockPlaylistRepo {
    let mut playlists = MockPlaylistRepo::new();
    playlists
        .expect_find_owner()
        .returning(move |_| Ok(Some(UserId::new(owner))));
    playlists
}

/// Collaboration mock where exactly `members` are collaborators.
pub fn collaborators(members: &'static [&'static str]) -> MockCollaborationRepo {
    let mut collaborations = MockCollaborationRepo::new();
    collaborations
        .expect_verify_collaborator()
        .returning(move |playlist, user| {
            if members.contains(&user.as_str()) {
                Ok(())
            } else {
                Err(openmusic_core::CatalogError::not_found(
                    "Collaboration",
                    format!("{}/{}", playlist, user),
                ))
            }
        });
    collaborations
}
