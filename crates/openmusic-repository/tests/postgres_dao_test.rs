//! Integration tests for the PostgreSQL DAOs and repositories.
//!
//! These tests run against a real PostgreSQL database using testcontainers.
//! Requires Docker; run with `cargo test -- --ignored`.

mod common;

use common::TestDatabase;
use openmusic_cache::MemoryCacheStore;
use openmusic_config::{CacheConfig, DatabaseConfig};
use openmusic_core::{
    AlbumId, AlbumPayload, CatalogError, DataSource, NewPlaylist, PlaylistId, Song, SongId,
    SongPayload, SongQuery, UserId,
};
use openmusic_repository::{
    AlbumDao, AlbumLikeRepository, AlbumLikeRepositoryImpl, AlbumRepository, AlbumRepositoryImpl,
    CollaborationRepository, CollaborationRepositoryImpl, PgAlbumDaoImpl, PgAlbumLikeDaoImpl,
    PgCollaborationDaoImpl, PgPlaylistDaoImpl, PgSongDaoImpl, PlaylistDao, PlaylistRepository,
    PlaylistRepositoryImpl, RepositoryContext, SongDao, SongRepository, SongRepositoryImpl,
};
use std::sync::Arc;

fn context(store: Arc<MemoryCacheStore>) -> RepositoryContext {
    RepositoryContext::from_config(store, &CacheConfig::default(), &DatabaseConfig::default())
}

fn song(id: &str, title: &str, album: Option<&AlbumId>) -> Song {
    Song {
        id: SongId::new(id),
        title: title.to_string(),
        year: 2005,
        genre: "Rock".to_string(),
        performer: "Coldplay".to_string(),
        duration: Some(300),
        album_id: album.cloned(),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_song_update_reports_previous_album() {
    let db = TestDatabase::new().await;
    let albums = PgAlbumDaoImpl::new(db.pool());
    let songs = PgSongDaoImpl::new(db.pool());

    let a1 = AlbumId::new("album-1");
    let a2 = AlbumId::new("album-2");
    for id in [&a1, &a2] {
        albums
            .insert(&openmusic_core::Album {
                id: id.clone(),
                name: "X&Y".to_string(),
                year: 2005,
                cover_url: None,
            })
            .await
            .expect("insert album");
    }

    songs.insert(&song("song-1", "Fix You", Some(&a1))).await.expect("insert song");

    let affected = songs
        .update(&song("song-1", "Fix You", Some(&a2)))
        .await
        .expect("update")
        .expect("row");
    assert_eq!(affected.album_id, Some(a1));

    let stored = songs.find_by_id(&SongId::new("song-1")).await.expect("find").expect("row");
    assert_eq!(stored.album_id, Some(a2));

    assert!(songs
        .update(&song("song-missing", "x", None))
        .await
        .expect("update")
        .is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_song_writes_report_containing_playlists() {
    let db = TestDatabase::new().await;
    db.add_user("user-1", "dicoding").await;
    let songs = PgSongDaoImpl::new(db.pool());
    let playlists = PgPlaylistDaoImpl::new(db.pool());

    let id = SongId::new("song-1");
    songs.insert(&song("song-1", "Shiver", None)).await.expect("insert song");
    assert!(songs.exists(&id).await.expect("exists"));
    assert!(!songs.exists(&SongId::new("song-missing")).await.expect("exists"));

    let unlisted = songs
        .update(&song("song-1", "Shiver", None))
        .await
        .expect("update")
        .expect("row");
    assert!(unlisted.playlists.is_empty());

    let playlist = PlaylistId::new("playlist-1");
    playlists
        .insert(
            &playlist,
            &NewPlaylist {
                name: "Parachutes".to_string(),
                owner: UserId::new("user-1"),
            },
        )
        .await
        .expect("insert playlist");
    playlists.insert_song(&playlist, &id).await.expect("link");

    let edited = songs
        .update(&song("song-1", "Sparks", None))
        .await
        .expect("update")
        .expect("row");
    assert_eq!(edited.playlists, vec![playlist.clone()]);

    let deleted = songs.delete(&id).await.expect("delete").expect("row");
    assert_eq!(deleted.playlists, vec![playlist.clone()]);
    assert!(!songs.exists(&id).await.expect("exists"));
    assert!(playlists.find_songs(&playlist).await.expect("songs").is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_song_search_is_case_insensitive_substring() {
    let db = TestDatabase::new().await;
    let songs = PgSongDaoImpl::new(db.pool());
    songs.insert(&song("song-1", "Speed of Sound", None)).await.expect("insert");
    songs.insert(&song("song-2", "Talk", None)).await.expect("insert");

    let found = songs
        .search(&SongQuery {
            title: Some("sOUnd".to_string()),
            performer: None,
        })
        .await
        .expect("search");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, SongId::new("song-1"));

    let all = songs
        .search(&SongQuery {
            title: None,
            performer: Some("cold".to_string()),
        })
        .await
        .expect("search");
    assert_eq!(all.len(), 2);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_album_delete_detaches_songs() {
    let db = TestDatabase::new().await;
    let albums = PgAlbumDaoImpl::new(db.pool());
    let songs = PgSongDaoImpl::new(db.pool());
    let album = AlbumId::new("album-1");
    albums
        .insert(&openmusic_core::Album {
            id: album.clone(),
            name: "Parachutes".to_string(),
            year: 2000,
            cover_url: None,
        })
        .await
        .expect("insert album");
    songs.insert(&song("song-1", "Yellow", Some(&album))).await.expect("insert");
    assert!(albums.exists(&album).await.expect("exists"));

    let detached = albums.delete(&album).await.expect("delete").expect("row");
    assert_eq!(detached, vec![SongId::new("song-1")]);
    assert_eq!(
        songs.find_by_id(&SongId::new("song-1")).await.expect("find").expect("row").album_id,
        None
    );
    assert!(albums.delete(&album).await.expect("delete").is_none());
    assert!(!albums.exists(&album).await.expect("exists"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_repositories_keep_cache_coherent() {
    let db = TestDatabase::new().await;
    db.add_user("user-1", "dicoding").await;
    db.add_user("user-2", "friend").await;
    let store = Arc::new(MemoryCacheStore::new());

    let albums = AlbumRepositoryImpl::new(Arc::new(PgAlbumDaoImpl::new(db.pool())), context(store.clone()));
    let songs = SongRepositoryImpl::new(Arc::new(PgSongDaoImpl::new(db.pool())), context(store.clone()));
    let playlists = PlaylistRepositoryImpl::new(
        Arc::new(PgPlaylistDaoImpl::new(db.pool())),
        Arc::new(PgCollaborationDaoImpl::new(db.pool())),
        context(store.clone()),
    );
    let collaborations =
        CollaborationRepositoryImpl::new(Arc::new(PgCollaborationDaoImpl::new(db.pool())), context(store.clone()));
    let likes = AlbumLikeRepositoryImpl::new(
        Arc::new(PgAlbumLikeDaoImpl::new(db.pool())),
        Arc::new(PgAlbumDaoImpl::new(db.pool())),
        context(store.clone()),
    );

    let album = albums
        .add_album(AlbumPayload {
            name: "Viva la Vida".to_string(),
            year: 2008,
        })
        .await
        .expect("add album");
    assert!(albums.get_album(&album).await.expect("get").value.songs.is_empty());

    let song_id = songs
        .add_song(SongPayload {
            title: "Lovers in Japan".to_string(),
            year: 2008,
            genre: "Rock".to_string(),
            performer: "Coldplay".to_string(),
            duration: None,
            album_id: Some(album.clone()),
        })
        .await
        .expect("add song");

    let detail = albums.get_album(&album).await.expect("get");
    assert_eq!(detail.source, DataSource::Database);
    assert_eq!(detail.value.songs.len(), 1);

    let owner = UserId::new("user-1");
    let friend = UserId::new("user-2");
    let playlist = playlists
        .add_playlist(NewPlaylist {
            name: "Morning".to_string(),
            owner: owner.clone(),
        })
        .await
        .expect("add playlist");
    collaborations.add_collaborator(&playlist, &friend).await.expect("collab");
    assert!(matches!(
        collaborations.add_collaborator(&playlist, &friend).await,
        Err(CatalogError::Invariant(_))
    ));
    playlists.add_playlist_song(&playlist, &song_id).await.expect("add song");

    assert_eq!(playlists.list_playlists(&friend).await.expect("list").value.len(), 1);
    assert_eq!(
        playlists.get_playlist_songs(&playlist).await.expect("songs").value.songs.len(),
        1
    );

    likes.add_like(&owner, &album).await.expect("like");
    assert!(matches!(
        likes.add_like(&owner, &album).await,
        Err(CatalogError::Invariant(_))
    ));
    assert_eq!(likes.like_count(&album).await.expect("count").value, 1);
    assert!(likes.like_count(&album).await.expect("count").is_cached());

    playlists.delete_playlist(&playlist).await.expect("delete");
    assert!(playlists.list_playlists(&owner).await.expect("list").value.is_empty());
    assert!(playlists.list_playlists(&friend).await.expect("list").value.is_empty());
    assert!(matches!(
        playlists.get_playlist_songs(&playlist).await,
        Err(CatalogError::NotFound { .. })
    ));
}
