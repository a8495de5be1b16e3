//! In-memory DAO fakes and failing cache stores for unit tests.

use crate::dao::{ActivityRecord, AlbumDao, AlbumLikeDao, CollaborationDao, PlaylistDao, SongDao};
use crate::{CacheAside, RepositoryContext};
use async_trait::async_trait;
use openmusic_cache::{CacheError, CacheResult, CacheStore, Invalidator, MemoryCacheStore};
use openmusic_core::{
    AffectedSong, Album, AlbumId, AlbumPayload, ActivityId, CatalogResult, CollaborationId,
    LikeId, NewPlaylist, PlaylistActivity, PlaylistId, PlaylistSummary, Song, SongId, SongQuery,
    SongSummary, UserId,
};
use openmusic_resilience::RetryPolicy;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct State {
    users: HashMap<UserId, String>,
    songs: BTreeMap<SongId, Song>,
    albums: BTreeMap<AlbumId, Album>,
    playlists: BTreeMap<PlaylistId, NewPlaylist>,
    playlist_songs: Vec<(PlaylistId, SongId)>,
    collaborations: Vec<(CollaborationId, PlaylistId, UserId)>,
    activities: Vec<ActivityRecord>,
    likes: Vec<(LikeId, UserId, AlbumId)>,
}

impl State {
    fn playlists_listing(&self, song: &SongId) -> Vec<PlaylistId> {
        self.playlist_songs
            .iter()
            .filter(|(_, sid)| sid == song)
            .map(|(pid, _)| pid.clone())
            .collect()
    }
}

/// One in-memory database implementing every DAO trait.
///
/// `queries` counts every DAO call so tests can assert cache hits.
#[derive(Default)]
pub struct InMemoryCatalog {
    state: Mutex<State>,
    queries: AtomicUsize,
    write_delay: Mutex<Option<Duration>>,
}

impl InMemoryCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_user(&self, id: &str, username: &str) {
        self.state
            .lock()
            .unwrap()
            .users
            .insert(UserId::new(id), username.to_string());
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn reset_queries(&self) {
        self.queries.store(0, Ordering::SeqCst);
    }

    /// Delays every subsequent write before it is applied.
    pub fn set_write_delay(&self, delay: Duration) {
        *self.write_delay.lock().unwrap() = Some(delay);
    }

    fn read(&self) -> std::sync::MutexGuard<'_, State> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.state.lock().unwrap()
    }

    async fn write(&self) -> std::sync::MutexGuard<'_, State> {
        let delay = *self.write_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.read()
    }
}

fn summary(song: &Song) -> SongSummary {
    SongSummary::from(song)
}

fn contains_ci(haystack: &str, needle: Option<&String>) -> bool {
    match needle.filter(|n| !n.is_empty()) {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

#[async_trait]
impl SongDao for InMemoryCatalog {
    async fn insert(&self, song: &Song) -> CatalogResult<SongId> {
        let mut state = self.write().await;
        state.songs.insert(song.id.clone(), song.clone());
        Ok(song.id.clone())
    }

    async fn find_all_summaries(&self) -> CatalogResult<Vec<SongSummary>> {
        Ok(self.read().songs.values().map(summary).collect())
    }

    async fn search(&self, query: &SongQuery) -> CatalogResult<Vec<SongSummary>> {
        Ok(self
            .read()
            .songs
            .values()
            .filter(|s| contains_ci(&s.title, query.title.as_ref()))
            .filter(|s| contains_ci(&s.performer, query.performer.as_ref()))
            .map(summary)
            .collect())
    }

    async fn find_by_id(&self, id: &SongId) -> CatalogResult<Option<Song>> {
        Ok(self.read().songs.get(id).cloned())
    }

    async fn update(&self, song: &Song) -> CatalogResult<Option<AffectedSong>> {
        let mut state = self.write().await;
        let playlists = state.playlists_listing(&song.id);
        Ok(state.songs.get_mut(&song.id).map(|existing| {
            let previous = existing.album_id.clone();
            *existing = song.clone();
            AffectedSong {
                id: song.id.clone(),
                album_id: previous,
                playlists,
            }
        }))
    }

    async fn delete(&self, id: &SongId) -> CatalogResult<Option<AffectedSong>> {
        let mut state = self.write().await;
        let removed = state.songs.remove(id);
        let playlists = state.playlists_listing(id);
        state.playlist_songs.retain(|(_, song)| song != id);
        Ok(removed.map(|song| AffectedSong {
            id: song.id,
            album_id: song.album_id,
            playlists,
        }))
    }

    async fn exists(&self, id: &SongId) -> CatalogResult<bool> {
        Ok(self.read().songs.contains_key(id))
    }
}

#[async_trait]
impl AlbumDao for InMemoryCatalog {
    async fn insert(&self, album: &Album) -> CatalogResult<AlbumId> {
        let mut state = self.write().await;
        state.albums.insert(album.id.clone(), album.clone());
        Ok(album.id.clone())
    }

    async fn find_by_id(&self, id: &AlbumId) -> CatalogResult<Option<Album>> {
        Ok(self.read().albums.get(id).cloned())
    }

    async fn find_songs(&self, id: &AlbumId) -> CatalogResult<Vec<SongSummary>> {
        Ok(self
            .read()
            .songs
            .values()
            .filter(|s| s.album_id.as_ref() == Some(id))
            .map(summary)
            .collect())
    }

    async fn update(&self, id: &AlbumId, payload: &AlbumPayload) -> CatalogResult<bool> {
        let mut state = self.write().await;
        Ok(state
            .albums
            .get_mut(id)
            .map(|album| {
                album.name = payload.name.clone();
                album.year = payload.year;
            })
            .is_some())
    }

    async fn update_cover(&self, id: &AlbumId, cover_url: &str) -> CatalogResult<bool> {
        let mut state = self.write().await;
        Ok(state
            .albums
            .get_mut(id)
            .map(|album| album.cover_url = Some(cover_url.to_string()))
            .is_some())
    }

    async fn delete(&self, id: &AlbumId) -> CatalogResult<Option<Vec<SongId>>> {
        let mut state = self.write().await;
        if state.albums.remove(id).is_none() {
            return Ok(None);
        }
        let mut detached = Vec::new();
        for song in state.songs.values_mut() {
            if song.album_id.as_ref() == Some(id) {
                song.album_id = None;
                detached.push(song.id.clone());
            }
        }
        state.likes.retain(|(_, _, album)| album != id);
        Ok(Some(detached))
    }

    async fn exists(&self, id: &AlbumId) -> CatalogResult<bool> {
        Ok(self.read().albums.contains_key(id))
    }
}

#[async_trait]
impl PlaylistDao for InMemoryCatalog {
    async fn insert(&self, id: &PlaylistId, playlist: &NewPlaylist) -> CatalogResult<PlaylistId> {
        let mut state = self.write().await;
        state.playlists.insert(id.clone(), playlist.clone());
        Ok(id.clone())
    }

    async fn find_for_user(&self, user: &UserId) -> CatalogResult<Vec<PlaylistSummary>> {
        let state = self.read();
        Ok(state
            .playlists
            .iter()
            .filter(|(id, p)| {
                &p.owner == user
                    || state
                        .collaborations
                        .iter()
                        .any(|(_, pid, uid)| pid == *id && uid == user)
            })
            .map(|(id, p)| PlaylistSummary {
                id: id.clone(),
                name: p.name.clone(),
                username: state.users.get(&p.owner).cloned().unwrap_or_default(),
            })
            .collect())
    }

    async fn find_owner(&self, id: &PlaylistId) -> CatalogResult<Option<UserId>> {
        Ok(self.read().playlists.get(id).map(|p| p.owner.clone()))
    }

    async fn find_header(&self, id: &PlaylistId) -> CatalogResult<Option<PlaylistSummary>> {
        let state = self.read();
        Ok(state.playlists.get(id).map(|p| PlaylistSummary {
            id: id.clone(),
            name: p.name.clone(),
            username: state.users.get(&p.owner).cloned().unwrap_or_default(),
        }))
    }

    async fn find_songs(&self, id: &PlaylistId) -> CatalogResult<Vec<SongSummary>> {
        let state = self.read();
        Ok(state
            .playlist_songs
            .iter()
            .filter(|(pid, _)| pid == id)
            .filter_map(|(_, sid)| state.songs.get(sid).map(summary))
            .collect())
    }

    async fn delete(&self, id: &PlaylistId) -> CatalogResult<bool> {
        let mut state = self.write().await;
        let removed = state.playlists.remove(id).is_some();
        state.playlist_songs.retain(|(pid, _)| pid != id);
        state.collaborations.retain(|(_, pid, _)| pid != id);
        state.activities.retain(|a| &a.playlist_id != id);
        Ok(removed)
    }

    async fn insert_song(&self, id: &PlaylistId, song: &SongId) -> CatalogResult<bool> {
        let mut state = self.write().await;
        let link = (id.clone(), song.clone());
        if state.playlist_songs.contains(&link) {
            return Ok(false);
        }
        state.playlist_songs.push(link);
        Ok(true)
    }

    async fn delete_song(&self, id: &PlaylistId, song: &SongId) -> CatalogResult<bool> {
        let mut state = self.write().await;
        let before = state.playlist_songs.len();
        state.playlist_songs.retain(|(pid, sid)| !(pid == id && sid == song));
        Ok(state.playlist_songs.len() < before)
    }

    async fn insert_activity(&self, record: &ActivityRecord) -> CatalogResult<ActivityId> {
        let mut state = self.write().await;
        state.activities.push(record.clone());
        Ok(record.id.clone())
    }

    async fn find_activities(&self, id: &PlaylistId) -> CatalogResult<Vec<PlaylistActivity>> {
        let state = self.read();
        let mut activities: Vec<PlaylistActivity> = state
            .activities
            .iter()
            .filter(|a| &a.playlist_id == id)
            .filter_map(|a| {
                let username = state.users.get(&a.user_id)?.clone();
                let title = state.songs.get(&a.song_id)?.title.clone();
                Some(PlaylistActivity {
                    username,
                    title,
                    action: a.action,
                    time: a.time,
                })
            })
            .collect();
        activities.sort_by_key(|a| a.time);
        Ok(activities)
    }
}

#[async_trait]
impl CollaborationDao for InMemoryCatalog {
    async fn insert(
        &self,
        id: &CollaborationId,
        playlist: &PlaylistId,
        user: &UserId,
    ) -> CatalogResult<CollaborationId> {
        let mut state = self.write().await;
        state
            .collaborations
            .push((id.clone(), playlist.clone(), user.clone()));
        Ok(id.clone())
    }

    async fn delete(&self, playlist: &PlaylistId, user: &UserId) -> CatalogResult<bool> {
        let mut state = self.write().await;
        let before = state.collaborations.len();
        state
            .collaborations
            .retain(|(_, pid, uid)| !(pid == playlist && uid == user));
        Ok(state.collaborations.len() < before)
    }

    async fn exists(&self, playlist: &PlaylistId, user: &UserId) -> CatalogResult<bool> {
        Ok(self
            .read()
            .collaborations
            .iter()
            .any(|(_, pid, uid)| pid == playlist && uid == user))
    }

    async fn user_ids(&self, playlist: &PlaylistId) -> CatalogResult<Vec<UserId>> {
        Ok(self
            .read()
            .collaborations
            .iter()
            .filter(|(_, pid, _)| pid == playlist)
            .map(|(_, _, uid)| uid.clone())
            .collect())
    }
}

#[async_trait]
impl AlbumLikeDao for InMemoryCatalog {
    async fn insert(&self, id: &LikeId, user: &UserId, album: &AlbumId) -> CatalogResult<LikeId> {
        let mut state = self.write().await;
        state.likes.push((id.clone(), user.clone(), album.clone()));
        Ok(id.clone())
    }

    async fn delete(&self, user: &UserId, album: &AlbumId) -> CatalogResult<bool> {
        let mut state = self.write().await;
        let before = state.likes.len();
        state.likes.retain(|(_, uid, aid)| !(uid == user && aid == album));
        Ok(state.likes.len() < before)
    }

    async fn exists(&self, user: &UserId, album: &AlbumId) -> CatalogResult<bool> {
        Ok(self
            .read()
            .likes
            .iter()
            .any(|(_, uid, aid)| uid == user && aid == album))
    }

    async fn count(&self, album: &AlbumId) -> CatalogResult<u64> {
        Ok(self.read().likes.iter().filter(|(_, _, aid)| aid == album).count() as u64)
    }
}

/// A cache backend that is down.
pub struct UnavailableCacheStore;

#[async_trait]
impl CacheStore for UnavailableCacheStore {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> CacheResult<()> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _key: &str) -> CacheResult<()> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }
}

/// Context over `store` with fast retries and a generous query timeout.
pub fn context(store: Arc<dyn CacheStore>) -> RepositoryContext {
    context_with_timeout(store, Duration::from_secs(5))
}

pub fn context_with_timeout(store: Arc<dyn CacheStore>, db_timeout: Duration) -> RepositoryContext {
    let retry = RetryPolicy {
        max_attempts: 2,
        initial_delay: Duration::from_millis(1),
        jitter: false,
        ..Default::default()
    };
    RepositoryContext::new(
        Arc::new(CacheAside::new(Arc::clone(&store), None)),
        Arc::new(Invalidator::new(store, retry)),
        db_timeout,
    )
}

pub fn memory_store() -> Arc<MemoryCacheStore> {
    Arc::new(MemoryCacheStore::new())
}
