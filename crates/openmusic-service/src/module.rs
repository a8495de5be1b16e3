//! Explicit wiring of the data-access layer.
//!
//! [`CatalogModule::connect`] builds every collaborator from an
//! [`AppConfig`] and hands out `Arc`s; nothing is stored in process-wide
//! state. [`CatalogModule::close`] releases the database pool.

use crate::album_like_service::AlbumLikeService;
use crate::authorization::PlaylistAccessResolver;
use crate::export_service::ExportService;
use crate::playlist_service::PlaylistService;
use crate::r#impl::{AlbumLikeServiceImpl, ExportServiceImpl, PlaylistServiceImpl};
use futures::future::join_all;
use openmusic_cache::{create_redis_pool, CacheStore, RedisCacheStore};
use openmusic_config::{AppConfig, QueueConfig};
use openmusic_core::{CatalogResult, HealthCheck, HealthStatus};
use openmusic_jobs::{create_queue_pool, MessageProducer, RedisMessageProducer};
use openmusic_repository::{
    create_pool, AlbumLikeRepository, AlbumLikeRepositoryImpl, AlbumRepository,
    AlbumRepositoryImpl, CollaborationRepository, CollaborationRepositoryImpl,
    DatabasePoolInterface, PgAlbumDaoImpl, PgAlbumLikeDaoImpl, PgCollaborationDaoImpl,
    PgPlaylistDaoImpl, PgSongDaoImpl, PlaylistRepository, PlaylistRepositoryImpl,
    RepositoryContext, SongRepository, SongRepositoryImpl,
};
use std::sync::Arc;
use tracing::{info, warn};

// ============================================================================
// Repositories
// ============================================================================

/// The five catalog repositories.
#[derive(Clone)]
pub struct Repositories {
    pub songs: Arc<dyn SongRepository>,
    pub albums: Arc<dyn AlbumRepository>,
    pub playlists: Arc<dyn PlaylistRepository>,
    pub collaborations: Arc<dyn CollaborationRepository>,
    pub likes: Arc<dyn AlbumLikeRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one cache context.
    #[must_use]
    pub fn postgres(pool: &Arc<dyn DatabasePoolInterface>, ctx: &RepositoryContext) -> Self {
        let albums_dao = Arc::new(PgAlbumDaoImpl::new(Arc::clone(pool)));

        Self {
            songs: Arc::new(SongRepositoryImpl::new(
                Arc::new(PgSongDaoImpl::new(Arc::clone(pool))),
                ctx.clone(),
            )),
            albums: Arc::new(AlbumRepositoryImpl::new(albums_dao.clone(), ctx.clone())),
            playlists: Arc::new(PlaylistRepositoryImpl::new(
                Arc::new(PgPlaylistDaoImpl::new(Arc::clone(pool))),
                Arc::new(PgCollaborationDaoImpl::new(Arc::clone(pool))),
                ctx.clone(),
            )),
            collaborations: Arc::new(CollaborationRepositoryImpl::new(
                Arc::new(PgCollaborationDaoImpl::new(Arc::clone(pool))),
                ctx.clone(),
            )),
            likes: Arc::new(AlbumLikeRepositoryImpl::new(
                Arc::new(PgAlbumLikeDaoImpl::new(Arc::clone(pool))),
                albums_dao,
                ctx.clone(),
            )),
        }
    }
}

// ============================================================================
// Module
// ============================================================================

/// Fully wired catalog: repositories, services, and their resources.
pub struct CatalogModule {
    repositories: Repositories,
    playlist_service: Arc<dyn PlaylistService>,
    album_like_service: Arc<dyn AlbumLikeService>,
    export_service: Arc<dyn ExportService>,
    health_checks: Vec<Arc<dyn HealthCheck>>,
    database: Option<Arc<dyn DatabasePoolInterface>>,
}

impl CatalogModule {
    /// Connects to PostgreSQL, Redis, and the export queue.
    ///
    /// The database and the queue are required. An unreachable cache is
    /// logged and replaced by a disabled store, so reads go to the database.
    pub async fn connect(config: &AppConfig) -> CatalogResult<Self> {
        info!("Wiring catalog module for {}", config.app.environment);

        let pool = Arc::new(create_pool(&config.database).await?);
        let database: Arc<dyn DatabasePoolInterface> = pool.clone();

        let cache = Arc::new(Self::cache_store(config).await);
        let ctx = RepositoryContext::from_config(cache.clone(), &config.cache, &config.database);

        let queue_pool = create_queue_pool(&config.queue).await?;
        let producer: Arc<dyn MessageProducer> =
            Arc::new(RedisMessageProducer::new(Arc::new(queue_pool), &config.queue));

        let repositories = Repositories::postgres(&database, &ctx);
        let health_checks: Vec<Arc<dyn HealthCheck>> = vec![pool, cache];

        let mut module = Self::from_parts(repositories, producer, &config.queue);
        module.health_checks = health_checks;
        module.database = Some(database);

        info!("Catalog module ready");
        Ok(module)
    }

    /// Builds the services over existing repositories and producer.
    #[must_use]
    pub fn from_parts(
        repositories: Repositories,
        producer: Arc<dyn MessageProducer>,
        queue: &QueueConfig,
    ) -> Self {
        let access = PlaylistAccessResolver::new(
            Arc::clone(&repositories.playlists),
            Arc::clone(&repositories.collaborations),
        );

        let playlist_service = Arc::new(PlaylistServiceImpl::new(
            Arc::clone(&repositories.playlists),
            Arc::clone(&repositories.songs),
            Arc::clone(&repositories.collaborations),
        ));
        let album_like_service = Arc::new(AlbumLikeServiceImpl::new(Arc::clone(&repositories.likes)));
        let export_service = Arc::new(ExportServiceImpl::new(access, producer, queue));

        Self {
            repositories,
            playlist_service,
            album_like_service,
            export_service,
            health_checks: Vec::new(),
            database: None,
        }
    }

    async fn cache_store(config: &AppConfig) -> RedisCacheStore {
        if !config.cache.enabled {
            info!("Cache disabled by configuration");
            return RedisCacheStore::disabled();
        }

        match create_redis_pool(&config.cache).await {
            Ok(pool) => RedisCacheStore::new(Arc::new(pool), &config.cache),
            Err(e) => {
                warn!("Cache unavailable at startup, serving reads from the database: {}", e);
                RedisCacheStore::disabled()
            }
        }
    }

    /// Catalog repositories.
    #[must_use]
    pub fn repositories(&self) -> &Repositories {
        &self.repositories
    }

    #[must_use]
    pub fn playlist_service(&self) -> Arc<dyn PlaylistService> {
        Arc::clone(&self.playlist_service)
    }

    #[must_use]
    pub fn album_like_service(&self) -> Arc<dyn AlbumLikeService> {
        Arc::clone(&self.album_like_service)
    }

    #[must_use]
    pub fn export_service(&self) -> Arc<dyn ExportService> {
        Arc::clone(&self.export_service)
    }

    /// Registers an additional health check.
    pub fn add_health_check(&mut self, check: Arc<dyn HealthCheck>) {
        self.health_checks.push(check);
    }

    /// Runs every health check concurrently.
    pub async fn health(&self) -> Vec<(String, HealthStatus)> {
        join_all(self.health_checks.iter().map(|check| async move {
            (check.name().to_string(), check.check().await)
        }))
        .await
    }

    /// Releases the database pool.
    pub async fn close(&self) {
        if let Some(database) = &self.database {
            database.close().await;
        }
        info!("Catalog module closed");
    }
}
