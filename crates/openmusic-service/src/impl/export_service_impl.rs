//! Export service implementation.

use crate::authorization::PlaylistAccessResolver;
use crate::export_service::ExportService;
use async_trait::async_trait;
use openmusic_config::QueueConfig;
use openmusic_core::{CatalogResult, PlaylistId, UserId};
use openmusic_jobs::{ExportPlaylistsJob, JobEnvelope, JobId, MessageProducer};
use std::sync::Arc;
use tracing::info;

/// Owner-checked producer of [`ExportPlaylistsJob`]s.
pub struct ExportServiceImpl {
    access: PlaylistAccessResolver,
    producer: Arc<dyn MessageProducer>,
    queue: String,
}

impl ExportServiceImpl {
    /// Creates a service that enqueues on `config.export_queue`.
    #[must_use]
    pub fn new(access: PlaylistAccessResolver, producer: Arc<dyn MessageProducer>, config: &QueueConfig) -> Self {
        Self {
            access,
            producer,
            queue: config.export_queue.clone(),
        }
    }
}

#[async_trait]
impl ExportService for ExportServiceImpl {
    async fn export_playlist(
        &self,
        playlist: &PlaylistId,
        caller: &UserId,
        target_email: &str,
    ) -> CatalogResult<JobId> {
        self.access.verify_owner(playlist, caller).await?;

        let job = ExportPlaylistsJob {
            playlist_id: playlist.clone(),
            target_email: target_email.to_string(),
        };
        let envelope = JobEnvelope::new(&self.queue, &job)?;
        let id = self.producer.send(envelope).await?;

        info!("Export of {} queued as job {}", playlist, id);
        Ok(id)
    }
}
