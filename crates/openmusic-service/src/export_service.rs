//! Playlist export service trait.

use async_trait::async_trait;
use openmusic_core::{CatalogResult, Interface, PlaylistId, UserId};
use openmusic_jobs::JobId;

/// Requests asynchronous exports of playlists.
#[async_trait]
pub trait ExportService: Interface + Send + Sync {
    /// Enqueues an export of `playlist` to `target_email`. Owner only.
    ///
    /// Returns once the job is accepted by the queue; rendering and delivery
    /// happen in a separate consumer.
    async fn export_playlist(
        &self,
        playlist: &PlaylistId,
        caller: &UserId,
        target_email: &str,
    ) -> CatalogResult<JobId>;
}
