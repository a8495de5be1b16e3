//! Job payloads.

use chrono::{DateTime, Utc};
use openmusic_core::PlaylistId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique job identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Creates a new random job ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the job ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request to export a playlist's songs to an email address.
///
/// Serialized field names are what the export consumer reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPlaylistsJob {
    pub playlist_id: PlaylistId,
    pub target_email: String,
}

/// Wire format of a queued message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobEnvelope {
    pub id: JobId,
    pub queue: String,
    pub payload: serde_json::Value,
    pub enqueued_at: DateTime<Utc>,
}

impl JobEnvelope {
    /// Wraps a payload for `queue`.
    pub fn new<T: Serialize>(queue: &str, payload: &T) -> serde_json::Result<Self> {
        Ok(Self {
            id: JobId::new(),
            queue: queue.to_string(),
            payload: serde_json::to_value(payload)?,
            enqueued_at: Utc::now(),
        })
    }
}
