//! Playlist entities and activity log.

use crate::{PlaylistId, SongSummary, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Listing projection used by `playlists:<user>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: PlaylistId,
    pub name: String,
    /// Username of the owner.
    pub username: String,
}

/// Playlist header with its songs; the value stored under `playlist:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDetail {
    pub id: PlaylistId,
    pub name: String,
    pub username: String,
    pub songs: Vec<SongSummary>,
}

impl PlaylistDetail {
    /// Combines a header row with the playlist's songs.
    #[must_use]
    pub fn new(header: PlaylistSummary, songs: Vec<SongSummary>) -> Self {
        Self {
            id: header.id,
            name: header.name,
            username: header.username,
            songs,
        }
    }
}

/// Kind of change recorded in the playlist activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    Add,
    Delete,
}

impl ActivityAction {
    /// Stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActivityAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "delete" => Ok(Self::Delete),
            other => Err(format!("unknown playlist activity action: {other}")),
        }
    }
}

/// One entry of a playlist's activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistActivity {
    pub username: String,
    pub title: String,
    pub action: ActivityAction,
    pub time: DateTime<Utc>,
}

/// Activity log of one playlist, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistActivities {
    pub playlist_id: PlaylistId,
    pub activities: Vec<PlaylistActivity>,
}

/// A new playlist owned by `owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlaylist {
    pub name: String,
    pub owner: UserId,
}
