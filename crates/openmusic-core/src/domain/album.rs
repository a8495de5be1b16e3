//! Album entity.

use crate::{AlbumId, SongSummary};
use serde::{Deserialize, Serialize};

/// An album row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub year: i32,
    pub cover_url: Option<String>,
}

/// Album together with its songs; the value stored under `album:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDetail {
    #[serde(flatten)]
    pub album: Album,
    pub songs: Vec<SongSummary>,
}

/// Attributes supplied when adding or editing an album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumPayload {
    pub name: String,
    pub year: i32,
}
