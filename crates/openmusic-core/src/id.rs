//! Typed ID wrappers for catalog entities.
//!
//! Identifiers are opaque strings of the form `<prefix>-<16 chars>`, e.g.
//! `song-3f9c0d1e2b7a4c55`. Users are created elsewhere, so [`UserId`] has
//! no generator.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

/// Length of the random segment of a generated identifier.
const RANDOM_SEGMENT_LEN: usize = 16;

fn generate(prefix: &str) -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &simple[..RANDOM_SEGMENT_LEN])
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

macro_rules! generated_id {
    ($name:ident, $prefix:literal) => {
        impl $name {
            /// Identifier prefix.
            pub const PREFIX: &'static str = $prefix;

            /// Generates a fresh identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(generate(Self::PREFIX))
            }
        }
    };
}

string_id!(
    /// Identifier of a user (owner, collaborator, liker).
    UserId
);
string_id!(
    /// Identifier of a song.
    SongId
);
string_id!(
    /// Identifier of an album.
    AlbumId
);
string_id!(
    /// Identifier of a playlist.
    PlaylistId
);
string_id!(
    /// Identifier of a playlist collaboration record.
    CollaborationId
);
string_id!(
    /// Identifier of an album like.
    LikeId
);
string_id!(
    /// Identifier of a playlist activity entry.
    ActivityId
);

generated_id!(SongId, "song");
generated_id!(AlbumId, "album");
generated_id!(PlaylistId, "playlist");
generated_id!(CollaborationId, "collab");
generated_id!(LikeId, "like");
generated_id!(ActivityId, "activity");

/// Generates the identifier of a playlist ↔ song link row.
#[must_use]
pub fn playlist_song_id() -> String {
    generate("playlist-song")
}
