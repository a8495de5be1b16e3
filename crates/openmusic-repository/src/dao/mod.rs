//! DAO (Data Access Object) layer.
//!
//! DAOs provide low-level, single-source data access abstractions. They know
//! nothing about caching; existence is reported through `Option` and `bool`
//! results derived from row counts.
//!
//! Hierarchy:
//! ```text
//! Service → Repository (interface + impl) → DAO (interface + impl) → DB
//! ```

pub mod album_dao;
pub mod album_like_dao;
pub mod collaboration_dao;
pub mod r#impl;
pub mod playlist_dao;
pub mod song_dao;

pub use album_dao::AlbumDao;
pub use album_like_dao::AlbumLikeDao;
pub use collaboration_dao::CollaborationDao;
pub use playlist_dao::{ActivityRecord, PlaylistDao};
pub use song_dao::SongDao;

pub use r#impl::{
    PgAlbumDaoImpl, PgAlbumLikeDaoImpl, PgCollaborationDaoImpl, PgPlaylistDaoImpl, PgSongDaoImpl,
};
