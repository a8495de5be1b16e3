//! Repository implementations.
//!
//! Each implementation coordinates one or more DAOs with the shared
//! [`RepositoryContext`](crate::RepositoryContext).

mod album_like_repository_impl;
mod album_repository_impl;
mod collaboration_repository_impl;
mod playlist_repository_impl;
mod song_repository_impl;

pub use album_like_repository_impl::AlbumLikeRepositoryImpl;
pub use album_repository_impl::AlbumRepositoryImpl;
pub use collaboration_repository_impl::CollaborationRepositoryImpl;
pub use playlist_repository_impl::PlaylistRepositoryImpl;
pub use song_repository_impl::SongRepositoryImpl;
