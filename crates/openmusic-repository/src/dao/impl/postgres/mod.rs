//! PostgreSQL DAO implementations.

mod album_dao_impl;
mod album_like_dao_impl;
mod collaboration_dao_impl;
mod playlist_dao_impl;
mod song_dao_impl;

pub use album_dao_impl::PgAlbumDaoImpl;
pub use album_like_dao_impl::PgAlbumLikeDaoImpl;
pub use collaboration_dao_impl::PgCollaborationDaoImpl;
pub use playlist_dao_impl::PgPlaylistDaoImpl;
pub use song_dao_impl::PgSongDaoImpl;
