//! Service implementations.

mod album_like_service_impl;
mod export_service_impl;
mod playlist_service_impl;

pub use album_like_service_impl::AlbumLikeServiceImpl;
pub use export_service_impl::ExportServiceImpl;
pub use playlist_service_impl::PlaylistServiceImpl;
