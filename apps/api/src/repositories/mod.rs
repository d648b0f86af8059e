//! Database repository layer for TuneHub
//!
//! This module provides the data access layer, centralizing all database
//! operations into reusable repositories. Handlers and services never embed
//! SQL themselves.

pub mod album;
pub mod artist;
pub mod favorite;
pub mod playlist;
pub mod session;
pub mod song;
pub mod user;
pub mod utils;

pub use album::AlbumRepository;
pub use artist::ArtistRepository;
pub use favorite::{FavoriteRepository, HistoryRepository};
pub use playlist::PlaylistRepository;
pub use session::SessionRepository;
pub use song::{CatalogStats, SongRepository};
pub use user::UserRepository;
