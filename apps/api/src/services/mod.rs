//! Business logic services for TuneHub
//!
//! - Authentication and sessions
//! - Upload ingestion
//! - Playlist and favorite mutations
//! - Deezer metadata proxy
//! - Health checks

pub mod auth;
pub mod favorite;
pub mod health;
pub mod music;
pub mod playlist;
pub mod upload;

pub use auth::AuthService;
pub use favorite::FavoriteService;
pub use health::HealthService;
pub use music::MusicService;
pub use playlist::PlaylistService;
pub use upload::{UploadForm, UploadService, UploadedFile};
