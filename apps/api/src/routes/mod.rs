//! HTTP route handlers for TuneHub
//!
//! - HTML pages and authentication forms
//! - Catalog queries and search
//! - Playlist and favorite mutations
//! - Uploads and audio streaming
//! - Deezer metadata proxy
//! - Health check endpoints

pub mod auth;
pub mod catalog;
pub mod favorite;
pub mod health;
pub mod music;
pub mod pages;
pub mod playlist;
pub mod streaming;
pub mod upload;

pub use auth::auth_router;
pub use catalog::catalog_router;
pub use favorite::favorite_router;
pub use health::health_router;
pub use music::music_router;
pub use pages::pages_router;
pub use playlist::playlist_router;
pub use streaming::streaming_router;
pub use upload::upload_router;
