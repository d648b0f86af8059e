//! Shared application state handed to every router

use std::sync::Arc;

use sqlx::SqlitePool;
use tunehub_deezer_client::DeezerClient;

use crate::config::AppSettings;
use crate::repositories::{
    AlbumRepository, ArtistRepository, SessionRepository, SongRepository, UserRepository,
};
use crate::services::{
    AuthService, FavoriteService, HealthService, MusicService, PlaylistService, UploadService,
};

/// Repositories and services behind the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub songs: SongRepository,
    pub artists: ArtistRepository,
    pub albums: AlbumRepository,
    pub playlists: PlaylistService,
    pub favorites: FavoriteService,
    pub uploads: UploadService,
    pub music: MusicService,
    pub health: HealthService,
    pub settings: Arc<AppSettings>,
}

impl AppState {
    /// Wire every service onto one pool
    pub fn new(pool: SqlitePool, deezer: DeezerClient, settings: AppSettings) -> Self {
        let auth = AuthService::new(
            UserRepository::new(pool.clone()),
            SessionRepository::new(pool.clone()),
            settings.session_ttl_secs,
        );

        Self {
            auth,
            songs: SongRepository::new(pool.clone()),
            artists: ArtistRepository::new(pool.clone()),
            albums: AlbumRepository::new(pool.clone()),
            playlists: PlaylistService::new(pool.clone()),
            favorites: FavoriteService::new(pool.clone()),
            uploads: UploadService::new(pool.clone(), settings.audio_dir(), settings.covers_dir()),
            music: MusicService::new(deezer),
            health: HealthService::new(pool),
            settings: Arc::new(settings),
        }
    }
}
