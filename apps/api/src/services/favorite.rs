//! Favorites, play history and recommendations for a signed-in user

use sqlx::SqlitePool;
use tracing::instrument;

use crate::error::{ApiError, ApiResult};
use crate::models::{FavoriteSong, RecentPlay, SongDetails};
use crate::repositories::{FavoriteRepository, HistoryRepository, SongRepository};

/// Number of songs in recommendation and trending lists
pub const RECOMMENDATION_LIMIT: i64 = 10;

/// Number of history entries returned as "recently played"
pub const RECENT_PLAYS_LIMIT: i64 = 10;

/// Service for per-user listening state
#[derive(Clone)]
pub struct FavoriteService {
    favorites: FavoriteRepository,
    history: HistoryRepository,
    songs: SongRepository,
}

impl FavoriteService {
    /// Create a new FavoriteService
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            favorites: FavoriteRepository::new(pool.clone()),
            history: HistoryRepository::new(pool.clone()),
            songs: SongRepository::new(pool),
        }
    }

    /// Flip the favorite state of a song and return the new state
    #[instrument(skip(self))]
    pub async fn toggle(&self, user_id: i64, song_id: i64) -> ApiResult<bool> {
        if !self.songs.exists(song_id).await? {
            return Err(ApiError::not_found("Song", song_id));
        }

        match self.favorites.find(user_id, song_id).await? {
            Some(existing) => {
                self.favorites.delete(existing.id).await?;
                tracing::debug!(user_id, song_id, "Favorite removed");
                Ok(false)
            }
            None => {
                self.favorites.create(user_id, song_id).await?;
                tracing::debug!(user_id, song_id, "Favorite added");
                Ok(true)
            }
        }
    }

    /// Favorited songs, newest first
    pub async fn favorites(&self, user_id: i64) -> ApiResult<Vec<FavoriteSong>> {
        Ok(self.favorites.find_songs_for_user(user_id).await?)
    }

    /// Append a play to the user's history
    pub async fn record_play(&self, user_id: i64, song_id: i64) -> ApiResult<()> {
        Ok(self.history.record(user_id, song_id).await?)
    }

    /// Last plays, newest first
    pub async fn recently_played(&self, user_id: i64) -> ApiResult<Vec<RecentPlay>> {
        Ok(self.history.find_recent(user_id, RECENT_PLAYS_LIMIT).await?)
    }

    /// Top songs by the artists the user favorited, or top songs overall
    /// when the user has no favorites
    #[instrument(skip(self))]
    pub async fn recommended(&self, user_id: i64) -> ApiResult<Vec<SongDetails>> {
        if self.favorites.count_for_user(user_id).await? > 0 {
            Ok(self
                .songs
                .find_most_played_by_favorite_artists(user_id, RECOMMENDATION_LIMIT)
                .await?)
        } else {
            Ok(self.songs.find_most_played(RECOMMENDATION_LIMIT).await?)
        }
    }
}
