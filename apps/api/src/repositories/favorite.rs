//! Favorite and play history repositories

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{Favorite, FavoriteSong, RecentPlay};

/// Repository for favorite database operations
#[derive(Clone)]
pub struct FavoriteRepository {
    pool: SqlitePool,
}

impl FavoriteRepository {
    /// Create a new FavoriteRepository instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// First favorite row for (user, song), if any
    pub async fn find(&self, user_id: i64, song_id: i64) -> Result<Option<Favorite>, sqlx::Error> {
        sqlx::query_as::<_, Favorite>(
            r#"
            SELECT id, user_id, song_id, created_at
            FROM favorites
            WHERE user_id = ? AND song_id = ?
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(song_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Insert a favorite row
    pub async fn create(&self, user_id: i64, song_id: i64) -> Result<i64, sqlx::Error> {
        let result =
            sqlx::query("INSERT INTO favorites (user_id, song_id, created_at) VALUES (?, ?, ?)")
                .bind(user_id)
                .bind(song_id)
                .bind(Utc::now())
                .execute(&self.pool)
                .await?;
        Ok(result.last_insert_rowid())
    }

    /// Delete a favorite row by ID
    pub async fn delete(&self, favorite_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE id = ?")
            .bind(favorite_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of favorites a user has
    pub async fn count_for_user(&self, user_id: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM favorites WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }

    /// A user's favorited songs, newest favorite first
    pub async fn find_songs_for_user(&self, user_id: i64) -> Result<Vec<FavoriteSong>, sqlx::Error> {
        sqlx::query_as::<_, FavoriteSong>(
            r#"
            SELECT
                s.id AS song_id, s.title, ar.name AS artist_name,
                s.duration, s.plays, al.cover_image AS cover_image,
                f.created_at AS added_at
            FROM favorites f
            JOIN songs s ON s.id = f.song_id
            JOIN artists ar ON ar.id = s.artist_id
            LEFT JOIN albums al ON al.id = s.album_id
            WHERE f.user_id = ?
            ORDER BY f.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}

/// Repository for play history database operations
#[derive(Clone)]
pub struct HistoryRepository {
    pool: SqlitePool,
}

impl HistoryRepository {
    /// Create a new HistoryRepository instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a play of `song_id` by `user_id`
    pub async fn record(&self, user_id: i64, song_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO play_history (user_id, song_id, played_at) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(song_id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// A user's most recent plays, newest first
    pub async fn find_recent(&self, user_id: i64, limit: i64) -> Result<Vec<RecentPlay>, sqlx::Error> {
        sqlx::query_as::<_, RecentPlay>(
            r#"
            SELECT
                s.id AS song_id, s.title, ar.name AS artist_name,
                al.cover_image AS cover_image, h.played_at
            FROM play_history h
            JOIN songs s ON s.id = h.song_id
            JOIN artists ar ON ar.id = s.artist_id
            LEFT JOIN albums al ON al.id = s.album_id
            WHERE h.user_id = ?
            ORDER BY h.id DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::models::NewSong;
    use crate::repositories::{ArtistRepository, SongRepository, UserRepository};

    async fn setup() -> (SqlitePool, i64, Vec<i64>) {
        let pool = create_test_pool().await.unwrap();
        let user = UserRepository::new(pool.clone())
            .create("alice", "alice@example.com", "hash")
            .await
            .unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let artist = ArtistRepository::get_or_create(&mut conn, "Queen").await.unwrap();
        let mut songs = Vec::new();
        for title in ["One", "Two"] {
            songs.push(
                SongRepository::create(
                    &mut conn,
                    &NewSong {
                        title,
                        artist_id: artist.id,
                        album_id: None,
                        duration: 60,
                        file_path: "x.mp3",
                    },
                )
                .await
                .unwrap(),
            );
        }
        drop(conn);

        (pool, user.id, songs)
    }

    #[tokio::test]
    async fn test_favorite_rows() {
        let (pool, user_id, songs) = setup().await;
        let repo = FavoriteRepository::new(pool);

        assert!(repo.find(user_id, songs[0]).await.unwrap().is_none());
        let id = repo.create(user_id, songs[0]).await.unwrap();
        assert_eq!(repo.find(user_id, songs[0]).await.unwrap().unwrap().id, id);
        assert_eq!(repo.count_for_user(user_id).await.unwrap(), 1);

        let listed = repo.find_songs_for_user(user_id).await.unwrap();
        assert_eq!(listed[0].title, "One");
        assert_eq!(listed[0].cover_url(), "/static/default-album.jpg");

        assert!(repo.delete(id).await.unwrap());
        assert_eq!(repo.count_for_user(user_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_history_newest_first() {
        let (pool, user_id, songs) = setup().await;
        let repo = HistoryRepository::new(pool);

        repo.record(user_id, songs[0]).await.unwrap();
        repo.record(user_id, songs[1]).await.unwrap();

        let recent = repo.find_recent(user_id, 10).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].title, "Two");
        assert_eq!(recent[1].title, "One");
    }
}
