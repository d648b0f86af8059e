//! Playlist repository for centralized database operations
//!
//! This module provides all playlist-related database operations in a single location,
//! following the repository pattern.

use chrono::Utc;
use sqlx::SqlitePool;

use super::utils::{PLAYLIST_COLUMNS, SONG_DETAILS_SELECT};
use crate::models::playlist::DEFAULT_PLAYLIST_COVER;
use crate::models::{Playlist, PlaylistSummary, SongDetails, UpdatePlaylist};

/// Repository for playlist database operations
#[derive(Clone)]
pub struct PlaylistRepository {
    pool: SqlitePool,
}

impl PlaylistRepository {
    /// Create a new PlaylistRepository instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a playlist by its unique ID
    pub async fn find_by_id(&self, playlist_id: i64) -> Result<Option<Playlist>, sqlx::Error> {
        let sql = format!("SELECT {} FROM playlists WHERE id = ?", PLAYLIST_COLUMNS);
        sqlx::query_as::<_, Playlist>(&sql)
            .bind(playlist_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Insert a playlist owned by `user_id`
    pub async fn create(
        &self,
        user_id: i64,
        name: &str,
        description: Option<&str>,
    ) -> Result<Playlist, sqlx::Error> {
        let sql = format!(
            r#"
            INSERT INTO playlists (name, description, user_id, cover_image, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            PLAYLIST_COLUMNS
        );
        sqlx::query_as::<_, Playlist>(&sql)
            .bind(name)
            .bind(description)
            .bind(user_id)
            .bind(DEFAULT_PLAYLIST_COVER)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
    }

    /// All playlists of a user with their song counts
    pub async fn find_summaries_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<PlaylistSummary>, sqlx::Error> {
        sqlx::query_as::<_, PlaylistSummary>(
            r#"
            SELECT
                p.id, p.name, p.description,
                (SELECT COUNT(*) FROM playlist_songs ps WHERE ps.playlist_id = p.id) AS song_count
            FROM playlists p
            WHERE p.user_id = ?
            ORDER BY p.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Songs of a playlist in the order they were added
    pub async fn get_songs(&self, playlist_id: i64) -> Result<Vec<SongDetails>, sqlx::Error> {
        let sql = format!(
            r#"
            {}
            JOIN playlist_songs ps ON ps.song_id = s.id
            WHERE ps.playlist_id = ?
            ORDER BY ps.rowid
            "#,
            SONG_DETAILS_SELECT
        );
        sqlx::query_as::<_, SongDetails>(&sql)
            .bind(playlist_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Check whether a song is a member of a playlist
    pub async fn contains_song(&self, playlist_id: i64, song_id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM playlist_songs WHERE playlist_id = ? AND song_id = ?)",
        )
        .bind(playlist_id)
        .bind(song_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Add a song to a playlist
    pub async fn add_song(&self, playlist_id: i64, song_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO playlist_songs (playlist_id, song_id) VALUES (?, ?)")
            .bind(playlist_id)
            .bind(song_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Remove a song from a playlist
    pub async fn remove_song(&self, playlist_id: i64, song_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ? AND song_id = ?")
            .bind(playlist_id)
            .bind(song_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply a partial update; `None` fields are left unchanged
    pub async fn update(&self, playlist_id: i64, update: &UpdatePlaylist) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE playlists
            SET name = COALESCE(?, name),
                description = COALESCE(?, description)
            WHERE id = ?
            "#,
        )
        .bind(update.name.as_deref())
        .bind(update.description.as_deref())
        .bind(playlist_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Delete a playlist; its membership rows cascade
    pub async fn delete(&self, playlist_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
            .bind(playlist_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::models::NewSong;
    use crate::repositories::{ArtistRepository, SongRepository, UserRepository};

    async fn setup() -> (SqlitePool, i64, i64) {
        let pool = create_test_pool().await.unwrap();
        let user = UserRepository::new(pool.clone())
            .create("alice", "alice@example.com", "hash")
            .await
            .unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let artist = ArtistRepository::get_or_create(&mut conn, "Queen").await.unwrap();
        let song_id = SongRepository::create(
            &mut conn,
            &NewSong {
                title: "Radio Ga Ga",
                artist_id: artist.id,
                album_id: None,
                duration: 343,
                file_path: "radio.mp3",
            },
        )
        .await
        .unwrap();
        drop(conn);

        (pool, user.id, song_id)
    }

    #[tokio::test]
    async fn test_membership_and_summary() {
        let (pool, user_id, song_id) = setup().await;
        let repo = PlaylistRepository::new(pool);

        let playlist = repo.create(user_id, "Anthems", None).await.unwrap();
        assert_eq!(playlist.cover_image, DEFAULT_PLAYLIST_COVER);
        assert!(!repo.contains_song(playlist.id, song_id).await.unwrap());

        repo.add_song(playlist.id, song_id).await.unwrap();
        assert!(repo.contains_song(playlist.id, song_id).await.unwrap());

        let summaries = repo.find_summaries_by_user(user_id).await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].song_count, 1);

        let songs = repo.get_songs(playlist.id).await.unwrap();
        assert_eq!(songs[0].title, "Radio Ga Ga");

        assert!(repo.remove_song(playlist.id, song_id).await.unwrap());
        assert!(!repo.remove_song(playlist.id, song_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_partial_update_keeps_missing_fields() {
        let (pool, user_id, _) = setup().await;
        let repo = PlaylistRepository::new(pool);
        let playlist = repo.create(user_id, "Anthems", Some("loud")).await.unwrap();

        repo.update(
            playlist.id,
            &UpdatePlaylist {
                name: Some("Stadium".to_string()),
                description: None,
            },
        )
        .await
        .unwrap();

        let updated = repo.find_by_id(playlist.id).await.unwrap().unwrap();
        assert_eq!(updated.name, "Stadium");
        assert_eq!(updated.description.as_deref(), Some("loud"));
    }

    #[tokio::test]
    async fn test_delete_cascades_membership() {
        let (pool, user_id, song_id) = setup().await;
        let repo = PlaylistRepository::new(pool.clone());
        let playlist = repo.create(user_id, "Anthems", None).await.unwrap();
        repo.add_song(playlist.id, song_id).await.unwrap();

        assert!(repo.delete(playlist.id).await.unwrap());

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM playlist_songs")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
