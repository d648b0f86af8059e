//! Shared utility functions for repositories
//!
//! This module provides common functions used across repositories.

/// Escape special characters in LIKE patterns to prevent pattern injection.
///
/// LIKE uses `%` for any sequence and `_` for single character wildcards.
/// If user input contains these characters, they must be escaped to match
/// literally. Queries using the result must declare `ESCAPE '\'`.
///
/// # Example
/// ```
/// use tunehub_api::repositories::utils::escape_like;
///
/// let input = "100%";
/// let escaped = escape_like(input);
/// assert_eq!(escaped, r"100\%");
/// ```
pub fn escape_like(pattern: &str) -> String {
    pattern
        .replace('\\', r"\\")
        .replace('%', r"\%")
        .replace('_', r"\_")
}

/// Build a `%...%` substring pattern from user input
pub fn contains_pattern(query: &str) -> String {
    format!("%{}%", escape_like(query))
}

// ============================================================================
// SQL Column Constants
//
// These constants define the SELECT lists for each entity type, reducing
// duplication and ensuring consistency across queries.
// ============================================================================

/// SQL columns for user queries
pub const USER_COLUMNS: &str = "id, username, email, password_hash, avatar, created_at";

/// SQL columns for artist queries
pub const ARTIST_COLUMNS: &str = "id, name, bio, image";

/// SQL columns for album queries
pub const ALBUM_COLUMNS: &str = "id, title, artist_id, release_date, cover_image, genre";

/// SQL columns for song queries
pub const SONG_COLUMNS: &str =
    "id, title, artist_id, album_id, duration, file_path, plays, created_at";

/// SQL columns for playlist queries
pub const PLAYLIST_COLUMNS: &str = "id, name, description, user_id, cover_image, created_at";

/// Song joined with artist and album, aliased `s`, `ar` and `al`
pub const SONG_DETAILS_SELECT: &str = r#"
    SELECT
        s.id, s.title, s.artist_id, ar.name AS artist_name,
        s.album_id, al.title AS album_title, al.cover_image AS cover_image,
        s.duration, s.file_path, s.plays, s.created_at
    FROM songs s
    JOIN artists ar ON ar.id = s.artist_id
    LEFT JOIN albums al ON al.id = s.album_id
"#;

/// Album joined with its artist, aliased `al` and `ar`
pub const ALBUM_WITH_ARTIST_SELECT: &str = r#"
    SELECT
        al.id, al.title, al.artist_id, ar.name AS artist_name,
        al.release_date, al.cover_image, al.genre
    FROM albums al
    JOIN artists ar ON ar.id = al.artist_id
"#;
