//! Artist model for TuneHub

use serde::Serialize;
use sqlx::FromRow;

/// Image assigned to artists created by uploads
pub const DEFAULT_ARTIST_IMAGE: &str = "default-artist.jpg";

/// Artist record from the artists table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Artist {
    /// Unique artist identifier
    pub id: i64,

    /// Artist name (not unique; uploads match on exact name)
    pub name: String,

    /// Artist biography/description
    pub bio: Option<String>,

    /// Image file name under the uploads covers directory
    pub image: String,
}

impl Artist {
    /// Public URL of the artist image
    pub fn image_url(&self) -> String {
        artist_image_url(Some(&self.image))
    }
}

/// Artist with the number of songs credited to it
#[derive(Debug, Clone, FromRow)]
pub struct ArtistWithSongCount {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub songs_count: i64,
}

/// Resolve an artist image file name to a URL under `/static`
pub fn artist_image_url(image: Option<&str>) -> String {
    match image {
        Some(file) if !file.is_empty() && file != DEFAULT_ARTIST_IMAGE => {
            format!("/static/uploads/covers/{}", file)
        }
        _ => format!("/static/{}", DEFAULT_ARTIST_IMAGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_image_url() {
        let artist = Artist {
            id: 1,
            name: "Unknown Artist".to_string(),
            bio: None,
            image: DEFAULT_ARTIST_IMAGE.to_string(),
        };
        assert_eq!(artist.image_url(), "/static/default-artist.jpg");
    }

    #[test]
    fn test_custom_image_url() {
        assert_eq!(
            artist_image_url(Some("queen.png")),
            "/static/uploads/covers/queen.png"
        );
        assert_eq!(artist_image_url(None), "/static/default-artist.jpg");
    }
}
