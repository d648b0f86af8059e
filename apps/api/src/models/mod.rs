//! Database models and types for TuneHub
//!
//! This module contains SQLx models for:
//! - Users and login sessions
//! - Artists, albums, and songs
//! - Playlists, favorites, and play history

pub mod album;
pub mod artist;
pub mod favorite;
pub mod playlist;
pub mod song;
pub mod user;

pub use album::{Album, AlbumWithArtist, NewAlbum};
pub use artist::{Artist, ArtistWithSongCount};
pub use favorite::{Favorite, FavoriteSong, RecentPlay};
pub use playlist::{Playlist, PlaylistSummary, UpdatePlaylist};
pub use song::{NewSong, Song, SongDetails};
pub use user::{Session, User};
