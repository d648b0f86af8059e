//! Deezer API client for TuneHub
//!
//! This crate provides a small client for the public Deezer API, which
//! needs no API key for catalog lookups:
//! - Track search
//! - Track lookup by id
//! - An artist's top tracks
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use tunehub_deezer_client::DeezerClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DeezerClient::new("https://api.deezer.com", Duration::from_secs(10))?;
//!
//! for track in client.search("daft punk", 5).await? {
//!     println!("{} - {} ({}s)", track.artist.name, track.title, track.duration);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod models;

pub use client::DeezerClient;
pub use error::{DeezerError, DeezerResult};
pub use models::{Track, TrackAlbum, TrackArtist};
