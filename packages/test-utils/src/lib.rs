//! Shared test utilities for the TuneHub workspace
//!
//! This crate provides mock implementations of external services so the
//! API test suites run without network access.
//!
//! # Mock Services
//!
//! - [`MockDeezerServer`] - Mock Deezer public API (search, tracks, artist top)
//!
//! # Example
//!
//! ```rust,ignore
//! use tunehub_test_utils::MockDeezerServer;
//!
//! #[tokio::test]
//! async fn test_with_mocks() {
//!     let deezer = MockDeezerServer::start().await;
//!     deezer.mock_search("queen", 3).await;
//!
//!     // Use deezer.url() to configure your client
//! }
//! ```

mod deezer;

pub use deezer::{track_fixture, MockDeezerServer};
