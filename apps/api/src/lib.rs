//! TuneHub API library
//!
//! Exposes the server components for the binary and the integration tests.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod views;

// Re-export commonly used types
pub use app::build_router;
pub use config::{AppSettings, Config};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use state::AppState;
