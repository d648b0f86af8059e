//! Server-rendered HTML pages
//!
//! Pages are plain `maud` functions returning [`Markup`]; handlers wrap
//! them in `axum::response::Html` via maud's `IntoResponse` impl.

mod auth;
mod layout;
mod pages;

pub use auth::{login_page, register_page};
pub use layout::{layout, Flash};
pub use pages::{
    discover_page, favorites_page, home_page, library_page, player_page, playlist_page,
    DiscoverLists,
};

pub use maud::Markup;
