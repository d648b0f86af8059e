use maud::{html, Markup};

use super::layout::layout;
use crate::models::song::format_duration;
use crate::models::{
    AlbumWithArtist, Artist, FavoriteSong, Playlist, PlaylistSummary, RecentPlay, SongDetails, User,
};

fn song_row(song: &SongDetails) -> Markup {
    html! {
        li class="song" data-song-id=(song.id) {
            img class="cover" src=(song.cover_url()) alt="";
            a class="title" href={ "/player/" (song.id) } { (song.title) }
            span class="artist" { (song.artist_name) }
            span class="album" { (song.album_display()) }
            span class="duration" { (song.duration_display()) }
        }
    }
}

fn song_list(songs: &[SongDetails]) -> Markup {
    html! {
        @if songs.is_empty() {
            p class="empty" { "No songs yet." }
        } @else {
            ul class="song-list" {
                @for song in songs {
                    (song_row(song))
                }
            }
        }
    }
}

fn album_card(album: &AlbumWithArtist) -> Markup {
    html! {
        div class="card album" data-album-id=(album.id) {
            img class="cover" src=(album.cover_url()) alt="";
            span class="title" { (album.title) }
            span class="artist" { (album.artist_name) }
        }
    }
}

fn artist_card(artist: &Artist) -> Markup {
    html! {
        div class="card artist" data-artist-id=(artist.id) {
            img class="image" src=(artist.image_url()) alt="";
            span class="name" { (artist.name) }
        }
    }
}

pub fn home_page(
    user: Option<&User>,
    featured: &[SongDetails],
    albums: &[AlbumWithArtist],
    artists: &[Artist],
) -> Markup {
    layout(
        "Home",
        user,
        None,
        html! {
            section class="featured" {
                h2 { "Featured songs" }
                (song_list(featured))
            }
            section class="recent-albums" {
                h2 { "Recent albums" }
                div class="grid" {
                    @for album in albums { (album_card(album)) }
                }
            }
            section class="popular-artists" {
                h2 { "Artists" }
                div class="grid" {
                    @for artist in artists { (artist_card(artist)) }
                }
            }
        },
    )
}

fn playlist_links(playlists: &[PlaylistSummary]) -> Markup {
    html! {
        section class="playlists" {
            h2 { "Your playlists" }
            button class="playlist-create" { "New playlist" }
            ul id="playlist-list" {
                @for playlist in playlists {
                    li data-playlist-id=(playlist.id) {
                        a href={ "/playlist/" (playlist.id) } { (playlist.name) }
                        span class="count" { (playlist.song_count) " songs" }
                    }
                }
            }
        }
    }
}

pub fn library_page(
    user: Option<&User>,
    songs: &[SongDetails],
    albums: &[AlbumWithArtist],
    artists: &[Artist],
    playlists: &[PlaylistSummary],
) -> Markup {
    layout(
        "Library",
        user,
        None,
        html! {
            h1 { "Library" }
            @if user.is_some() {
                (playlist_links(playlists))
            }
            section { h2 { "Songs" } (song_list(songs)) }
            section {
                h2 { "Albums" }
                div class="grid" { @for album in albums { (album_card(album)) } }
            }
            section {
                h2 { "Artists" }
                div class="grid" { @for artist in artists { (artist_card(artist)) } }
            }
        },
    )
}

/// `playlists` feeds the add-to-playlist picker shown to signed-in users
pub fn player_page(user: Option<&User>, song: &SongDetails, playlists: &[PlaylistSummary]) -> Markup {
    layout(
        &song.title,
        user,
        None,
        html! {
            section class="now-playing" data-song-id=(song.id) {
                img class="cover-large" src=(song.cover_url()) alt="";
                h1 { (song.title) }
                h2 { (song.artist_name) }
                p class="album" { (song.album_display()) }
                p class="meta" {
                    (song.duration_display()) " · " (song.plays) " plays"
                }
                audio id="song-audio" controls preload="metadata"
                    src={ "/api/song/" (song.id) "/stream" } {}
                @if user.is_some() {
                    button class="favorite-toggle" data-song-id=(song.id) { "♥ Favorite" }
                    @if !playlists.is_empty() {
                        form class="add-to-playlist" data-song-id=(song.id) {
                            select name="playlist_id" {
                                @for playlist in playlists {
                                    option value=(playlist.id) { (playlist.name) }
                                }
                            }
                            button type="submit" { "Add to playlist" }
                        }
                    }
                }
            }
        },
    )
}

/// Lists for the discover page; the personal ones stay empty for visitors
#[derive(Debug, Default)]
pub struct DiscoverLists {
    pub trending: Vec<SongDetails>,
    pub new_releases: Vec<AlbumWithArtist>,
    pub popular_artists: Vec<Artist>,
    pub recommended: Vec<SongDetails>,
    pub recently_played: Vec<RecentPlay>,
}

fn recent_list(plays: &[RecentPlay]) -> Markup {
    html! {
        @if plays.is_empty() {
            p class="empty" { "Nothing played yet." }
        } @else {
            ul class="song-list" {
                @for play in plays {
                    li class="song" data-song-id=(play.song_id) {
                        img class="cover" src=(play.cover_url()) alt="";
                        a class="title" href={ "/player/" (play.song_id) } { (play.title) }
                        span class="artist" { (play.artist_name) }
                    }
                }
            }
        }
    }
}

/// The Deezer list is filled by the browser from `/api/music/trending`
pub fn discover_page(user: Option<&User>, lists: &DiscoverLists) -> Markup {
    layout(
        "Discover",
        user,
        None,
        html! {
            h1 { "Discover" }
            section id="trending-songs" { h2 { "Trending" } (song_list(&lists.trending)) }
            section id="new-releases" {
                h2 { "New releases" }
                div class="grid" { @for album in &lists.new_releases { (album_card(album)) } }
            }
            @if user.is_some() {
                section id="recommended-songs" {
                    h2 { "Recommended for you" }
                    (song_list(&lists.recommended))
                }
                section id="recently-played" {
                    h2 { "Recently played" }
                    (recent_list(&lists.recently_played))
                }
            }
            section id="popular-artists" {
                h2 { "Popular artists" }
                div class="grid" { @for artist in &lists.popular_artists { (artist_card(artist)) } }
            }
            section { h2 { "From Deezer" } ul id="deezer-trending" class="song-list" {} }
        },
    )
}

pub fn favorites_page(user: &User, favorites: &[FavoriteSong]) -> Markup {
    layout(
        "Favorites",
        Some(user),
        None,
        html! {
            h1 { "Favorites" }
            @if favorites.is_empty() {
                p class="empty" { "You have no favorite songs yet." }
            } @else {
                ul class="song-list" {
                    @for song in favorites {
                        li class="song" data-song-id=(song.song_id) {
                            img class="cover" src=(song.cover_url()) alt="";
                            a class="title" href={ "/player/" (song.song_id) } { (song.title) }
                            span class="artist" { (song.artist_name) }
                            span class="duration" { (format_duration(song.duration)) }
                            span class="added" { (song.added_at.format("%Y-%m-%d")) }
                        }
                    }
                }
            }
        },
    )
}

pub fn playlist_page(user: Option<&User>, playlist: &Playlist, songs: &[SongDetails]) -> Markup {
    let owner = user.is_some_and(|u| playlist.is_owned_by(u.id));
    layout(
        &playlist.name,
        user,
        None,
        html! {
            section class="playlist" data-playlist-id=(playlist.id) {
                h1 { (playlist.name) }
                @if let Some(description) = &playlist.description {
                    p class="description" { (description) }
                }
                p class="meta" { (songs.len()) " songs" }
                @if owner {
                    div class="playlist-actions" {
                        button class="playlist-edit" { "Edit" }
                        button class="playlist-delete" { "Delete" }
                    }
                }
                (song_list(songs))
            }
        },
    )
}
