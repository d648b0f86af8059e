use maud::{html, Markup, DOCTYPE};

use crate::models::User;

/// One-shot message shown above the page content
#[derive(Debug, Clone, Copy)]
pub enum Flash<'a> {
    Error(&'a str),
    Info(&'a str),
}

fn navigation(user: Option<&User>) -> Markup {
    html! {
        aside class="sidebar" {
            a class="logo" href="/" { "TuneHub" }
            nav {
                ul {
                    li { a href="/" { "Home" } }
                    li { a href="/library" { "Library" } }
                    li { a href="/discover" { "Discover" } }
                    @if user.is_some() {
                        li { a href="/favorites" { "Favorites" } }
                    }
                }
            }
            div class="account" {
                @match user {
                    Some(user) => {
                        span class="username" { (user.username) }
                        a href="/logout" { "Log out" }
                    }
                    None => {
                        a href="/login" { "Log in" }
                        a href="/register" { "Register" }
                    }
                }
            }
        }
    }
}

fn search_bar() -> Markup {
    html! {
        form class="search" action="/search" method="get" {
            input id="search-input" type="search" name="q" autocomplete="off"
                placeholder="Search songs, artists, albums";
        }
        div id="search-results" {}
    }
}

fn flash(message: Option<Flash<'_>>) -> Markup {
    html! {
        @match message {
            Some(Flash::Error(text)) => div class="flash flash-error" { (text) },
            Some(Flash::Info(text)) => div class="flash flash-info" { (text) },
            None => {},
        }
    }
}

/// Full page shell around `content`
pub fn layout(title: &str, user: Option<&User>, message: Option<Flash<'_>>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " - TuneHub" }
                link rel="stylesheet" href="/static/css/style.css";
            }
            body {
                div class="app" {
                    (navigation(user))
                    main class="main-content" {
                        (search_bar())
                        (flash(message))
                        (content)
                    }
                }
                footer class="player-bar" {
                    audio id="audio-player" controls {}
                }
                script src="/static/js/main.js" {}
            }
        }
    }
}
