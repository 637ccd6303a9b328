//! # Spotify Integration Module
//!
//! This module is the integration layer between the playlist pipeline and the
//! Spotify Web API. It handles authorization, the HTTP communication and the
//! mapping of API payloads onto the types in [`crate::types`].
//!
//! ## Architecture
//!
//! ```text
//! Pipeline (generator)
//!          ↓
//! Catalog trait
//!          ↓
//! SpotifyClient
//!     ├── Authentication (authorization code / PKCE)
//!     ├── User (current user)
//!     ├── Playlists (list, create, add tracks)
//!     └── Search (tracks by artist)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! The pipeline only talks to the [`Catalog`] trait, which keeps the
//! resolution and selection logic testable without network access.
//!
//! ## API Coverage
//!
//! - `GET /me` - The authorized user
//! - `GET /me/playlists` - The user's playlists, followed through `next`
//! - `POST /users/{user_id}/playlists` - Create a playlist
//! - `GET /search` - Track search with `artist:<name>` queries
//! - `POST /playlists/{playlist_id}/tracks` - Append tracks
//! - `POST /api/token` - Token exchange and refresh
//!
//! ## Transport Behaviour
//!
//! Every request goes through [`SpotifyClient::execute`], which resends a
//! request at most [`MAX_ATTEMPTS`] times when the service answers
//! `429 Too Many Requests` (honouring `Retry-After`) or `502 Bad Gateway`.
//! All other failures are returned to the caller.

pub mod auth;
mod playlist;
mod search;
mod user;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::{sync::Mutex, time::sleep};

use crate::{
    Res, config,
    config::Credentials,
    management::TokenManager,
    types::{Page, Playlist, Track, User},
    warning,
};

pub const MAX_ATTEMPTS: u32 = 3;

/// Longest `Retry-After` the client is willing to wait for.
const MAX_RETRY_AFTER: u64 = 120;

/// The remote calls the playlist pipeline depends on.
#[allow(async_fn_in_trait)]
pub trait Catalog {
    async fn current_user(&self) -> Res<User>;

    /// First page of the current user's playlists.
    async fn current_user_playlists(&self, limit: u32) -> Res<Page<Playlist>>;

    /// Page behind a `next` cursor returned by a previous page.
    async fn next_playlists(&self, next: &str) -> Res<Page<Playlist>>;

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: Option<bool>,
    ) -> Res<Playlist>;

    async fn search_tracks(&self, query: &str, limit: u32) -> Res<Vec<Track>>;

    /// Appends `uris` and returns the new snapshot id.
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<String>;
}

pub struct SpotifyClient {
    http: Client,
    api_url: String,
    credentials: Credentials,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(credentials: Credentials, tokens: TokenManager) -> Self {
        Self {
            http: Client::new(),
            api_url: config::spotify_apiurl(),
            credentials,
            tokens: Mutex::new(tokens),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn access_token(&self) -> String {
        self.tokens
            .lock()
            .await
            .get_valid_token(&self.credentials)
            .await
    }

    /// Sends an authorized request and returns the successful response.
    async fn execute(&self, request: RequestBuilder) -> Result<Response, reqwest::Error> {
        let token = self.access_token().await;
        let request = request.bearer_auth(token);

        let mut attempt = 1;
        loop {
            // bodies used here are always buffered, so cloning only fails for streams
            let Some(current) = request.try_clone() else {
                return request.send().await?.error_for_status();
            };

            let response = current.send().await?;
            let status = response.status();

            if attempt < MAX_ATTEMPTS {
                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after = response
                        .headers()
                        .get("retry-after")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<u64>().ok())
                        .unwrap_or(1);
                    if retry_after <= MAX_RETRY_AFTER {
                        sleep(Duration::from_secs(retry_after)).await;
                        attempt += 1;
                        continue;
                    }
                    warning!(
                        "Rate limited for {} seconds, giving up on this request.",
                        retry_after
                    );
                } else if status == StatusCode::BAD_GATEWAY {
                    sleep(Duration::from_secs(2)).await;
                    attempt += 1;
                    continue;
                }
            }

            return response.error_for_status();
        }
    }
}

impl Catalog for SpotifyClient {
    async fn current_user(&self) -> Res<User> {
        Ok(self.get_current_user().await?)
    }

    async fn current_user_playlists(&self, limit: u32) -> Res<Page<Playlist>> {
        Ok(self.get_playlists(limit).await?)
    }

    async fn next_playlists(&self, next: &str) -> Res<Page<Playlist>> {
        Ok(self.get_playlists_page(next).await?)
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: Option<bool>,
    ) -> Res<Playlist> {
        Ok(self.post_playlist(user_id, name, public).await?)
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> Res<Vec<Track>> {
        Ok(self.search_track_items(query, limit).await?)
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<String> {
        Ok(self.post_tracks(playlist_id, uris).await?)
    }
}
