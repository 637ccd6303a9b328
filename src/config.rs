//! Configuration management for the band list playlist builder.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. The credential variables keep the `SPOTIPY_*` names
//! so existing setups of the Python tooling keep working.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::generator::SelectionOptions;

/// Directory name used below the platform data directory.
pub const APP_DIR: &str = "bandlist";

/// Permissions requested during authorization.
pub const SCOPE: &str = "playlist-modify-public playlist-modify-private";

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8888/callback";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Loads environment variables from `.env` files.
///
/// Reads `./.env` first and then `.env` in the platform-specific local data
/// directory under `bandlist/.env`. Variables that are already set are never
/// overwritten, so the process environment always wins. Missing files are
/// not an error.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/bandlist/.env`
/// - macOS: `~/Library/Application Support/bandlist/.env`
/// - Windows: `%LOCALAPPDATA%/bandlist/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    dotenv::dotenv().ok();

    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns `<data_local_dir>/bandlist`, falling back to `./bandlist`.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

fn var_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default.to_string(),
    }
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Returns the Spotify OAuth authorization URL (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Returns the Spotify OAuth token exchange URL (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Application credentials registered with Spotify's developer platform.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    /// `None` switches the authorization flow to PKCE.
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub scope: String,
}

impl Credentials {
    pub fn new(client_id: String, client_secret: Option<String>, redirect_uri: String) -> Self {
        Self {
            client_id,
            client_secret: client_secret.filter(|s| !s.trim().is_empty()),
            redirect_uri,
            scope: SCOPE.to_string(),
        }
    }

    /// Reads `SPOTIPY_CLIENT_ID`, `SPOTIPY_CLIENT_SECRET` and
    /// `SPOTIPY_REDIRECT_URI` from the environment.
    ///
    /// # Errors
    ///
    /// Fails if `SPOTIPY_CLIENT_ID` is missing or empty.
    pub fn from_env() -> Result<Self, String> {
        let client_id = env::var("SPOTIPY_CLIENT_ID")
            .ok()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| "SPOTIPY_CLIENT_ID must be set".to_string())?;

        Ok(Self::new(
            client_id,
            env::var("SPOTIPY_CLIENT_SECRET").ok(),
            var_or("SPOTIPY_REDIRECT_URI", DEFAULT_REDIRECT_URI),
        ))
    }

    pub fn uses_pkce(&self) -> bool {
        self.client_secret.is_none()
    }
}

/// Everything a playlist build needs, injected instead of read interactively.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    pub playlist_name: String,
    pub bands_path: PathBuf,
    /// `None` leaves the visibility of a new playlist to the service.
    pub public: Option<bool>,
    pub selection: SelectionOptions,
}

impl Settings {
    pub fn new(credentials: Credentials, playlist_name: String, bands_path: PathBuf) -> Self {
        Self {
            credentials,
            playlist_name,
            bands_path,
            public: None,
            selection: SelectionOptions::default(),
        }
    }

    pub fn with_public(mut self, public: Option<bool>) -> Self {
        self.public = public;
        self
    }

    pub fn with_selection(mut self, selection: SelectionOptions) -> Self {
        self.selection = selection;
        self
    }
}
