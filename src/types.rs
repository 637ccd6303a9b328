use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Raw body of the token endpoint. `refresh_token` is omitted on refresh
/// when the service keeps the previous one.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    pub expires_in: u64,
}

/// State shared between a running authorization and the callback handler.
#[derive(Debug, Clone)]
pub struct AuthState {
    pub csrf_state: String,
    pub code_verifier: Option<String>,
    pub token: Option<Token>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
}

/// One page of a paginated listing. `next` is the URL of the following page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub public: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTracksResponse {
    pub tracks: Page<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

/// What processing a single band did to the playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandOutcome {
    Added(usize),
    /// The search returned no usable tracks, nothing was appended.
    NoTracksFound,
}

impl BandOutcome {
    pub fn added(&self) -> usize {
        match self {
            BandOutcome::Added(count) => *count,
            BandOutcome::NoTracksFound => 0,
        }
    }
}

impl fmt::Display for BandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandOutcome::Added(count) => write!(f, "{} added", count),
            BandOutcome::NoTracksFound => write!(f, "no tracks found"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandReport {
    pub band: String,
    pub outcome: BandOutcome,
}

#[derive(Tabled)]
pub struct BandTableRow {
    pub band: String,
    pub tracks: String,
}

impl From<&BandReport> for BandTableRow {
    fn from(report: &BandReport) -> Self {
        Self {
            band: report.band.clone(),
            tracks: report.outcome.to_string(),
        }
    }
}
