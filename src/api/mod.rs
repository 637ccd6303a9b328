//! # API Module
//!
//! HTTP endpoints served by the short-lived local server that runs while the
//! user authorizes the application in the browser.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the redirect from Spotify's authorization page,
//!   checks the `state` parameter and exchanges the code for a token. The
//!   result (token or error) is written to the shared [`AuthState`] that the
//!   waiting authorization polls.
//! - [`health`] - Reports status and version, handy to check that the
//!   redirect URI actually reaches this process.
//!
//! The route of [`callback`] is the path of the configured redirect URI
//! (`/callback` by default).
//!
//! [`AuthState`]: crate::types::AuthState

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
