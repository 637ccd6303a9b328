//! # CLI Module
//!
//! User-facing commands. Each command collects its input, reports progress
//! and turns failures into an error message and exit code 1; the actual
//! work lives in [`crate::generator`] and [`crate::spotify`].
//!
//! ## Commands
//!
//! - [`auth`] - Authorize in the browser and cache the token, even if a
//!   cached token exists
//! - [`build`] - Fill a playlist from a band list file
//!
//! ## Usage
//!
//! ```bash
//! bandlist auth
//! bandlist build --playlist "Thrash" --bands bands.txt
//! bandlist build                     # prompts for name and file
//! ```
//!
//! Input is validated before anything is sent to Spotify: an empty playlist
//! name or an unreadable band file ends the run right away.

mod auth;
mod build;

pub use auth::auth;
pub use build::BuildArgs;
pub use build::build;
