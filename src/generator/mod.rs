//! # Generator Module
//!
//! The playlist pipeline. Everything here talks to the remote service through
//! the [`Catalog`] trait only.
//!
//! ```text
//! current user → resolve_or_create → for each band: process_band
//! ```
//!
//! - [`resolve_or_create`] - Finds the target playlist by name or creates it
//! - [`load_bands`] / [`parse_bands`] - Reads the band list file
//! - [`select_distinct`] - Similarity filter over search candidates
//! - [`process_band`] - Search, select and append for one band
//! - [`generate`] - Runs the whole pipeline for a [`Settings`]
//!
//! Bands are processed one after another in file order. A failing remote
//! call stops the run; bands processed before keep their tracks.

mod bands;
mod playlist;
mod tracks;

pub use bands::{BandFileError, load_bands, parse_bands};
pub use playlist::{PLAYLIST_PAGE_SIZE, ResolvedPlaylist, resolve_or_create};
pub use tracks::{SelectionOptions, artist_query, process_band, select_distinct};

use crate::{Res, config::Settings, spotify::Catalog, types::BandReport};

#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub playlist: ResolvedPlaylist,
    pub bands: Vec<BandReport>,
}

impl GenerationReport {
    pub fn total_added(&self) -> usize {
        self.bands.iter().map(|b| b.outcome.added()).sum()
    }
}

/// Resolves the playlist named in `settings` and fills it with tracks for
/// every entry of `bands`.
pub async fn generate<C: Catalog>(
    catalog: &C,
    settings: &Settings,
    bands: &[String],
) -> Res<GenerationReport> {
    let user = catalog.current_user().await?;
    let playlist =
        resolve_or_create(catalog, &user.id, &settings.playlist_name, settings.public).await?;

    let mut reports = Vec::with_capacity(bands.len());
    for band in bands {
        let outcome = process_band(catalog, &playlist.id, band, &settings.selection).await?;
        reports.push(BandReport {
            band: band.clone(),
            outcome,
        });
    }

    Ok(GenerationReport {
        playlist,
        bands: reports,
    })
}
