use crate::{
    Res, info,
    spotify::Catalog,
    success,
    types::{BandOutcome, Track},
    utils,
    utils::spinner,
};

/// Bounds of the per band track selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionOptions {
    /// Tracks added per band at most.
    pub per_band: usize,
    /// Candidates requested from the search.
    pub search_limit: u32,
    /// Names more similar than this to an already selected name are skipped.
    pub threshold: f64,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            per_band: 4,
            search_limit: 20,
            threshold: 0.7,
        }
    }
}

pub fn artist_query(band: &str) -> String {
    format!("artist:{}", band)
}

/// Greedily picks candidates whose names are pairwise dissimilar.
///
/// Candidates are visited in the given order. A candidate is taken when its
/// name's similarity to every already taken name is at most
/// `options.threshold`; the scan ends once `options.per_band` are taken.
pub fn select_distinct<'a>(candidates: &'a [Track], options: &SelectionOptions) -> Vec<&'a Track> {
    let mut selected: Vec<&Track> = Vec::with_capacity(options.per_band);

    for candidate in candidates {
        if selected.len() >= options.per_band {
            break;
        }

        let distinct = selected
            .iter()
            .all(|s| utils::similarity(&candidate.name, &s.name) <= options.threshold);
        if distinct {
            selected.push(candidate);
        }
    }

    selected
}

/// Searches tracks for `band` and appends a distinct selection to the
/// playlist. Returns how many tracks were appended, or
/// [`BandOutcome::NoTracksFound`] when the search left nothing to append.
///
/// Makes exactly one search call and at most one append call. Each selected
/// candidate contributes its own URI, so two candidates sharing a name can
/// never both end up in the playlist.
pub async fn process_band<C: Catalog>(
    catalog: &C,
    playlist_id: &str,
    band: &str,
    options: &SelectionOptions,
) -> Res<BandOutcome> {
    info!("Processing band: {}", band);

    let pb = spinner(format!("Searching tracks for {}...", band));
    let candidates = catalog
        .search_tracks(&artist_query(band), options.search_limit)
        .await;
    pb.finish_and_clear();
    let candidates = candidates?;

    let uris: Vec<String> = select_distinct(&candidates, options)
        .into_iter()
        .map(|t| t.uri.clone())
        .collect();

    if uris.is_empty() {
        info!("No tracks found for {}", band);
        return Ok(BandOutcome::NoTracksFound);
    }

    catalog.add_tracks(playlist_id, &uris).await?;
    success!("Added {} tracks for band {}", uris.len(), band);

    Ok(BandOutcome::Added(uris.len()))
}
