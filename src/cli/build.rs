use std::path::PathBuf;

use tabled::Table;

use crate::{
    config::{Credentials, Settings},
    error,
    generator::{self, SelectionOptions},
    spotify::{self, SpotifyClient},
    success,
    types::BandTableRow,
    utils,
};

pub struct BuildArgs {
    pub playlist: Option<String>,
    pub bands: Option<PathBuf>,
    pub private: bool,
    pub selection: SelectionOptions,
}

pub async fn build(args: BuildArgs) {
    let playlist_name = match args.playlist {
        Some(name) => name.trim().to_string(),
        None => read_input("Enter playlist name: "),
    };
    if playlist_name.is_empty() {
        error!("Playlist name cannot be empty.");
    }

    let bands_path = match args.bands {
        Some(path) => path,
        None => PathBuf::from(read_input("Enter path to band names file: ")),
    };
    let bands = match generator::load_bands(&bands_path).await {
        Ok(bands) => bands,
        Err(e) => error!("{}", e),
    };

    let credentials = match Credentials::from_env() {
        Ok(c) => c,
        Err(e) => error!("{}", e),
    };

    let settings = Settings::new(credentials, playlist_name, bands_path)
        .with_public(args.private.then_some(false))
        .with_selection(args.selection);

    let tokens = match spotify::auth::authorize(&settings.credentials).await {
        Ok(t) => t,
        Err(e) => error!("{}", e),
    };
    let client = SpotifyClient::new(settings.credentials.clone(), tokens);

    let report = match generator::generate(&client, &settings, &bands).await {
        Ok(r) => r,
        Err(e) => error!("{}", e),
    };

    if !report.bands.is_empty() {
        let rows: Vec<BandTableRow> = report.bands.iter().map(BandTableRow::from).collect();
        println!("{}", Table::new(rows));
    }

    success!(
        "Done! {} tracks added to {}.",
        report.total_added(),
        settings.playlist_name
    );
}

fn read_input(label: &str) -> String {
    match utils::prompt(label) {
        Ok(input) => input,
        Err(e) => error!("Cannot read input: {}", e),
    }
}
