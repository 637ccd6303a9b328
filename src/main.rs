use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use bandlist::{cli, config, generator::SelectionOptions, utils, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Add distinct tracks of every listed band to a playlist
    Build(BuildOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct BuildOptions {
    /// Playlist to fill; created if missing (prompted when omitted)
    #[clap(long)]
    pub playlist: Option<String>,

    /// File with one band name per line (prompted when omitted)
    #[clap(long)]
    pub bands: Option<PathBuf>,

    /// Create the playlist as private instead of the service default
    #[clap(long)]
    pub private: bool,

    /// Maximum number of tracks added per band
    #[clap(long, default_value_t = 4)]
    pub tracks_per_band: usize,

    /// Number of search results considered per band (1-50)
    #[clap(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub search_limit: u32,

    /// Track names more similar than this to an already picked one are skipped
    #[clap(long, default_value = "0.7", value_parser = utils::parse_threshold)]
    pub threshold: f64,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => cli::auth().await,
        Command::Build(opt) => {
            cli::build(cli::BuildArgs {
                playlist: opt.playlist,
                bands: opt.bands,
                private: opt.private,
                selection: SelectionOptions {
                    per_band: opt.tracks_per_band,
                    search_limit: opt.search_limit,
                    threshold: opt.threshold,
                },
            })
            .await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
