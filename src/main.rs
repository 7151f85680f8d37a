use clap::{Parser, Subcommand};
use tracing::error;

mod cli;
mod config;
mod core;
mod error;
mod services;
mod utils;

use cli::{browse, lyrics};
use config::Config;
use error::Result;
use services::Services;

#[derive(Parser)]
#[command(name = "karaoke")]
#[command(about = "Browse song lyrics and keep your favourites offline")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List lyrics saved for offline use
    Downloaded(browse::ListArgs),

    /// Show the top charts
    Charts(browse::ListArgs),

    /// Search the catalog by artist or song title
    Search(browse::SearchArgs),

    /// Show lyrics for a song and optionally save or remove them offline
    Lyrics(lyrics::LyricsArgs),

    /// Show configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    utils::logging::init_logging(cli.verbose)?;

    let config = Config::load(cli.config.as_deref())?;

    let catalog_url = config.catalog_url.clone();
    let result = run(cli.command, config).await;

    if let Err(ref e) = result {
        if e.is_transport() {
            error!("Could not talk to the catalog at {}", catalog_url);
        }
    }
    result
}

async fn run(command: Commands, config: Config) -> Result<()> {
    match command {
        // Configuration inspection must work even when the database cannot be opened
        Commands::Config(args) => cli::config::execute(args, &config).await,
        Commands::Downloaded(args) => browse::downloaded(args, &Services::new(&config).await?).await,
        Commands::Charts(args) => browse::charts(args, &Services::new(&config).await?).await,
        Commands::Search(args) => browse::search(args, &Services::new(&config).await?).await,
        Commands::Lyrics(args) => lyrics::execute(args, &Services::new(&config).await?).await,
    }
}
