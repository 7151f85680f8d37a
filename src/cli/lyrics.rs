//! View a song's lyrics and flip its offline state

use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::info;

use crate::core::models::{CacheState, SongId};
use crate::core::LyricsResolver;
use crate::error::Result;
use crate::services::Services;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LyricsFormat {
    Text,
    Json,
}

#[derive(Args)]
pub struct LyricsArgs {
    /// Song identifier as shown in listings
    #[arg(value_name = "ID")]
    id: String,

    /// Song title
    #[arg(short, long)]
    title: String,

    /// Artist name
    #[arg(short, long)]
    artist: String,

    /// Save the lyrics for offline use, or remove them if already saved
    #[arg(long)]
    toggle: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = LyricsFormat::Text)]
    format: LyricsFormat,
}

#[derive(Debug, Serialize)]
pub struct LyricsView {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub lyrics: String,
    pub state: CacheState,
}

pub async fn execute(args: LyricsArgs, services: &Services) -> Result<()> {
    let view = match view_lyrics(services.resolver(), &args).await {
        Ok(view) => view,
        Err(e) if e.is_not_found_remote() => {
            print!("{}", render_not_found(&args)?);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    match args.format {
        LyricsFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        LyricsFormat::Text => {
            println!("{} - {} [{}]", view.artist, view.title, view.state.as_str());
            println!();
            println!("{}", view.lyrics);
        }
    }

    Ok(())
}

/// Output for a song the catalog has no lyrics for, in the requested format.
pub fn render_not_found(args: &LyricsArgs) -> Result<String> {
    let rendered = match args.format {
        LyricsFormat::Json => {
            let body = serde_json::json!({
                "id": SongId::parse_lenient(&args.id),
                "title": args.title,
                "artist": args.artist,
                "lyrics": null,
            });
            format!("{}\n", serde_json::to_string_pretty(&body)?)
        }
        LyricsFormat::Text => format!("No lyrics available for {} - {}\n", args.artist, args.title),
    };
    Ok(rendered)
}

/// Resolve the lyrics, then apply the toggle if requested.
///
/// The persistence flag passed to the toggle always comes from the resolution
/// made in this call, never from earlier state.
pub async fn view_lyrics(resolver: &LyricsResolver, args: &LyricsArgs) -> Result<LyricsView> {
    let id = SongId::parse_lenient(&args.id);
    let resolution = resolver.resolve(id, &args.title, &args.artist).await?;
    let mut state = resolution.state();

    if args.toggle {
        state = resolver
            .toggle(id, &args.title, &args.artist, &resolution.lyrics, resolution.is_persisted)
            .await?;

        match state {
            CacheState::Cached => info!("Saved lyrics for offline use: {} - {}", args.artist, args.title),
            CacheState::NotCached => info!("Removed offline lyrics: {} - {}", args.artist, args.title),
        }
    }

    Ok(LyricsView {
        id,
        title: args.title.clone(),
        artist: args.artist.clone(),
        lyrics: resolution.lyrics,
        state,
    })
}
