//! Song listings: downloaded lyrics, top charts and catalog searches

use clap::{ArgGroup, Args};
use futures::TryStreamExt;
use tracing::info;

use crate::core::data::LyricsStore;
use crate::core::models::{LyricRecord, SongEntry};
use crate::error::{KaraokeError, Result};
use crate::services::Services;
use crate::utils::output::{print_entries, ListFormat};

#[derive(Args)]
pub struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ListFormat::Table)]
    format: ListFormat,
}

#[derive(Args)]
#[command(group(ArgGroup::new("query").required(true).args(["artist", "song"])))]
pub struct SearchArgs {
    /// Search by artist name
    #[arg(short, long)]
    artist: Option<String>,

    /// Search by song title
    #[arg(short, long)]
    song: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ListFormat::Table)]
    format: ListFormat,
}

pub async fn downloaded(args: ListArgs, services: &Services) -> Result<()> {
    let entries = downloaded_entries(services.store().as_ref()).await?;
    info!("{} downloaded song(s)", entries.len());
    print_entries(&entries, args.format, "No lyrics downloaded yet")
}

pub async fn charts(args: ListArgs, services: &Services) -> Result<()> {
    let entries = services.catalog().top_charts().await?;
    info!("Top charts returned {} song(s)", entries.len());
    print_entries(&entries, args.format, "The top charts are empty")
}

pub async fn search(args: SearchArgs, services: &Services) -> Result<()> {
    let catalog = services.catalog();
    let entries = match (args.artist.as_deref(), args.song.as_deref()) {
        (Some(artist), _) => catalog.by_artist(artist).await?,
        (None, Some(song)) => catalog.by_song(song).await?,
        (None, None) => {
            return Err(KaraokeError::Validation("search needs --artist or --song".to_string()));
        }
    };

    info!("Found {} song(s)", entries.len());
    print_entries(&entries, args.format, "No songs found matching the given criteria")
}

/// Every offline record as a listing entry, sorted for display.
pub async fn downloaded_entries(store: &dyn LyricsStore) -> Result<Vec<SongEntry>> {
    let mut entries: Vec<SongEntry> = store
        .list_all()
        .map_ok(|record: LyricRecord| record.to_entry())
        .try_collect()
        .await?;

    entries.sort_by(|a, b| {
        a.artist
            .to_lowercase()
            .cmp(&b.artist.to_lowercase())
            .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
    });
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::memory::MemoryLyricsStore;
    use crate::core::models::SongId;

    #[tokio::test]
    async fn test_downloaded_entries_sorted_by_artist_then_title() {
        let store = MemoryLyricsStore::with_records(vec![
            LyricRecord::new(SongId::new(1).unwrap(), "Zebra", "beta", "z"),
            LyricRecord::new(SongId::new(2).unwrap(), "Apple", "Beta", "a"),
            LyricRecord::new(SongId::new(3).unwrap(), "Mango", "Alpha", "m"),
        ]);

        let entries = downloaded_entries(&store).await.unwrap();
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Mango", "Apple", "Zebra"]);
        assert_eq!(entries[0], SongEntry { id: 3, title: "Mango".into(), artist: "Alpha".into() });
    }

    #[tokio::test]
    async fn test_downloaded_entries_empty_store() {
        let store = MemoryLyricsStore::new();
        assert!(downloaded_entries(&store).await.unwrap().is_empty());
    }
}
