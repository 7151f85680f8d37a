//! Offline-first lyrics resolution
//!
//! A song is either `Cached` (a record exists in the lyrics store) or
//! `NotCached`. Resolving reads the store first and only falls back to the
//! remote catalog on a miss. Cached copies are never refreshed from the
//! catalog. Toggling flips the state according to the flag the caller holds,
//! which should come from the latest `resolve`.
//!
//! The resolver does no per-song locking. Two concurrent toggles of the same
//! song leave whichever write reached the store last.

use std::sync::Arc;
use tracing::debug;

use crate::core::data::LyricsStore;
use crate::core::models::{CacheState, LyricRecord, Resolution, SongId};
use crate::core::services::CatalogClient;
use crate::error::Result;

#[derive(Clone)]
pub struct LyricsResolver {
    store: Arc<dyn LyricsStore>,
    catalog: Arc<dyn CatalogClient>,
}

impl LyricsResolver {
    pub fn new(store: Arc<dyn LyricsStore>, catalog: Arc<dyn CatalogClient>) -> Self {
        Self { store, catalog }
    }

    pub async fn resolve(&self, id: i64, title: &str, artist: &str) -> Result<Resolution> {
        let id = SongId::new(id)?;

        if let Some(record) = self.store.lookup(id).await? {
            debug!("Serving offline lyrics for {}: {} - {}", id, artist, title);
            return Ok(Resolution {
                lyrics: record.lyrics,
                is_persisted: true,
            });
        }

        debug!("No offline lyrics for {}: {} - {}, asking catalog", id, artist, title);
        let lyrics = self.catalog.fetch_lyrics(id).await?;

        Ok(Resolution {
            lyrics,
            is_persisted: false,
        })
    }

    /// Flip the offline state of a song and return the new state.
    pub async fn toggle(
        &self,
        id: i64,
        title: &str,
        artist: &str,
        current_lyrics: &str,
        currently_persisted: bool,
    ) -> Result<CacheState> {
        let id = SongId::new(id)?;

        if currently_persisted {
            self.store.remove(id).await?;
            debug!("Removed offline lyrics for {}: {} - {}", id, artist, title);
            Ok(CacheState::NotCached)
        } else {
            let record = LyricRecord::new(id, title, artist, current_lyrics);
            self.store.insert(&record).await?;
            debug!("Saved offline lyrics for {}: {} - {}", id, artist, title);
            Ok(CacheState::Cached)
        }
    }
}
