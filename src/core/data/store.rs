//! Storage contract for offline lyrics
//!
//! A `LyricsStore` owns every persisted `LyricRecord`, keyed by song id.
//! Lookups of a missing id return `Ok(None)`; only real I/O failures are errors.

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};

use crate::core::models::{LyricRecord, SongId};
use crate::error::{KaraokeError, Result};

/// Number of rows fetched per round trip while enumerating the store.
pub const LIST_PAGE_SIZE: usize = 64;

#[async_trait]
pub trait LyricsStore: Send + Sync {
    /// Insert or overwrite the record stored under `record.id`.
    async fn insert(&self, record: &LyricRecord) -> Result<()>;

    async fn lookup(&self, id: SongId) -> Result<Option<LyricRecord>>;

    /// Delete the record for `id`. Deleting a missing id is a no-op.
    async fn remove(&self, id: SongId) -> Result<()>;

    /// Records with an id strictly greater than `after`, ascending by id, at most `limit`.
    async fn page(&self, after: Option<SongId>, limit: usize) -> Result<Vec<LyricRecord>>;

    /// Lazily enumerate every stored record.
    ///
    /// The stream pulls one page at a time, so it only holds a single page in
    /// memory. Each call starts over from the beginning. Callers must not rely
    /// on ordering.
    fn list_all(&self) -> BoxStream<'_, Result<LyricRecord>> {
        stream::try_unfold(Some(None::<SongId>), move |cursor| async move {
            let Some(after) = cursor else {
                return Ok::<_, KaraokeError>(None);
            };

            let batch = self.page(after, LIST_PAGE_SIZE).await?;
            let next = if batch.len() < LIST_PAGE_SIZE {
                None
            } else {
                batch.last().map(|record| Some(record.id))
            };

            Ok(Some((stream::iter(batch.into_iter().map(Ok::<_, KaraokeError>)), next)))
        })
        .try_flatten()
        .boxed()
    }
}
