//! In-memory lyrics store with call counters, used to observe the resolver.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::core::data::store::LyricsStore;
use crate::core::models::{LyricRecord, SongId};
use crate::error::Result;

#[derive(Default)]
pub struct MemoryLyricsStore {
    records: Mutex<BTreeMap<SongId, LyricRecord>>,
    lookups: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryLyricsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<LyricRecord>) -> Self {
        let store = Self::new();
        {
            let mut map = store.records.lock().unwrap();
            for record in records {
                map.insert(record.id, record);
            }
        }
        store
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Inserts plus removes.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<LyricRecord> {
        self.records.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl LyricsStore for MemoryLyricsStore {
    async fn insert(&self, record: &LyricRecord) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.records.lock().unwrap().insert(record.id, record.clone());
        Ok(())
    }

    async fn lookup(&self, id: SongId) -> Result<Option<LyricRecord>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }

    async fn remove(&self, id: SongId) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.records.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn page(&self, after: Option<SongId>, limit: usize) -> Result<Vec<LyricRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .values()
            .filter(|r| after.map_or(true, |a| r.id > a))
            .take(limit)
            .cloned()
            .collect())
    }
}
