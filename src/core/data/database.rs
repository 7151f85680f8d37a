//! SQLite-backed lyrics store
//!
//! One connection per process, shared behind a mutex. All SQLite calls run on
//! the blocking pool so the async runtime never stalls on disk I/O.

use async_trait::async_trait;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::core::data::store::LyricsStore;
use crate::core::models::{LyricRecord, SongId};
use crate::error::{Result, StorageError};

const CURRENT_DB_VERSION: u32 = 1;

#[derive(Clone)]
pub struct SqliteLyricsStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteLyricsStore {
    pub async fn open(db_path: &Path) -> Result<Self> {
        info!("Opening lyrics database at: {}", db_path.display());

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
            }
        }

        let conn = Connection::open(db_path).map_err(StorageError::Connection)?;

        // WAL keeps readers unblocked while a toggle is writing
        let mode: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(StorageError::Connection)?;
        debug!("SQLite journal mode: {}", mode);

        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::Connection)?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        let existing_version: u32 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .map_err(StorageError::from)?;

        if existing_version != CURRENT_DB_VERSION {
            Self::upgrade_database(&mut conn, existing_version)?;
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Schema changes are destructive: any version mismatch drops the table.
    fn upgrade_database(conn: &mut Connection, existing_version: u32) -> Result<()> {
        if existing_version != 0 {
            warn!(
                "Lyrics database version {} does not match {}, discarding offline lyrics",
                existing_version, CURRENT_DB_VERSION
            );
        } else {
            debug!("Creating lyrics database schema version {}", CURRENT_DB_VERSION);
        }

        let tx = conn.transaction().map_err(StorageError::from)?;

        tx.execute_batch(
            r#"
            DROP TABLE IF EXISTS lyrics;

            CREATE TABLE lyrics (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                artist TEXT NOT NULL,
                lyric_text TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| StorageError::Migration(e.to_string()))?;

        tx.pragma_update(None, "user_version", CURRENT_DB_VERSION)
            .map_err(|e| StorageError::Migration(e.to_string()))?;

        tx.commit().map_err(StorageError::from)?;

        info!("Lyrics database ready (schema version {})", CURRENT_DB_VERSION);
        Ok(())
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| StorageError::Poisoned)?;
            f(&*guard).map_err(StorageError::from)
        })
        .await
        .map_err(StorageError::Task)?
        .map_err(Into::into)
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<LyricRecord> {
    let raw_id: i64 = row.get(0)?;
    let id = SongId::new(raw_id).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, Type::Integer, e.to_string().into())
    })?;

    Ok(LyricRecord {
        id,
        title: row.get(1)?,
        artist: row.get(2)?,
        lyrics: row.get(3)?,
    })
}

#[async_trait]
impl LyricsStore for SqliteLyricsStore {
    async fn insert(&self, record: &LyricRecord) -> Result<()> {
        let record = record.clone();
        debug!("Storing lyrics for {} ({} - {})", record.id, record.artist, record.title);

        self.with_conn(move |conn| {
            conn.execute(
                r#"
                INSERT OR REPLACE INTO lyrics (id, title, artist, lyric_text)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![record.id.get(), record.title, record.artist, record.lyrics],
            )
        })
        .await?;

        Ok(())
    }

    async fn lookup(&self, id: SongId) -> Result<Option<LyricRecord>> {
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT id, title, artist, lyric_text FROM lyrics WHERE id = ?1",
                params![id.get()],
                record_from_row,
            )
            .optional()
        })
        .await
    }

    async fn remove(&self, id: SongId) -> Result<()> {
        let removed = self
            .with_conn(move |conn| conn.execute("DELETE FROM lyrics WHERE id = ?1", params![id.get()]))
            .await?;

        debug!("Removed {} lyric record(s) for {}", removed, id);
        Ok(())
    }

    async fn page(&self, after: Option<SongId>, limit: usize) -> Result<Vec<LyricRecord>> {
        let after = after.map(SongId::get).unwrap_or(-1);
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT id, title, artist, lyric_text
                FROM lyrics
                WHERE id > ?1
                ORDER BY id
                LIMIT ?2
                "#,
            )?;

            let records = stmt
                .query_map(params![after, limit], record_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(records)
        })
        .await
    }
}
