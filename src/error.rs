//! Error handling for the karaoke application
//!
//! Every failure is surfaced as a typed `KaraokeError`. The resolution engine
//! never recovers on its own; the command layer decides what to show. A missing
//! key in the lyrics store is not an error and never shows up here.

use rusqlite::ffi;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KaraokeError {
    #[error("Invalid song identifier: '{value}'")]
    InvalidIdentifier { value: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Remote catalog error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Connection failed: {0}")]
    Connection(#[source] rusqlite::Error),

    #[error("Query failed: {0}")]
    Query(#[source] rusqlite::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Database corruption detected")]
    Corruption,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Storage lock poisoned")]
    Poisoned,
}

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Nothing found for {resource}")]
    NotFound { resource: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog responded with status {status}")]
    Status { status: u16 },

    #[error("Catalog response invalid: {reason}")]
    InvalidResponse { reason: String },
}

impl RemoteError {
    /// True for the "remote returned nothing" class, false for transport failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::NotFound { .. })
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine {what} directory")]
    NoProjectDirs { what: &'static str },

    #[error("Unknown configuration key: {key}")]
    UnknownKey { key: String },
}

pub type Result<T> = std::result::Result<T, KaraokeError>;

impl KaraokeError {
    pub fn invalid_identifier(value: impl ToString) -> Self {
        KaraokeError::InvalidIdentifier { value: value.to_string() }
    }

    pub fn is_not_found_remote(&self) -> bool {
        matches!(self, KaraokeError::Remote(e) if e.is_not_found())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, KaraokeError::Remote(e) if !e.is_not_found())
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ffi::Error { code: ffi::ErrorCode::DatabaseCorrupt, .. }, _) => {
                StorageError::Corruption
            }
            _ => StorageError::Query(err),
        }
    }
}

impl From<serde_json::Error> for KaraokeError {
    fn from(err: serde_json::Error) -> Self {
        KaraokeError::Internal(err.into())
    }
}

impl From<toml::de::Error> for KaraokeError {
    fn from(err: toml::de::Error) -> Self {
        KaraokeError::Config(ConfigError::InvalidFormat(err))
    }
}

impl From<toml::ser::Error> for KaraokeError {
    fn from(err: toml::ser::Error) -> Self {
        KaraokeError::Config(ConfigError::Serialize(err))
    }
}
