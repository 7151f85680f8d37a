//! Data layer modules
//!
//! This module contains the offline lyrics storage:
//! - `store`: the `LyricsStore` contract
//! - `database`: SQLite implementation used by the application
//! - `memory`: in-memory implementation for tests

pub mod database;
pub mod store;

#[cfg(test)]
pub mod memory;

// Re-export main types
pub use database::SqliteLyricsStore;
pub use store::LyricsStore;
