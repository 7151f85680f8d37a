//! Core functionality modules
//!
//! - `models`: song, lyric record and resolution types
//! - `data`: offline lyrics storage
//! - `services`: remote catalog client
//! - `resolver`: decides between offline and remote lyrics

pub mod data;
pub mod models;
pub mod resolver;
pub mod services;

pub use resolver::LyricsResolver;
