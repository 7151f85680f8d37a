//! Command Line Interface module
//!
//! - `browse`: downloaded lyrics, top charts and catalog searches
//! - `lyrics`: view lyrics and toggle offline storage
//! - `config`: configuration inspection

pub mod browse;
pub mod config;
pub mod lyrics;
