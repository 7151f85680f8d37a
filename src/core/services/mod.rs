//! External services integration
//!
//! - `catalog`: client for the remote songs/lyrics catalog

pub mod catalog;

pub use catalog::{CatalogClient, HttpCatalogClient};
