//! Process-wide service handles
//!
//! `Services` is built once at startup. It opens the lyrics database a single
//! time and hands out shared handles, so commands never reopen the store.

use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::core::data::{LyricsStore, SqliteLyricsStore};
use crate::core::services::{CatalogClient, HttpCatalogClient};
use crate::core::LyricsResolver;
use crate::error::Result;

pub struct Services {
    store: Arc<dyn LyricsStore>,
    catalog: Arc<dyn CatalogClient>,
    resolver: LyricsResolver,
}

impl Services {
    pub async fn new(config: &Config) -> Result<Self> {
        let store: Arc<dyn LyricsStore> = Arc::new(SqliteLyricsStore::open(&config.database_path).await?);

        let catalog: Arc<dyn CatalogClient> = Arc::new(HttpCatalogClient::new(
            &config.catalog_url,
            config.api_key.clone(),
            config.request_timeout(),
            config.chart_size,
        )?);

        let resolver = LyricsResolver::new(store.clone(), catalog.clone());

        debug!("Services ready (catalog: {})", config.catalog_url);
        Ok(Self {
            store,
            catalog,
            resolver,
        })
    }

    pub fn store(&self) -> Arc<dyn LyricsStore> {
        self.store.clone()
    }

    pub fn catalog(&self) -> Arc<dyn CatalogClient> {
        self.catalog.clone()
    }

    pub fn resolver(&self) -> &LyricsResolver {
        &self.resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{LyricRecord, SongId};

    #[tokio::test]
    async fn test_resolver_shares_the_store_handle() {
        let dir = std::env::temp_dir().join(format!("karaoke-services-test-{}", std::process::id()));
        let config = Config {
            database_path: dir.join("lyrics.db"),
            ..Config::default()
        };

        let services = Services::new(&config).await.unwrap();
        services
            .store()
            .insert(&LyricRecord::new(SongId::new(5).unwrap(), "Song", "Artist", "offline words"))
            .await
            .unwrap();

        // Served from the store, so no catalog needs to be reachable
        let resolution = services.resolver().resolve(5, "Song", "Artist").await.unwrap();
        assert!(resolution.is_persisted);
        assert_eq!(resolution.lyrics, "offline words");

        drop(services);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
