use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::models::{SongEntry, SongId};
use crate::error::{KaraokeError, RemoteError, Result};

/// Queries the remote songs/lyrics service.
///
/// Every call is a single attempt. Callers get the typed failure back and
/// decide for themselves whether to try again.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn top_charts(&self) -> Result<Vec<SongEntry>>;
    async fn by_artist(&self, name: &str) -> Result<Vec<SongEntry>>;
    async fn by_song(&self, title: &str) -> Result<Vec<SongEntry>>;
    async fn fetch_lyrics(&self, id: SongId) -> Result<String>;
}

#[derive(Deserialize, Debug)]
struct LyricsBody {
    #[serde(default)]
    track_id: Option<i64>,
    #[serde(default)]
    lyrics: Option<String>,
}

#[derive(Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    chart_size: usize,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration, chart_size: usize) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("karaoke-cli v{}", version);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(RemoteError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            chart_size,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_text(&self, path: &str, params: &[(&str, String)], resource: &str) -> Result<String> {
        let url = self.endpoint(path);
        debug!("GET {} {:?}", url, params);

        let mut request = self.client.get(&url).query(params);
        if let Some(ref key) = self.api_key {
            request = request.query(&[("apikey", key)]);
        }

        let response = request.send().await.map_err(RemoteError::Http)?;
        check_status(response.status(), resource)?;

        let body = response.text().await.map_err(RemoteError::Http)?;
        Ok(body)
    }

    async fn search(&self, field: &str, value: &str) -> Result<Vec<SongEntry>> {
        let value = value.trim();
        if value.is_empty() {
            return Err(KaraokeError::Validation(format!("{} search needs a non-empty query", field)));
        }

        info!("Searching catalog by {}: {}", field, value);
        let resource = format!("{} '{}'", field, value);
        let body = self
            .get_text("api/search", &[(field, value.to_string())], &resource)
            .await?;
        decode_entries(&body)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn top_charts(&self) -> Result<Vec<SongEntry>> {
        info!("Fetching top {} chart", self.chart_size);
        let body = self
            .get_text("api/charts/top", &[("limit", self.chart_size.to_string())], "top charts")
            .await?;

        let mut entries = decode_entries(&body)?;
        entries.truncate(self.chart_size);
        Ok(entries)
    }

    async fn by_artist(&self, name: &str) -> Result<Vec<SongEntry>> {
        self.search("artist", name).await
    }

    async fn by_song(&self, title: &str) -> Result<Vec<SongEntry>> {
        self.search("track", title).await
    }

    async fn fetch_lyrics(&self, id: SongId) -> Result<String> {
        let resource = format!("lyrics {}", id);
        let body = self
            .get_text(&format!("api/lyrics/{}", id), &[], &resource)
            .await?;
        decode_lyrics(&body, id)
    }
}

fn check_status(status: StatusCode, resource: &str) -> std::result::Result<(), RemoteError> {
    if status.is_success() {
        return Ok(());
    }

    if status == StatusCode::NOT_FOUND {
        return Err(RemoteError::NotFound {
            resource: resource.to_string(),
        });
    }

    Err(RemoteError::Status {
        status: status.as_u16(),
    })
}

fn decode_entries(body: &str) -> Result<Vec<SongEntry>> {
    let entries: Vec<SongEntry> = serde_json::from_str(body).map_err(|e| RemoteError::InvalidResponse {
        reason: format!("song list: {}", e),
    })?;
    Ok(entries)
}

fn decode_lyrics(body: &str, id: SongId) -> Result<String> {
    let parsed: LyricsBody = serde_json::from_str(body).map_err(|e| RemoteError::InvalidResponse {
        reason: format!("lyrics body: {}", e),
    })?;

    if let Some(returned) = parsed.track_id {
        if returned != id.get() {
            return Err(RemoteError::InvalidResponse {
                reason: format!("asked for lyrics {} but got {}", id, returned),
            }
            .into());
        }
    }

    match parsed.lyrics {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(RemoteError::NotFound {
            resource: format!("lyrics {}", id),
        }
        .into()),
    }
}
