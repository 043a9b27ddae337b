use std::time::Duration;

use async_trait::async_trait;
use mememart_core::config::CatalogConfig;
use mememart_core::{enrich_all, CatalogError, CatalogSource, EnrichedMeme};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

use crate::envelope::decode_envelope;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("meme API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("meme API returned status {status}")]
    Status { status: StatusCode },
    #[error("meme API response was malformed: {0}")]
    Schema(String),
}

impl From<FetchError> for CatalogError {
    fn from(error: FetchError) -> Self {
        match error {
            FetchError::Transport(source) => CatalogError::Transport(source.to_string()),
            FetchError::Status { status } => {
                CatalogError::Transport(format!("upstream returned status {status}"))
            }
            FetchError::Schema(detail) => CatalogError::Schema(detail),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ImgflipClient {
    http: Client,
    api_url: String,
}

impl ImgflipClient {
    /// Builds a client with the configured endpoint and request timeout. The
    /// timeout is the only deadline anywhere in a fetch.
    pub fn new(config: &CatalogConfig) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
        Ok(Self { http, api_url: config.api_url.clone() })
    }

    /// Reuses an existing `reqwest::Client` (connection pool and all).
    pub fn with_client(http: Client, api_url: impl Into<String>) -> Self {
        Self { http, api_url: api_url.into() }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// One GET, one decode, one enrichment pass, source order preserved.
    pub async fn fetch(&self) -> Result<Vec<EnrichedMeme>, FetchError> {
        let response = self.http.get(&self.api_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, url = %self.api_url, "meme API returned non-success status");
            return Err(FetchError::Status { status });
        }

        let body = response.text().await?;
        let raw = decode_envelope(&body)?;
        let catalog = enrich_all(raw);

        debug!(count = catalog.len(), url = %self.api_url, "meme catalog fetched and enriched");
        Ok(catalog)
    }
}

#[async_trait]
impl CatalogSource for ImgflipClient {
    async fn fetch_catalog(&self) -> Result<Vec<EnrichedMeme>, CatalogError> {
        self.fetch().await.map_err(CatalogError::from)
    }
}
