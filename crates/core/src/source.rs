use async_trait::async_trait;

use crate::domain::meme::EnrichedMeme;
use crate::errors::CatalogError;

/// Anything that can produce a freshly fetched, freshly enriched catalog.
/// Every call re-fetches; callers wanting fetch-once-reuse hold the returned
/// Vec themselves.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Vec<EnrichedMeme>, CatalogError>;
}
