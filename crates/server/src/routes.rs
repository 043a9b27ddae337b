//! Catalog API routes.
//!
//! JSON endpoints:
//! - `GET /api/v1/memes?search=&category=&sort=` — filtered, sorted catalog
//! - `GET /api/v1/memes/{id}`                    — one item
//! - `GET /api/v1/memes/{id}/related?limit=`     — same-category sample
//! - `GET /api/v1/stats`                         — dashboard aggregates
//!
//! Every request re-fetches the upstream catalog; there is no cache, so
//! overlapping requests race benignly and each response reflects one fetch.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use mememart_core::{
    current_day_index, distinct_category_count, find_meme, item_of_period, most_popular, related,
    view, CatalogError, CatalogQuery, CatalogSource, Category, CategoryFilter, EnrichedMeme,
    MemeId, SortKey,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn CatalogSource>,
    pub related_limit: usize,
}

impl AppState {
    pub fn new(source: Arc<dyn CatalogSource>, related_limit: usize) -> Self {
        Self { source, related_limit }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/memes", get(list_memes))
        .route("/api/v1/memes/{id}", get(get_meme))
        .route("/api/v1/memes/{id}/related", get(related_memes))
        .route("/api/v1/stats", get(stats))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RelatedParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub count: usize,
    pub memes: Vec<EnrichedMeme>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_memes: usize,
    pub categories: usize,
    pub most_popular: Option<EnrichedMeme>,
    pub meme_of_the_day: Option<EnrichedMeme>,
}

#[derive(Debug)]
pub enum ApiError {
    Catalog(CatalogError),
    BadRequest(String),
}

impl From<CatalogError> for ApiError {
    fn from(error: CatalogError) -> Self {
        Self::Catalog(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Catalog(error) => {
                let status = match &error {
                    CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
                    CatalogError::Transport(_) | CatalogError::Schema(_) => StatusCode::BAD_GATEWAY,
                };
                if status == StatusCode::BAD_GATEWAY {
                    warn!(error = %error, "upstream catalog request failed");
                }
                (status, error.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub async fn list_memes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError> {
    // "All" (any casing) is the no-op filter; an unknown category is a
    // client error since the set is closed. Unknown sort spellings degrade
    // to "leave order unchanged".
    let category = match params.category.as_deref() {
        None => CategoryFilter::All,
        Some(raw) if raw.eq_ignore_ascii_case("all") => CategoryFilter::All,
        Some(raw) => CategoryFilter::Only(
            raw.parse::<Category>().map_err(|error| ApiError::BadRequest(error.to_string()))?,
        ),
    };
    let sort = params.sort.as_deref().and_then(|raw| raw.parse::<SortKey>().ok());

    let catalog = state.source.fetch_catalog().await?;
    let query =
        CatalogQuery { search_term: params.search.unwrap_or_default(), category, sort };
    let memes = view(&catalog, &query);

    Ok(Json(ListResponse { count: memes.len(), memes }))
}

pub async fn get_meme(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EnrichedMeme>, ApiError> {
    let catalog = state.source.fetch_catalog().await?;
    let meme = find_meme(&catalog, &MemeId(id))?;

    Ok(Json(meme.clone()))
}

pub async fn related_memes(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<RelatedParams>,
) -> Result<Json<ListResponse>, ApiError> {
    let catalog = state.source.fetch_catalog().await?;
    let focal = find_meme(&catalog, &MemeId(id))?;

    let limit = params.limit.unwrap_or(state.related_limit);
    let memes = related(&catalog, focal, limit);

    Ok(Json(ListResponse { count: memes.len(), memes }))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let catalog = state.source.fetch_catalog().await?;

    Ok(Json(StatsResponse {
        total_memes: catalog.len(),
        categories: distinct_category_count(&catalog),
        most_popular: most_popular(&catalog).cloned(),
        meme_of_the_day: item_of_period(&catalog, current_day_index()).cloned(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::extract::{Path, Query, State};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Json};
    use mememart_core::{
        enrich, CatalogError, CatalogSource, EnrichedMeme, MemeId, RawMeme,
    };

    use super::{
        get_meme, list_memes, related_memes, stats, ApiError, AppState, ListParams, RelatedParams,
    };

    struct FixtureSource {
        catalog: Vec<EnrichedMeme>,
    }

    #[async_trait]
    impl CatalogSource for FixtureSource {
        async fn fetch_catalog(&self) -> Result<Vec<EnrichedMeme>, CatalogError> {
            Ok(self.catalog.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl CatalogSource for FailingSource {
        async fn fetch_catalog(&self) -> Result<Vec<EnrichedMeme>, CatalogError> {
            Err(CatalogError::Transport("connection refused".to_string()))
        }
    }

    fn meme(id: &str, name: &str) -> EnrichedMeme {
        enrich(RawMeme {
            id: MemeId(id.to_string()),
            name: name.to_string(),
            url: format!("https://i.imgflip.com/{id}.jpg"),
            width: 500,
            height: 400,
        })
    }

    fn fixture_state() -> AppState {
        let catalog = vec![
            meme("1", "Doge"),
            meme("2", "Cat"),
            meme("3", "PEPE"),
            meme("4", "Frog"),
            meme("5", "Success Kid"),
        ];
        AppState::new(Arc::new(FixtureSource { catalog }), 3)
    }

    #[tokio::test]
    async fn list_applies_search_and_sort() {
        let params = ListParams {
            search: Some("e".to_string()),
            category: None,
            sort: Some("name_asc".to_string()),
        };

        let Json(payload) = list_memes(State(fixture_state()), Query(params))
            .await
            .expect("list should succeed");

        let names: Vec<&str> = payload.memes.iter().map(|meme| meme.name.as_str()).collect();
        assert_eq!(names, ["Doge", "PEPE", "Success Kid"]);
        assert_eq!(payload.count, 3);
    }

    #[tokio::test]
    async fn list_rejects_unknown_categories() {
        let params =
            ListParams { category: Some("sports".to_string()), ..ListParams::default() };

        let error = list_memes(State(fixture_state()), Query(params))
            .await
            .expect_err("unknown category must be a client error");
        assert!(matches!(error, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn list_degrades_unknown_sort_to_source_order() {
        let params = ListParams { sort: Some("popularity".to_string()), ..ListParams::default() };

        let Json(payload) = list_memes(State(fixture_state()), Query(params))
            .await
            .expect("unknown sort should not fail");

        let ids: Vec<&str> = payload.memes.iter().map(|meme| meme.id.0.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5"]);
    }

    #[tokio::test]
    async fn detail_misses_with_not_found() {
        let found = get_meme(State(fixture_state()), Path("3".to_string()))
            .await
            .expect("id 3 exists");
        assert_eq!(found.0.name, "PEPE");

        let error = get_meme(State(fixture_state()), Path("99".to_string()))
            .await
            .expect_err("id 99 is absent");
        assert!(matches!(error, ApiError::Catalog(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn related_excludes_the_focal_item_and_respects_the_limit() {
        let Json(payload) = related_memes(
            State(fixture_state()),
            Path("1".to_string()),
            Query(RelatedParams { limit: Some(2) }),
        )
        .await
        .expect("related should succeed");

        assert!(payload.count <= 2);
        assert!(payload.memes.iter().all(|meme| meme.id != MemeId("1".to_string())));
    }

    #[tokio::test]
    async fn stats_reports_aggregates() {
        let Json(payload) =
            stats(State(fixture_state())).await.expect("stats should succeed");

        assert_eq!(payload.total_memes, 5);
        assert!(payload.categories >= 1);
        assert!(payload.most_popular.is_some());
        assert!(payload.meme_of_the_day.is_some());
    }

    #[tokio::test]
    async fn transport_failures_map_to_bad_gateway() {
        let state = AppState::new(Arc::new(FailingSource), 3);
        let error = stats(State(state)).await.expect_err("failing source must error");

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn not_found_maps_to_404_with_error_body() {
        let error = ApiError::Catalog(CatalogError::NotFound("99".to_string()));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
