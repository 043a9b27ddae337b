use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use mememart_core::CatalogSource;
use serde::Serialize;

use crate::routes::AppState;

#[derive(Clone)]
pub struct HealthState {
    source: Arc<dyn CatalogSource>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub upstream: HealthCheck,
    pub checked_at: String,
}

pub fn router(state: &AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(HealthState { source: state.source.clone() })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let upstream = upstream_check(state.source.as_ref()).await;
    let ready = upstream.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "mememart-server runtime initialized".to_string(),
        },
        upstream,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

async fn upstream_check(source: &dyn CatalogSource) -> HealthCheck {
    match source.fetch_catalog().await {
        Ok(catalog) => HealthCheck {
            status: "ready",
            detail: format!("upstream catalog fetch succeeded ({} memes)", catalog.len()),
        },
        Err(error) => HealthCheck {
            status: "degraded",
            detail: format!("upstream catalog fetch failed: {error}"),
        },
    }
}
