//! Service status handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::web::dto::{StatsResponse, StatusResponse};
use crate::web::error::{ApiError, ErrorBody};
use crate::web::AppState;

/// GET /status - Liveness of the cache and the document store.
#[utoipa::path(
    get,
    path = "/status",
    tag = "app",
    responses(
        (status = 200, description = "Backing store liveness", body = StatusResponse)
    )
)]
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(state.stats().health().await.into())
}

/// GET /stats - Number of users and files.
#[utoipa::path(
    get,
    path = "/stats",
    tag = "app",
    responses(
        (status = 200, description = "Entity counts", body = StatsResponse),
        (status = 500, description = "Store unavailable", body = ErrorBody)
    )
)]
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state.stats().stats().await?;
    Ok(Json(stats.into()))
}

/// GET /health - Process is up.
pub async fn health_check() -> &'static str {
    "OK"
}
