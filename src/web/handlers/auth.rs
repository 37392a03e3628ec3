//! Session handlers for the HTTP API.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::auth::CredentialVerifier;
use crate::web::dto::TokenResponse;
use crate::web::error::{ApiError, ErrorBody};
use crate::web::middleware::AuthUser;
use crate::web::AppState;

/// GET /connect - Exchange Basic credentials for a session token.
#[utoipa::path(
    get,
    path = "/connect",
    tag = "auth",
    responses(
        (status = 200, description = "Session token", body = TokenResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(
        ("basic" = [])
    )
)]
pub async fn connect(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());

    let user_id = CredentialVerifier::new(state.db.pool())
        .verify(header)
        .await?;
    let session = state.sessions.issue(user_id).await?;

    Ok(Json(TokenResponse {
        token: session.token,
    }))
}

/// GET /disconnect - Revoke the presented session token.
#[utoipa::path(
    get,
    path = "/disconnect",
    tag = "auth",
    responses(
        (status = 204, description = "Signed out"),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(
        ("token" = [])
    )
)]
pub async fn disconnect(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<StatusCode, ApiError> {
    state.sessions.revoke(&auth.token).await?;
    tracing::info!(user_id = auth.user_id, "User signed out");

    Ok(StatusCode::NO_CONTENT)
}
