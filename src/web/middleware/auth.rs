//! Session token extractors.
//!
//! Clients authenticate with the `X-Token` header carrying a token issued
//! by `GET /connect`.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use crate::logging::record_user;
use crate::web::error::ApiError;
use crate::web::AppState;

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "x-token";

fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Extractor for authenticated users.
///
/// Missing, unknown and expired tokens are all rejected with the same
/// `Unauthorized` error.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Resolved user ID.
    pub user_id: i64,
    /// Token the request presented.
    pub token: String,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers).ok_or_else(ApiError::unauthorized)?;

        let user_id = state
            .sessions
            .resolve(&token)
            .await?
            .ok_or_else(|| {
                tracing::debug!("Session token did not resolve");
                ApiError::unauthorized()
            })?;

        record_user(user_id);
        Ok(AuthUser { user_id, token })
    }
}

/// Optional authentication extractor.
///
/// Like [`AuthUser`] but yields `None` instead of failing, so anonymous
/// requests reach the handler.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<i64>);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for OptionalAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let Some(token) = token_from_headers(&parts.headers) else {
            return Ok(OptionalAuthUser(None));
        };

        let user_id = state.sessions.resolve(&token).await?;
        if let Some(user_id) = user_id {
            record_user(user_id);
        }
        Ok(OptionalAuthUser(user_id))
    }
}
