//! User handlers for the HTTP API.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::auth::register;
use crate::db::UserRepository;
use crate::web::dto::{RegisterRequest, UserResponse};
use crate::web::error::{ApiError, ErrorBody};
use crate::web::middleware::AuthUser;
use crate::web::AppState;

/// POST /users - Register a new user.
///
/// A body that is missing or not JSON is treated as empty, so the client
/// gets `Missing email` rather than a parser error.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Missing email, Missing password or Already exist", body = ErrorBody)
    )
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Option<Json<RegisterRequest>>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let user = register(state.db.pool(), req.email.as_deref(), req.password.as_deref()).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users/me - The user behind the session token.
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "users",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(
        ("token" = [])
    )
)]
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserRepository::new(state.db.pool())
        .get_by_id(auth.user_id)
        .await?
        .ok_or_else(ApiError::unauthorized)?;

    Ok(Json(user.into()))
}
