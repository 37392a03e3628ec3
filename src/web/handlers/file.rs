//! File handlers for the HTTP API.

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use mime_guess::mime;
use std::sync::Arc;

use crate::file::{Page, ROOT_PARENT_ID};
use crate::web::dto::{CreateFileBody, FileDataQuery, FileResponse, ListFilesQuery};
use crate::web::error::{ApiError, ErrorBody};
use crate::web::middleware::{AuthUser, OptionalAuthUser};
use crate::web::AppState;

/// Parse a path ID. Anything that is not an integer cannot name a file.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse().map_err(|_| ApiError::not_found())
}

/// Content type for a file name; text types declare UTF-8.
fn content_type_for(name: &str) -> String {
    let mime = mime_guess::from_path(name).first_or_octet_stream();
    if mime.type_() == mime::TEXT && mime.get_param(mime::CHARSET).is_none() {
        format!("{mime}; charset=utf-8")
    } else {
        mime.to_string()
    }
}

/// POST /files - Create a file or folder.
#[utoipa::path(
    post,
    path = "/files",
    tag = "files",
    request_body = CreateFileBody,
    responses(
        (status = 201, description = "Created", body = FileResponse),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(
        ("token" = [])
    )
)]
pub async fn create_file(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    body: Option<Json<CreateFileBody>>,
) -> Result<(StatusCode, Json<FileResponse>), ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let file = state.files().create(auth.user_id, req.into()).await?;

    Ok((StatusCode::CREATED, Json(file.into())))
}

/// GET /files/:id - Get an owned file.
#[utoipa::path(
    get,
    path = "/files/{id}",
    tag = "files",
    params(
        ("id" = i64, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File", body = FileResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    ),
    security(
        ("token" = [])
    )
)]
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let file = state.files().get(auth.user_id, parse_id(&id)?).await?;
    Ok(Json(file.into()))
}

/// GET /files - List owned files under a parent, 20 per page.
#[utoipa::path(
    get,
    path = "/files",
    tag = "files",
    params(ListFilesQuery),
    responses(
        (status = 200, description = "Page of files", body = Vec<FileResponse>),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    ),
    security(
        ("token" = [])
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let parent_id = match query.parent_id.as_deref().map(str::trim) {
        None | Some("") => ROOT_PARENT_ID,
        Some(raw) => match raw.parse::<i64>() {
            Ok(id) => id,
            // No record can have a non-integer parent.
            Err(_) => return Ok(Json(Vec::new())),
        },
    };
    let page = Page::parse(query.page.as_deref());

    let files = state.files().list(auth.user_id, parent_id, page).await?;

    Ok(Json(files.into_iter().map(FileResponse::from).collect()))
}

/// PUT /files/:id/publish - Make an owned file public.
#[utoipa::path(
    put,
    path = "/files/{id}/publish",
    tag = "files",
    params(
        ("id" = i64, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "Updated file", body = FileResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    ),
    security(
        ("token" = [])
    )
)]
pub async fn publish_file(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let file = state
        .files()
        .set_public(auth.user_id, parse_id(&id)?, true)
        .await?;
    Ok(Json(file.into()))
}

/// PUT /files/:id/unpublish - Make an owned file private.
#[utoipa::path(
    put,
    path = "/files/{id}/unpublish",
    tag = "files",
    params(
        ("id" = i64, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "Updated file", body = FileResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    ),
    security(
        ("token" = [])
    )
)]
pub async fn unpublish_file(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let file = state
        .files()
        .set_public(auth.user_id, parse_id(&id)?, false)
        .await?;
    Ok(Json(file.into()))
}

/// GET /files/:id/data - Raw content, or a thumbnail with `size`.
///
/// Public files are readable without a token.
#[utoipa::path(
    get,
    path = "/files/{id}/data",
    tag = "files",
    params(
        ("id" = i64, Path, description = "File ID"),
        FileDataQuery
    ),
    responses(
        (status = 200, description = "File content"),
        (status = 400, description = "A folder doesn't have content", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    ),
    security(
        (),
        ("token" = [])
    )
)]
pub async fn get_file_data(
    State(state): State<Arc<AppState>>,
    OptionalAuthUser(requester): OptionalAuthUser,
    Path(id): Path<String>,
    Query(query): Query<FileDataQuery>,
) -> Result<Response, ApiError> {
    let (file, content) = state
        .files()
        .read_content(requester, parse_id(&id)?, query.size.as_deref())
        .await?;

    let response = Response::builder()
        .header(header::CONTENT_TYPE, content_type_for(&file.name))
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal()
        })?;

    Ok(response)
}
