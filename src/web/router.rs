//! Router configuration for the HTTP API.

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::dto::{
    CreateFileBody, FileResponse, RegisterRequest, StatsResponse, StatusResponse, TokenResponse,
    UserResponse,
};
use super::error::ErrorBody;
use super::handlers;
use super::middleware::create_cors_layer;
use super::AppState;
use crate::file::FileType;
use crate::logging::request_span;

/// OpenAPI document for the service.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_status,
        handlers::get_stats,
        handlers::create_user,
        handlers::get_me,
        handlers::connect,
        handlers::disconnect,
        handlers::create_file,
        handlers::get_file,
        handlers::list_files,
        handlers::publish_file,
        handlers::unpublish_file,
        handlers::get_file_data,
    ),
    components(schemas(
        RegisterRequest,
        CreateFileBody,
        UserResponse,
        TokenResponse,
        FileResponse,
        FileType,
        StatusResponse,
        StatsResponse,
        ErrorBody,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "app", description = "Service status"),
        (name = "users", description = "Registration and profile"),
        (name = "auth", description = "Session tokens"),
        (name = "files", description = "Files and folders")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "token",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-Token"))),
        );
        components.add_security_scheme("basic", SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)));
    }
}

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let user_routes = Router::new()
        .route("/users", post(handlers::create_user))
        .route("/users/me", get(handlers::get_me));

    let auth_routes = Router::new()
        .route("/connect", get(handlers::connect))
        .route("/disconnect", get(handlers::disconnect));

    let file_routes = Router::new()
        .route("/files", post(handlers::create_file).get(handlers::list_files))
        .route("/files/:id", get(handlers::get_file))
        .route("/files/:id/publish", put(handlers::publish_file))
        .route("/files/:id/unpublish", put(handlers::unpublish_file))
        .route("/files/:id/data", get(handlers::get_file_data));

    let app_routes = Router::new()
        .route("/status", get(handlers::get_status))
        .route("/stats", get(handlers::get_stats));

    Router::new()
        .merge(app_routes)
        .merge(user_routes)
        .merge(auth_routes)
        .merge(file_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(handlers::health_check))
}

/// Create the Swagger UI router serving the OpenAPI document.
pub fn create_swagger_router() -> Router {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
    }

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        for path in [
            "/status",
            "/stats",
            "/users",
            "/users/me",
            "/connect",
            "/disconnect",
            "/files",
            "/files/{id}",
            "/files/{id}/publish",
            "/files/{id}/unpublish",
            "/files/{id}/data",
        ] {
            assert!(paths.iter().any(|p| p == path), "missing {path}");
        }
    }
}
