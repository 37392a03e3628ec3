//! Test helpers for HTTP API tests.
//!
//! Provides a router-backed `TestServer` over in-memory stores plus helpers
//! for registering, connecting and uploading.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderName;
use axum_test::{TestResponse, TestServer};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use tempfile::TempDir;

use filedepot::config::ServerConfig;
use filedepot::file::{LocalBlobStore, ThumbnailWorker};
use filedepot::{AppState, Database, MemoryCache, WebServer};

/// Session token header.
pub const X_TOKEN: HeaderName = HeaderName::from_static("x-token");

/// A running test server and the stores behind it.
pub struct TestContext {
    pub server: TestServer,
    pub db: Arc<Database>,
    pub cache: Arc<MemoryCache>,
    pub store: LocalBlobStore,
    _temp_dir: TempDir,
}

impl TestContext {
    /// Server without a thumbnail worker.
    pub async fn new() -> Self {
        Self::build(false).await
    }

    /// Server with a running thumbnail worker.
    pub async fn with_thumbnails() -> Self {
        Self::build(true).await
    }

    async fn build(thumbnails: bool) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db = Arc::new(
            Database::open_in_memory()
                .await
                .expect("Failed to create test database"),
        );
        let cache = Arc::new(MemoryCache::new());
        let store = LocalBlobStore::new(temp_dir.path().join("files"));

        let mut state = AppState::new(db.clone(), cache.clone(), store.clone());
        if thumbnails {
            let (worker, sender) = ThumbnailWorker::new(db.clone(), store.clone());
            tokio::spawn(worker.run());
            state = state.with_thumbnails(sender);
        }

        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        let router = WebServer::new(&config, state, vec![])
            .expect("Failed to create web server")
            .router();
        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            db,
            cache,
            store,
            _temp_dir: temp_dir,
        }
    }

    /// Register a user and return the response body.
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let response = self
            .server
            .post("/users")
            .json(&json!({ "email": email, "password": password }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()
    }

    /// Exchange credentials for a session token.
    pub async fn connect(&self, email: &str, password: &str) -> String {
        let response = self
            .server
            .get("/connect")
            .add_header(AUTHORIZATION, basic_auth(email, password))
            .await;
        response.assert_status_ok();
        response.json::<Value>()["token"]
            .as_str()
            .expect("token missing")
            .to_string()
    }

    /// Register and connect in one step.
    pub async fn sign_up(&self, email: &str, password: &str) -> String {
        self.register(email, password).await;
        self.connect(email, password).await
    }

    /// POST /files with the given body.
    pub async fn create_file(&self, token: &str, body: Value) -> TestResponse {
        self.server
            .post("/files")
            .add_header(X_TOKEN, token.to_string())
            .json(&body)
            .await
    }

    /// Create a folder and return its ID.
    pub async fn create_folder(&self, token: &str, name: &str, parent_id: i64) -> i64 {
        let response = self
            .create_file(
                token,
                json!({ "name": name, "type": "folder", "parentId": parent_id }),
            )
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["id"].as_i64().expect("id missing")
    }

    /// Upload a text file and return its ID.
    pub async fn upload_text(&self, token: &str, name: &str, content: &str) -> i64 {
        let response = self
            .create_file(
                token,
                json!({ "name": name, "type": "file", "data": STANDARD.encode(content) }),
            )
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["id"].as_i64().expect("id missing")
    }
}

/// `Authorization: Basic` value for the given credentials.
pub fn basic_auth(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

/// Base64 of the given bytes.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    STANDARD.encode(bytes)
}
