//! Web API Status Tests
//!
//! Integration tests for /status, /stats, /health and the OpenAPI document.

mod common;

use common::TestContext;
use serde_json::{json, Value};

#[tokio::test]
async fn test_status() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/status").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "redis": true, "db": true }));
}

#[tokio::test]
async fn test_stats_counts_users_and_files() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/stats").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "users": 0, "files": 0 }));

    let bob = ctx.sign_up("bob@dylan.com", "toto1234!").await;
    ctx.sign_up("alice@example.com", "secret").await;
    let folder_id = ctx.create_folder(&bob, "docs", 0).await;
    ctx.create_folder(&bob, "inner", folder_id).await;
    ctx.upload_text(&bob, "a.txt", "a").await;

    let response = ctx.server.get("/stats").await;
    assert_eq!(response.json::<Value>(), json!({ "users": 2, "files": 3 }));
}

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_openapi_document() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let doc = response.json::<Value>();
    assert!(doc["paths"]["/files/{id}/data"].is_object());
    assert!(doc["components"]["securitySchemes"]["token"].is_object());
}
