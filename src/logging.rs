//! Logging for filedepot.
//!
//! Every HTTP request runs inside a `request` span carrying the method and
//! path. Once the session token resolves, the span also records the
//! `user_id`, so handler and store events are attributed to the caller
//! without each call site repeating it.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use tracing::field::Empty;
use tracing::{Level, Span};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

/// Dependencies that are only interesting when they fail.
const QUIET_TARGETS: &[&str] = &["sqlx", "hyper", "deadpool", "redis"];

fn parse_level(level: &str) -> Level {
    match level.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Filter directives for `level`: the service and its HTTP layer at
/// `level`, storage drivers at `warn`.
fn default_directives(level: Level) -> String {
    let level = level.to_string().to_lowercase();
    let mut directives = vec![
        level.clone(),
        format!("filedepot={level}"),
        format!("tower_http={level}"),
    ];
    directives.extend(QUIET_TARGETS.iter().map(|target| format!("{target}=warn")));
    directives.join(",")
}

/// `RUST_LOG` wins over the configured level.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(parse_level(level))))
}

/// Install the global subscriber writing to stdout and to the log file.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if let Some(parent) = Path::new(&config.file).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let log_file = Arc::new(File::create(&config.file)?);
    let writer = std::io::stdout.and(log_file);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(build_filter(&config.level))
        .init();

    Ok(())
}

/// Install a stdout-only subscriber.
pub fn init_console_only(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_target(true),
        )
        .with(build_filter(level))
        .init();
}

/// Span wrapping one HTTP request. `user_id` starts empty.
pub fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        user_id = Empty,
    )
}

/// Attribute the current request to `user_id`.
pub fn record_user(user_id: i64) {
    Span::current().record("user_id", user_id);
}
