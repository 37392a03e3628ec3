//! Configuration module for filedepot.

use serde::Deserialize;
use std::path::Path;

use crate::{DepotError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Document store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/filedepot.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Which key-value cache backs the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-process map with per-entry expiry.
    #[default]
    Memory,
    /// Redis server.
    Redis,
}

/// Key-value cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Cache backend.
    #[serde(default)]
    pub backend: CacheBackend,
    /// Redis connection URL (required for the redis backend).
    #[serde(default = "default_redis_url")]
    pub url: String,
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            url: default_redis_url(),
        }
    }
}

/// Blob storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root directory for uploaded content.
    #[serde(default = "default_folder_path")]
    pub folder_path: String,
    /// Generate thumbnails for uploaded images.
    #[serde(default = "default_thumbnails")]
    pub thumbnails: bool,
}

fn default_folder_path() -> String {
    "/tmp/files_manager".to_string()
}

fn default_thumbnails() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            folder_path: default_folder_path(),
            thumbnails: default_thumbnails(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/filedepot.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Web API configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WebConfig {
    /// CORS allowed origins. Empty means any origin, without credentials.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Blob storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Web API configuration.
    #[serde(default)]
    pub web: WebConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DepotError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| DepotError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `PORT`: listening port
    /// - `DB_PATH`: SQLite database file
    /// - `REDIS_URL`: switches the cache to redis at the given URL
    /// - `FOLDER_PATH`: blob storage root
    pub fn apply_env_overrides(&mut self) {
        if let Some(port) = env_value("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(path) = env_value("DB_PATH") {
            self.database.path = path;
        }
        if let Some(url) = env_value("REDIS_URL") {
            self.cache.backend = CacheBackend::Redis;
            self.cache.url = url;
        }
        if let Some(path) = env_value("FOLDER_PATH") {
            self.storage.folder_path = path;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.storage.folder_path.trim().is_empty() {
            return Err(DepotError::Config(
                "storage.folder_path must not be empty".to_string(),
            ));
        }
        if self.cache.backend == CacheBackend::Redis && self.cache.url.trim().is_empty() {
            return Err(DepotError::Config(
                "cache.backend is redis but cache.url is not set. \
                 Set it in config.toml or via the REDIS_URL environment variable."
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Read a non-empty environment variable.
fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.path, "data/filedepot.db");
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.cache.url, "redis://127.0.0.1:6379");
        assert_eq!(config.storage.folder_path, "/tmp/files_manager");
        assert!(config.storage.thumbnails);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/filedepot.log");
        assert!(config.web.cors_origins.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080

[database]
path = "custom/db.sqlite"

[cache]
backend = "redis"
url = "redis://cache:6379"

[storage]
folder_path = "/srv/blobs"
thumbnails = false

[logging]
level = "debug"
file = "custom/logs/app.log"

[web]
cors_origins = ["http://localhost:3000"]
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, "custom/db.sqlite");
        assert_eq!(config.cache.backend, CacheBackend::Redis);
        assert_eq!(config.cache.url, "redis://cache:6379");
        assert_eq!(config.storage.folder_path, "/srv/blobs");
        assert!(!config.storage.thumbnails);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.web.cors_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 3000
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.folder_path, "/tmp/files_manager");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        assert!(result.is_err());
        if let Err(DepotError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_unknown_cache_backend_rejected() {
        let result = Config::parse("[cache]\nbackend = \"memcached\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");
        assert!(matches!(result, Err(DepotError::Io(_))));
    }

    #[test]
    fn test_validate_empty_folder_path() {
        let mut config = Config::default();
        config.storage.folder_path = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_redis_without_url() {
        let mut config = Config::default();
        config.cache.backend = CacheBackend::Redis;
        config.cache.url = String::new();

        let result = config.validate();
        if let Err(DepotError::Config(msg)) = result {
            assert!(msg.contains("REDIS_URL"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_validate_default() {
        assert!(Config::default().validate().is_ok());
    }
}
