//! filedepot - multi-user file storage API
//!
//! Clients register, exchange Basic credentials for a session token, and
//! upload, organize, publish and download files over HTTP.

pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod stats;
pub mod web;

pub use auth::{
    hash_password, register, verify_password, CredentialVerifier, PasswordError, SessionToken,
    SessionTokenManager,
};
pub use cache::{KeyValueCache, MemoryCache, RedisCache, SharedCache};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{DepotError, Result};
pub use file::{
    CreateFileRequest, FileRecord, FileRepository, FileService, FileType, LocalBlobStore,
    ThumbnailWorker,
};
pub use stats::{Health, Stats, StatsReporter};
pub use web::{AppState, WebServer};
