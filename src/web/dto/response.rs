//! Response DTOs for the HTTP API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::db::User;
use crate::file::{FileRecord, FileType};
use crate::stats::{Health, Stats};

/// Public user representation.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Login email.
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Session token issued by `GET /connect`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Value for the `X-Token` header.
    pub token: String,
}

/// Public file representation. The blob location is never exposed.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    /// File ID.
    pub id: i64,
    /// Owner's user ID.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// Entry kind.
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Whether anonymous readers may fetch the content.
    pub is_public: bool,
    /// Parent folder ID, 0 for the root.
    pub parent_id: i64,
}

impl From<FileRecord> for FileResponse {
    fn from(file: FileRecord) -> Self {
        Self {
            id: file.id,
            user_id: file.user_id,
            name: file.name,
            file_type: file.file_type,
            is_public: file.is_public,
            parent_id: file.parent_id,
        }
    }
}

/// Backing store liveness.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    /// Cache answered.
    pub redis: bool,
    /// Document store answered.
    pub db: bool,
}

impl From<Health> for StatusResponse {
    fn from(health: Health) -> Self {
        Self {
            redis: health.cache_up,
            db: health.store_up,
        }
    }
}

/// Entity counts.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    /// Registered users.
    pub users: i64,
    /// Stored files and folders.
    pub files: i64,
}

impl From<Stats> for StatsResponse {
    fn from(stats: Stats) -> Self {
        Self {
            users: stats.users,
            files: stats.files,
        }
    }
}
