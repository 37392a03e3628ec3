//! File records and repository for filedepot.

use super::FileType;
use crate::db::DbPool;
use crate::{DepotError, Result};

/// A stored file or folder.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FileRecord {
    /// Unique file ID.
    pub id: i64,
    /// Owner's user ID.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// Entry kind.
    #[sqlx(rename = "type", try_from = "String")]
    pub file_type: FileType,
    /// Whether anonymous readers may fetch the content.
    pub is_public: bool,
    /// Parent folder ID, or 0 for the root.
    pub parent_id: i64,
    /// Blob location on disk. Never exposed to clients.
    pub local_path: Option<String>,
}

impl FileRecord {
    /// Whether `requester` may read this entry's content.
    ///
    /// Public entries are readable by anyone, private ones only by the owner.
    pub fn is_visible_to(&self, requester: Option<i64>) -> bool {
        self.is_public || requester == Some(self.user_id)
    }
}

/// Data for creating a new file entry.
#[derive(Debug, Clone)]
pub struct NewFile {
    /// Owner's user ID.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// Entry kind.
    pub file_type: FileType,
    /// Initial visibility.
    pub is_public: bool,
    /// Parent folder ID, or 0 for the root.
    pub parent_id: i64,
    /// Blob location, for non-folders.
    pub local_path: Option<String>,
}

impl NewFile {
    /// Create a private root-level entry.
    pub fn new(user_id: i64, name: impl Into<String>, file_type: FileType) -> Self {
        Self {
            user_id,
            name: name.into(),
            file_type,
            is_public: false,
            parent_id: super::ROOT_PARENT_ID,
            local_path: None,
        }
    }

    /// Set the parent folder.
    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = parent_id;
        self
    }

    /// Set the visibility.
    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    /// Set the blob location.
    pub fn with_local_path(mut self, local_path: impl Into<String>) -> Self {
        self.local_path = Some(local_path.into());
        self
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, name, type, is_public, parent_id, local_path FROM files";

/// Repository for file records.
pub struct FileRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> FileRepository<'a> {
    /// Create a new FileRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a new entry.
    pub async fn create(&self, file: &NewFile) -> Result<FileRecord> {
        let result = sqlx::query(
            "INSERT INTO files (user_id, name, type, is_public, parent_id, local_path)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(file.user_id)
        .bind(&file.name)
        .bind(file.file_type.as_str())
        .bind(file.is_public)
        .bind(file.parent_id)
        .bind(&file.local_path)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id).await?.ok_or(DepotError::NotFound)
    }

    /// Get an entry by ID regardless of owner.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<FileRecord>> {
        let file = sqlx::query_as::<_, FileRecord>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(file)
    }

    /// Get an entry by ID only if `user_id` owns it.
    pub async fn get_owned(&self, id: i64, user_id: i64) -> Result<Option<FileRecord>> {
        let file = sqlx::query_as::<_, FileRecord>(&format!(
            "{SELECT_COLUMNS} WHERE id = ? AND user_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(file)
    }

    /// List a window of a user's entries under one parent, oldest first.
    pub async fn list_page(
        &self,
        user_id: i64,
        parent_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<FileRecord>> {
        let files = sqlx::query_as::<_, FileRecord>(&format!(
            "{SELECT_COLUMNS} WHERE user_id = ? AND parent_id = ? ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(user_id)
        .bind(parent_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(files)
    }

    /// Set the visibility flag of an owned entry.
    ///
    /// Returns the updated record, or `None` when the entry is absent or
    /// owned by someone else.
    pub async fn set_public(
        &self,
        id: i64,
        user_id: i64,
        is_public: bool,
    ) -> Result<Option<FileRecord>> {
        let result = sqlx::query("UPDATE files SET is_public = ? WHERE id = ? AND user_id = ?")
            .bind(is_public)
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_owned(id, user_id).await
    }

    /// Count all entries.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
