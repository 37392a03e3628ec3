//! File service for filedepot.
//!
//! This module provides the high-level file operations:
//! - Creation with ordered validation and hierarchy checks
//! - Owner-scoped lookup, listing and publishing
//! - Content reads gated by visibility

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, info, warn};

use crate::db::DbPool;
use crate::{DepotError, Result};

use super::metadata::{FileRecord, FileRepository, NewFile};
use super::pagination::Page;
use super::storage::LocalBlobStore;
use super::thumbnail::{ThumbnailJob, ThumbnailSender};
use super::{FileType, ROOT_PARENT_ID, THUMBNAIL_WIDTHS};

/// Request data for creating a file or folder.
///
/// Every field is optional so that validation can report exactly which
/// one is missing.
#[derive(Debug, Clone, Default)]
pub struct CreateFileRequest {
    /// Display name.
    pub name: Option<String>,
    /// Entry kind: `file`, `folder` or `image`.
    pub file_type: Option<String>,
    /// Base64-encoded content. Required unless the entry is a folder.
    pub data: Option<String>,
    /// Parent folder ID in text form. Absent means the root.
    pub parent_id: Option<String>,
    /// Initial visibility. Absent means private.
    pub is_public: Option<bool>,
}

impl CreateFileRequest {
    /// Create a request with a name and type.
    pub fn new(name: impl Into<String>, file_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            file_type: Some(file_type.into()),
            ..Self::default()
        }
    }

    /// Set the base64 content.
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set the parent folder.
    pub fn with_parent(mut self, parent_id: impl ToString) -> Self {
        self.parent_id = Some(parent_id.to_string());
        self
    }

    /// Set the visibility.
    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }
}

fn validation(message: &str) -> DepotError {
    DepotError::Validation(message.to_string())
}

/// File service over the record store and blob store.
pub struct FileService<'a> {
    pool: &'a DbPool,
    store: &'a LocalBlobStore,
    thumbnails: Option<&'a ThumbnailSender>,
}

impl<'a> FileService<'a> {
    /// Create a new FileService.
    pub fn new(pool: &'a DbPool, store: &'a LocalBlobStore) -> Self {
        Self {
            pool,
            store,
            thumbnails: None,
        }
    }

    /// Enqueue thumbnail jobs for image uploads.
    pub fn with_thumbnails(mut self, sender: Option<&'a ThumbnailSender>) -> Self {
        self.thumbnails = sender;
        self
    }

    fn repo(&self) -> FileRepository<'a> {
        FileRepository::new(self.pool)
    }

    /// Create a file or folder owned by `owner_id`.
    ///
    /// Checks run in order and the first failure wins:
    /// `Missing name`, `Missing type`, `Missing data`, `Parent not found`,
    /// `Parent is not a folder`.
    pub async fn create(&self, owner_id: i64, request: CreateFileRequest) -> Result<FileRecord> {
        let name = request
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| validation("Missing name"))?;

        let file_type = request
            .file_type
            .and_then(|t| t.parse::<FileType>().ok())
            .ok_or_else(|| validation("Missing type"))?;

        let content = if file_type.has_content() {
            let decoded = request
                .data
                .filter(|d| !d.is_empty())
                .and_then(|d| STANDARD.decode(d.trim()).ok())
                .ok_or_else(|| validation("Missing data"))?;
            Some(decoded)
        } else {
            None
        };

        let parent_id = match request.parent_id.as_deref().map(str::trim) {
            None | Some("") => ROOT_PARENT_ID,
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| validation("Parent not found"))?,
        };

        if parent_id != ROOT_PARENT_ID {
            let parent = self
                .repo()
                .get_by_id(parent_id)
                .await?
                .ok_or_else(|| validation("Parent not found"))?;
            if parent.file_type != FileType::Folder {
                return Err(validation("Parent is not a folder"));
            }
        }

        let mut new_file = NewFile::new(owner_id, name, file_type)
            .with_parent(parent_id)
            .with_public(request.is_public.unwrap_or(false));

        if let Some(content) = content {
            let local_path = self.store.write(&content).await?;
            new_file = new_file.with_local_path(local_path);
        }

        let file = match self.repo().create(&new_file).await {
            Ok(file) => file,
            Err(e) => {
                if let Some(local_path) = new_file.local_path.as_deref() {
                    if let Err(remove_err) = self.store.remove(local_path).await {
                        warn!(path = local_path, "Failed to remove orphaned blob: {}", remove_err);
                    }
                }
                return Err(e);
            }
        };

        info!(
            file_id = file.id,
            user_id = owner_id,
            file_type = %file.file_type,
            "File created"
        );

        if file.file_type == FileType::Image {
            if let Some(sender) = self.thumbnails {
                sender.enqueue(ThumbnailJob {
                    file_id: file.id,
                    user_id: owner_id,
                });
            }
        }

        Ok(file)
    }

    /// Get an entry owned by `owner_id`. Foreign and missing are both `NotFound`.
    pub async fn get(&self, owner_id: i64, id: i64) -> Result<FileRecord> {
        self.repo()
            .get_owned(id, owner_id)
            .await?
            .ok_or(DepotError::NotFound)
    }

    /// List one page of `owner_id`'s entries under `parent_id`.
    pub async fn list(&self, owner_id: i64, parent_id: i64, page: Page) -> Result<Vec<FileRecord>> {
        self.repo()
            .list_page(owner_id, parent_id, page.offset(), page.limit())
            .await
    }

    /// Set the visibility of an owned entry. Idempotent.
    pub async fn set_public(&self, owner_id: i64, id: i64, is_public: bool) -> Result<FileRecord> {
        let file = self
            .repo()
            .set_public(id, owner_id, is_public)
            .await?
            .ok_or(DepotError::NotFound)?;

        debug!(file_id = id, user_id = owner_id, is_public, "Visibility changed");
        Ok(file)
    }

    /// Read the content of an entry.
    ///
    /// `size` selects a thumbnail when it names one of the generated
    /// widths and is ignored otherwise.
    pub async fn read_content(
        &self,
        requester: Option<i64>,
        id: i64,
        size: Option<&str>,
    ) -> Result<(FileRecord, Vec<u8>)> {
        let file = self.repo().get_by_id(id).await?.ok_or(DepotError::NotFound)?;

        if file.file_type == FileType::Folder {
            return Err(DepotError::FolderHasNoContent);
        }

        if !file.is_visible_to(requester) {
            return Err(DepotError::NotFound);
        }

        let local_path = file.local_path.as_deref().ok_or(DepotError::NotFound)?;

        let width = size
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|w| THUMBNAIL_WIDTHS.contains(w));

        let content = match width {
            Some(width) => {
                self.store
                    .read(&LocalBlobStore::variant_path(local_path, width))
                    .await?
            }
            None => self.store.read(local_path).await?,
        };

        Ok((file, content))
    }
}
