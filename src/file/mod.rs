//! File management module for filedepot.
//!
//! This module provides the file/folder entity model:
//! - File and folder records with hierarchy constraints
//! - Local blob storage with UUID naming
//! - Fixed-size pagination over a folder
//! - Background thumbnail generation for images

mod metadata;
mod pagination;
mod service;
mod storage;
mod thumbnail;

pub use metadata::{FileRecord, FileRepository, NewFile};
pub use pagination::Page;
pub use service::{CreateFileRequest, FileService};
pub use storage::LocalBlobStore;
pub use thumbnail::{ThumbnailJob, ThumbnailSender, ThumbnailWorker};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Parent ID of entries at the root of a user's tree.
pub const ROOT_PARENT_ID: i64 = 0;

/// Number of entries per listing page.
pub const PAGE_SIZE: i64 = 20;

/// Thumbnail widths generated for images, in pixels.
pub const THUMBNAIL_WIDTHS: [u32; 3] = [500, 250, 100];

/// Capacity of the thumbnail job queue.
pub const THUMBNAIL_QUEUE_CAPACITY: usize = 64;

/// Kind of a stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Container for other entries. Has no content.
    Folder,
    /// Plain file.
    File,
    /// Image file; thumbnails are generated for it.
    Image,
}

impl FileType {
    /// Convert to the stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Folder => "folder",
            FileType::File => "file",
            FileType::Image => "image",
        }
    }

    /// Whether this entry carries content.
    pub fn has_content(&self) -> bool {
        !matches!(self, FileType::Folder)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "folder" => Ok(FileType::Folder),
            "file" => Ok(FileType::File),
            "image" => Ok(FileType::Image),
            _ => Err(format!("unknown file type: {s}")),
        }
    }
}

impl TryFrom<String> for FileType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
