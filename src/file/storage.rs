//! Blob storage for filedepot.
//!
//! Content is written flat under a root directory with UUID v4 names:
//! ```text
//! {root}/
//! ├── 0f8e2c1a-…-9b7d            original upload
//! ├── 0f8e2c1a-…-9b7d_500        thumbnail variants (images only)
//! ├── 0f8e2c1a-…-9b7d_250
//! └── 0f8e2c1a-…-9b7d_100
//! ```

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::{DepotError, Result};

/// Local filesystem blob store.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a store rooted at `root`.
    ///
    /// The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write content under a fresh name and return its path.
    pub async fn write(&self, content: &[u8]) -> Result<String> {
        tokio::fs::create_dir_all(&self.root).await?;

        let path = self.root.join(Uuid::new_v4().to_string());
        tokio::fs::write(&path, content).await?;
        debug!(path = %path.display(), bytes = content.len(), "Blob written");

        Ok(path.to_string_lossy().into_owned())
    }

    /// Read content back. A missing blob is `NotFound`.
    pub async fn read(&self, local_path: &str) -> Result<Vec<u8>> {
        match tokio::fs::read(local_path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(DepotError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a blob. A blob that is already gone is not an error.
    pub async fn remove(&self, local_path: &str) -> Result<()> {
        match tokio::fs::remove_file(local_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Path of the `width` variant of a blob.
    pub fn variant_path(local_path: &str, width: u32) -> String {
        format!("{local_path}_{width}")
    }

    /// Write the `width` variant next to the original.
    pub async fn write_variant(&self, local_path: &str, width: u32, content: &[u8]) -> Result<String> {
        let path = Self::variant_path(local_path, width);
        tokio::fs::write(&path, content).await?;
        Ok(path)
    }
}
