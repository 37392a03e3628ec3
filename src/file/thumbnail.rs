//! Background thumbnail generation for image uploads.
//!
//! Uploads enqueue a [`ThumbnailJob`]; a single worker task drains the
//! queue, decodes the original on a blocking thread and writes one variant
//! per entry of [`THUMBNAIL_WIDTHS`] next to it.

use std::io::Cursor;
use std::sync::Arc;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use thiserror::Error;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, warn};

use super::{FileRepository, LocalBlobStore, THUMBNAIL_QUEUE_CAPACITY, THUMBNAIL_WIDTHS};
use crate::db::Database;
use crate::DepotError;

/// Thumbnail generation errors. Only ever logged.
#[derive(Error, Debug)]
pub enum ThumbnailError {
    /// Store or blob access failed.
    #[error(transparent)]
    Depot(#[from] DepotError),

    /// The original could not be decoded or a variant not encoded.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The blocking task panicked or was cancelled.
    #[error("thumbnail task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Request to render thumbnails for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailJob {
    /// File to render.
    pub file_id: i64,
    /// Owner of the file.
    pub user_id: i64,
}

/// Producer side of the thumbnail queue.
#[derive(Debug, Clone)]
pub struct ThumbnailSender {
    tx: mpsc::Sender<ThumbnailJob>,
}

impl ThumbnailSender {
    /// Queue a job without waiting.
    ///
    /// Returns `false` and logs a warning when the queue is full or the
    /// worker has stopped.
    pub fn enqueue(&self, job: ThumbnailJob) -> bool {
        match self.tx.try_send(job) {
            Ok(()) => true,
            Err(TrySendError::Full(job)) => {
                warn!(file_id = job.file_id, "Thumbnail queue full, dropping job");
                false
            }
            Err(TrySendError::Closed(job)) => {
                warn!(file_id = job.file_id, "Thumbnail worker stopped, dropping job");
                false
            }
        }
    }
}

/// Consumer side of the thumbnail queue.
pub struct ThumbnailWorker {
    db: Arc<Database>,
    store: LocalBlobStore,
    rx: mpsc::Receiver<ThumbnailJob>,
}

impl ThumbnailWorker {
    /// Create a worker and the sender that feeds it.
    pub fn new(db: Arc<Database>, store: LocalBlobStore) -> (Self, ThumbnailSender) {
        let (tx, rx) = mpsc::channel(THUMBNAIL_QUEUE_CAPACITY);
        (Self { db, store, rx }, ThumbnailSender { tx })
    }

    /// Process jobs until every sender is dropped.
    pub async fn run(mut self) {
        info!("Thumbnail worker started");

        while let Some(job) = self.rx.recv().await {
            self.process(job).await;
        }

        info!("Thumbnail worker stopped");
    }

    /// Process one job, logging any failure.
    pub async fn process(&self, job: ThumbnailJob) {
        match self.generate(job).await {
            Ok(0) => {}
            Ok(count) => debug!(file_id = job.file_id, count, "Thumbnails written"),
            Err(e) => warn!(file_id = job.file_id, error = %e, "Thumbnail generation failed"),
        }
    }

    async fn generate(&self, job: ThumbnailJob) -> Result<usize, ThumbnailError> {
        let record = FileRepository::new(self.db.pool())
            .get_owned(job.file_id, job.user_id)
            .await?;

        let Some(local_path) = record.and_then(|r| r.local_path) else {
            debug!(file_id = job.file_id, "No stored content, skipping thumbnails");
            return Ok(0);
        };

        let original = self.store.read(&local_path).await?;
        let variants = tokio::task::spawn_blocking(move || render_thumbnails(&original)).await??;

        for (width, bytes) in &variants {
            self.store.write_variant(&local_path, *width, bytes).await?;
        }

        Ok(variants.len())
    }
}

/// Render every thumbnail width for an encoded image.
///
/// Aspect ratio is preserved and each variant fits in a square of its
/// width. Variants keep the original format when it
/// can be encoded, PNG otherwise.
pub fn render_thumbnails(original: &[u8]) -> Result<Vec<(u32, Vec<u8>)>, image::ImageError> {
    let format = image::guess_format(original)?;
    let img = image::load_from_memory_with_format(original, format)?;

    THUMBNAIL_WIDTHS
        .iter()
        .map(|&width| {
            let thumb = resize_to_width(&img, width);
            Ok((width, encode(&thumb, format)?))
        })
        .collect()
}

/// Scale to `width` columns, or to `width` rows when the image is taller
/// than it is wide. The variant always fits in a `width` x `width` box.
fn resize_to_width(img: &DynamicImage, width: u32) -> DynamicImage {
    let (w, h) = (u64::from(img.width().max(1)), u64::from(img.height().max(1)));
    let bound = u64::from(width);
    let (target_w, target_h) = if h <= w {
        (bound, (h * bound / w).max(1))
    } else {
        ((w * bound / h).max(1), bound)
    };
    img.resize_exact(target_w as u32, target_h as u32, FilterType::Triangle)
}

fn encode(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, image::ImageError> {
    let mut out = Cursor::new(Vec::new());
    if img.write_to(&mut out, format).is_err() {
        out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png)?;
    }
    Ok(out.into_inner())
}
