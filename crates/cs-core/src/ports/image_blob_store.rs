use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::Thumbnail;

/// Result of persisting an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    pub file_name: String,
    /// Size of the persisted (re-encoded) file.
    pub byte_size: i64,
    pub width: u32,
    pub height: u32,
}

/// A persisted image read back from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    /// Encoded bytes as stored (PNG).
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum BlobCopyError {
    #[error("image blob not found: {0}")]
    NotFound(String),

    #[error("invalid image blob name: {0}")]
    InvalidName(String),

    #[error("failed to copy image blob {file_name}: {source}")]
    Io {
        file_name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Storage for captured images, addressed by generated file name.
#[async_trait]
pub trait ImageBlobStorePort: Send + Sync {
    /// Re-encodes and writes the image atomically under a fresh name.
    ///
    /// An error means nothing was written, so no entry may reference it.
    async fn save(&self, image_bytes: &[u8]) -> Result<SavedImage>;

    /// `None` if the file is missing or cannot be decoded.
    async fn load(&self, file_name: &str) -> Option<LoadedImage>;

    /// Downscaled rendition whose longest edge is at most `max_dimension`.
    async fn load_thumbnail(&self, file_name: &str, max_dimension: u32) -> Option<Arc<Thumbnail>>;

    /// Best effort; a missing file is not an error.
    async fn delete(&self, file_name: &str) -> Result<()>;

    /// Copies the blob to `destination`. Fails with [`BlobCopyError::NotFound`]
    /// when the blob does not exist.
    async fn copy_to(&self, file_name: &str, destination: &Path) -> Result<(), BlobCopyError>;

    /// Sum of all persisted blob sizes, from a fresh directory scan.
    async fn total_storage_size(&self) -> u64;
}
