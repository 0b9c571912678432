use anyhow::Result;

/// Generated thumbnail payload and metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

/// Generator port for creating thumbnails from encoded image bytes.
///
/// Synchronous on purpose: callers run it on a blocking thread.
pub trait ThumbnailGeneratorPort: Send + Sync {
    fn generate(&self, image_bytes: &[u8], max_edge: u32) -> Result<Thumbnail>;
}
