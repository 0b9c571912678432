use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use cs_core::ports::{
    BlobCopyError, ImageBlobStorePort, LoadedImage, SavedImage, Thumbnail, ThumbnailGeneratorPort,
};
use image::{DynamicImage, GenericImageView, ImageDecoder, ImageFormat, ImageReader};
use tokio::fs;
use tracing::{debug, debug_span, warn, Instrument};

use crate::thumbnail::{ThumbnailCache, ThumbnailKey};

const IMAGES_DIR: &str = "images";
const IMAGE_EXTENSION: &str = ".png";

/// Image blobs stored as `<uuid>.png` files under `<data_dir>/images`.
pub struct FsImageBlobStore {
    dir: PathBuf,
    thumbnail_generator: Arc<dyn ThumbnailGeneratorPort>,
    thumbnail_cache: ThumbnailCache,
}

impl FsImageBlobStore {
    /// Create a store rooted at `<data_dir>/images`. The directory is created on first save.
    pub fn new(
        data_dir: &Path,
        thumbnail_generator: Arc<dyn ThumbnailGeneratorPort>,
        thumbnail_cache: ThumbnailCache,
    ) -> Self {
        Self {
            dir: data_dir.join(IMAGES_DIR),
            thumbnail_generator,
            thumbnail_cache,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, file_name: &str) -> Result<PathBuf> {
        validate_file_name(file_name)?;
        Ok(self.dir.join(file_name))
    }

    /// Read a blob; `None` when it is invalid, missing or unreadable.
    async fn read_blob(&self, file_name: &str) -> Option<Vec<u8>> {
        let path = match self.path_for(file_name) {
            Ok(path) => path,
            Err(err) => {
                warn!(file_name, error = %err, "Rejected image blob name");
                return None;
            }
        };

        match fs::read(&path).await {
            Ok(bytes) => Some(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(file_name, "Image blob not found");
                None
            }
            Err(err) => {
                warn!(file_name, error = %err, "Failed to read image blob");
                None
            }
        }
    }
}

/// Blob names are exactly `<uuid>.png`, so they can never escape the blob directory.
fn validate_file_name(file_name: &str) -> Result<()> {
    let stem = file_name
        .strip_suffix(IMAGE_EXTENSION)
        .ok_or_else(|| anyhow::anyhow!("image blob name must end with .png: {}", file_name))?;
    uuid::Uuid::try_parse(stem)
        .with_context(|| format!("image blob name is not a uuid: {}", file_name))?;
    Ok(())
}

struct EncodedImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

/// Decode any supported format, apply EXIF orientation and re-encode as PNG.
fn encode_png(raw: &[u8]) -> Result<EncodedImage> {
    let mut decoder = ImageReader::new(Cursor::new(raw))
        .with_guessed_format()
        .context("sniff image format")?
        .into_decoder()
        .context("unsupported image format")?;
    let orientation = decoder
        .orientation()
        .unwrap_or(image::metadata::Orientation::NoTransforms);

    let mut image = DynamicImage::from_decoder(decoder).context("decode image")?;
    image.apply_orientation(orientation);

    // PNG has no float variants.
    let image = match image {
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            DynamicImage::ImageRgba16(image.to_rgba16())
        }
        other => other,
    };

    let (width, height) = image.dimensions();
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .context("encode image as png")?;

    Ok(EncodedImage {
        bytes,
        width,
        height,
    })
}

#[async_trait]
impl ImageBlobStorePort for FsImageBlobStore {
    async fn save(&self, image_bytes: &[u8]) -> Result<SavedImage> {
        let raw = image_bytes.to_vec();
        let span = debug_span!("infra.blob.save", input_bytes = raw.len());

        async move {
            let encoded = tokio::task::spawn_blocking(move || encode_png(&raw))
                .await
                .context("image encode task failed")??;

            fs::create_dir_all(&self.dir)
                .await
                .with_context(|| format!("create image dir failed: {}", self.dir.display()))?;

            let file_name = format!("{}{}", uuid::Uuid::new_v4(), IMAGE_EXTENSION);
            let final_path = self.dir.join(&file_name);
            let tmp_path = self.dir.join(format!(".{}.tmp", file_name));

            let written = async {
                fs::write(&tmp_path, &encoded.bytes)
                    .await
                    .with_context(|| format!("write temp image failed: {}", tmp_path.display()))?;
                fs::rename(&tmp_path, &final_path).await.with_context(|| {
                    format!(
                        "rename temp image failed: {} -> {}",
                        tmp_path.display(),
                        final_path.display()
                    )
                })
            }
            .await;

            if let Err(err) = written {
                let _ = fs::remove_file(&tmp_path).await;
                return Err(err);
            }

            debug!(
                file_name = %file_name,
                byte_size = encoded.bytes.len(),
                width = encoded.width,
                height = encoded.height,
                "Saved image blob"
            );

            Ok(SavedImage {
                file_name,
                byte_size: i64::try_from(encoded.bytes.len()).unwrap_or(i64::MAX),
                width: encoded.width,
                height: encoded.height,
            })
        }
        .instrument(span)
        .await
    }

    async fn load(&self, file_name: &str) -> Option<LoadedImage> {
        let bytes = self.read_blob(file_name).await?;

        let decoded = tokio::task::spawn_blocking(move || {
            image::load_from_memory(&bytes).map(|image| (image.dimensions(), bytes))
        })
        .await;

        match decoded {
            Ok(Ok(((width, height), bytes))) => Some(LoadedImage {
                bytes,
                width,
                height,
            }),
            Ok(Err(err)) => {
                warn!(file_name, error = %err, "Image blob is corrupt");
                None
            }
            Err(err) => {
                warn!(file_name, error = %err, "Image decode task failed");
                None
            }
        }
    }

    async fn load_thumbnail(&self, file_name: &str, max_dimension: u32) -> Option<Arc<Thumbnail>> {
        let key = ThumbnailKey::new(file_name, max_dimension);
        if let Some(hit) = self.thumbnail_cache.get(&key).await {
            return Some(hit);
        }

        let bytes = self.read_blob(file_name).await?;
        let generator = Arc::clone(&self.thumbnail_generator);
        let generated =
            tokio::task::spawn_blocking(move || generator.generate(&bytes, max_dimension)).await;

        let thumbnail = match generated {
            Ok(Ok(thumbnail)) => Arc::new(thumbnail),
            Ok(Err(err)) => {
                warn!(file_name, error = %err, "Failed to generate thumbnail");
                return None;
            }
            Err(err) => {
                warn!(file_name, error = %err, "Thumbnail task failed");
                return None;
            }
        };

        self.thumbnail_cache.put(key, Arc::clone(&thumbnail)).await;
        Some(thumbnail)
    }

    async fn delete(&self, file_name: &str) -> Result<()> {
        let path = self.path_for(file_name)?;
        self.thumbnail_cache.remove_file(file_name).await;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err)
                .with_context(|| format!("delete image blob failed: {}", path.display())),
        }
    }

    async fn copy_to(&self, file_name: &str, destination: &Path) -> Result<(), BlobCopyError> {
        let source = self
            .path_for(file_name)
            .map_err(|_| BlobCopyError::InvalidName(file_name.to_string()))?;

        let exists = fs::try_exists(&source)
            .await
            .map_err(|source| BlobCopyError::Io {
                file_name: file_name.to_string(),
                source,
            })?;
        if !exists {
            return Err(BlobCopyError::NotFound(file_name.to_string()));
        }

        fs::copy(&source, destination)
            .await
            .map(|_| ())
            .map_err(|source| BlobCopyError::Io {
                file_name: file_name.to_string(),
                source,
            })
    }

    async fn total_storage_size(&self) -> u64 {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return 0,
            Err(err) => {
                warn!(dir = %self.dir.display(), error = %err, "Failed to scan image dir");
                return 0;
            }
        };

        let mut total = 0u64;
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    // Leftover `.<uuid>.png.tmp` files from an interrupted save are not blobs.
                    let is_blob = entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| validate_file_name(name).is_ok());
                    if !is_blob {
                        continue;
                    }
                    match entry.metadata().await {
                        Ok(meta) if meta.is_file() => total = total.saturating_add(meta.len()),
                        Ok(_) => {}
                        Err(err) => debug!(error = %err, "Skipping unreadable image blob"),
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    warn!(error = %err, "Image dir scan aborted");
                    break;
                }
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_uuid_png_names() {
        let name = format!("{}.png", uuid::Uuid::new_v4());
        assert!(validate_file_name(&name).is_ok());
    }

    #[test]
    fn rejects_traversal_and_foreign_names() {
        assert!(validate_file_name("../etc/passwd").is_err());
        assert!(validate_file_name("picture.png").is_err());
        assert!(validate_file_name(&uuid::Uuid::new_v4().to_string()).is_err());
        assert!(validate_file_name(&format!("{}.jpg", uuid::Uuid::new_v4())).is_err());
    }
}
