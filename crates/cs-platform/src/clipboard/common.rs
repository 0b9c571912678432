use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clipboard_rs::{common::RustImage, Clipboard, ClipboardContext, ContentFormat};
use cs_core::clipboard::{ClipboardImage, ClipboardOffer};

use super::file_url::{file_url_for, parse_file_reference};

/// Typed clipboard access shared by every platform.
pub(crate) struct CommonClipboardImpl;

fn map_clipboard_err<T>(
    result: std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<T> {
    result.map_err(|e| anyhow!(e))
}

impl CommonClipboardImpl {
    pub fn offer(ctx: &ClipboardContext) -> ClipboardOffer {
        ClipboardOffer {
            has_file_url: ctx.has(ContentFormat::Files),
            has_image: ctx.has(ContentFormat::Image),
            has_text: ctx.has(ContentFormat::Text),
        }
    }

    pub fn read_text(ctx: &ClipboardContext) -> Result<Option<String>> {
        if !ctx.has(ContentFormat::Text) {
            return Ok(None);
        }
        Ok(Some(map_clipboard_err(ctx.get_text())?))
    }

    /// Image as PNG bytes.
    pub fn read_image(ctx: &ClipboardContext) -> Result<Option<ClipboardImage>> {
        if !ctx.has(ContentFormat::Image) {
            return Ok(None);
        }
        let image = map_clipboard_err(ctx.get_image())?;
        let png = map_clipboard_err(image.to_png())?;
        Ok(Some(ClipboardImage::new(png.get_bytes().to_vec())))
    }

    pub fn read_file_urls(ctx: &ClipboardContext) -> Result<Vec<PathBuf>> {
        if !ctx.has(ContentFormat::Files) {
            return Ok(Vec::new());
        }
        let files = map_clipboard_err(ctx.get_files())?;
        Ok(files
            .iter()
            .filter_map(|raw| parse_file_reference(raw))
            .collect())
    }

    pub fn write_text(ctx: &ClipboardContext, text: &str) -> Result<()> {
        map_clipboard_err(ctx.set_text(text.to_string()))
    }

    pub fn write_image(ctx: &ClipboardContext, png_bytes: &[u8]) -> Result<()> {
        let image = clipboard_rs::RustImageData::from_bytes(png_bytes).map_err(|e| anyhow!(e))?;
        map_clipboard_err(ctx.set_image(image))
    }

    pub fn write_file_url(ctx: &ClipboardContext, path: &Path) -> Result<()> {
        map_clipboard_err(ctx.set_files(vec![file_url_for(path)?]))
    }

    /// Digest over everything the capture pipeline can observe.
    #[cfg_attr(target_os = "macos", allow(dead_code))]
    pub fn fingerprint(ctx: &ClipboardContext) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        if let Ok(files) = ctx.get_files() {
            hasher.update(b"files\0");
            for file in files {
                hasher.update(file.as_bytes());
                hasher.update(b"\0");
            }
        }
        if let Ok(text) = ctx.get_text() {
            hasher.update(b"text\0");
            hasher.update(text.as_bytes());
        }
        if ctx.has(ContentFormat::Image) {
            if let Ok(png) = ctx.get_image().and_then(|image| image.to_png()) {
                hasher.update(b"image\0");
                hasher.update(png.get_bytes());
            }
        }
        hasher.finalize()
    }
}
