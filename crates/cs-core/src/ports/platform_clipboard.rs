use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::clipboard::{ClipboardImage, ClipboardOffer};

/// Capability interface over the system clipboard.
///
/// Implementations are expected to be cheap for [`change_count`](Self::change_count);
/// the typed readers are only called after a change was observed.
pub trait PlatformClipboardPort: Send + Sync {
    /// Opaque counter that changes whenever the clipboard content changes.
    fn change_count(&self) -> Result<i64>;

    /// Which representations are present, without reading their payloads.
    fn offer(&self) -> Result<ClipboardOffer>;

    fn read_text(&self) -> Result<Option<String>>;

    fn read_image(&self) -> Result<Option<ClipboardImage>>;

    /// Local file paths currently on the clipboard, in clipboard order.
    fn read_file_urls(&self) -> Result<Vec<PathBuf>>;

    fn write_text(&self, text: &str) -> Result<()>;

    /// `png_bytes` is an encoded PNG image.
    fn write_image(&self, png_bytes: &[u8]) -> Result<()>;

    fn write_file_url(&self, path: &Path) -> Result<()>;
}
