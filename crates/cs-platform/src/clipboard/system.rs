use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use clipboard_rs::ClipboardContext;
use cs_core::clipboard::{ClipboardImage, ClipboardOffer};
use cs_core::ports::PlatformClipboardPort;
use tracing::{debug, debug_span};

use super::common::CommonClipboardImpl;
#[cfg(not(target_os = "macos"))]
use super::change_count::FingerprintCounter;

/// System clipboard backed by clipboard-rs.
pub struct SystemClipboard {
    ctx: Mutex<ClipboardContext>,
    #[cfg(not(target_os = "macos"))]
    counter: Mutex<FingerprintCounter>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let ctx = ClipboardContext::new()
            .map_err(|e| anyhow!("Failed to create clipboard context: {}", e))?;
        Ok(Self {
            ctx: Mutex::new(ctx),
            #[cfg(not(target_os = "macos"))]
            counter: Mutex::new(FingerprintCounter::new()),
        })
    }

    fn with_ctx<T>(&self, f: impl FnOnce(&ClipboardContext) -> Result<T>) -> Result<T> {
        let ctx = self
            .ctx
            .lock()
            .map_err(|_| anyhow!("clipboard context lock poisoned"))?;
        f(&ctx)
    }

    #[cfg(target_os = "macos")]
    fn record_write(&self) {}

    #[cfg(not(target_os = "macos"))]
    fn record_write(&self) {
        self.counter
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .mark_written();
    }
}

impl PlatformClipboardPort for SystemClipboard {
    #[cfg(target_os = "macos")]
    fn change_count(&self) -> Result<i64> {
        super::change_count::pasteboard_change_count()
            .ok_or_else(|| anyhow!("general pasteboard unavailable"))
    }

    #[cfg(not(target_os = "macos"))]
    fn change_count(&self) -> Result<i64> {
        let fingerprint = self.with_ctx(|ctx| Ok(CommonClipboardImpl::fingerprint(ctx)))?;
        let mut counter = self
            .counter
            .lock()
            .map_err(|_| anyhow!("change counter lock poisoned"))?;
        Ok(counter.observe(fingerprint))
    }

    fn offer(&self) -> Result<ClipboardOffer> {
        self.with_ctx(|ctx| Ok(CommonClipboardImpl::offer(ctx)))
    }

    fn read_text(&self) -> Result<Option<String>> {
        self.with_ctx(CommonClipboardImpl::read_text)
    }

    fn read_image(&self) -> Result<Option<ClipboardImage>> {
        let span = debug_span!("platform.clipboard.read_image");
        span.in_scope(|| {
            let image = self.with_ctx(CommonClipboardImpl::read_image)?;
            if let Some(image) = &image {
                debug!(size_bytes = image.bytes.len(), "Read clipboard image");
            }
            Ok(image)
        })
    }

    fn read_file_urls(&self) -> Result<Vec<PathBuf>> {
        self.with_ctx(CommonClipboardImpl::read_file_urls)
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let span = debug_span!("platform.clipboard.write_text", len = text.len());
        span.in_scope(|| self.with_ctx(|ctx| CommonClipboardImpl::write_text(ctx, text)))?;
        self.record_write();
        Ok(())
    }

    fn write_image(&self, png_bytes: &[u8]) -> Result<()> {
        let span = debug_span!("platform.clipboard.write_image", size_bytes = png_bytes.len());
        span.in_scope(|| self.with_ctx(|ctx| CommonClipboardImpl::write_image(ctx, png_bytes)))?;
        self.record_write();
        Ok(())
    }

    fn write_file_url(&self, path: &Path) -> Result<()> {
        let span = debug_span!("platform.clipboard.write_file_url", path = %path.display());
        span.in_scope(|| self.with_ctx(|ctx| CommonClipboardImpl::write_file_url(ctx, path)))?;
        self.record_write();
        Ok(())
    }
}
