use std::path::{Path, PathBuf};
use std::sync::Arc;

use cs_core::clipboard::{
    build_text_preview, classify, dedup, image_preview, CaptureCandidate, ClipboardEntry,
    ClipboardOffer, ContentType, DedupDecision, SourceApp,
};
use cs_core::ports::{ClockPort, ImageBlobStorePort, PlatformClipboardPort, SourceAppPort};
use cs_core::settings::CaptureSettings;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::history::HistoryStore;
use crate::settings::SharedSettings;

/// Why a clipboard change did not become an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    IgnoredApp,
    /// Nothing on the clipboard is enabled for capture.
    NothingToCapture,
    EmptyText,
    Duplicate,
    ImageTooLarge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Captured(ClipboardEntry),
    Rejected(RejectReason),
    /// A read, encode or write failed; only this capture is lost.
    Failed,
}

/// What a classified clipboard change will be captured as.
enum CaptureTarget {
    Text,
    Image,
    File(PathBuf),
}

/// Turn the current clipboard content into a history entry.
///
/// # Behavior
/// - Drops copies made in an ignored application
/// - Classifies the clipboard as file, image or text (in that priority)
/// - Suppresses adjacent duplicates of text and files
/// - Gates images on the configured size, before and after re-encoding
/// - Persists through the [`HistoryStore`]
///
/// Failures are logged and reported as [`CaptureOutcome::Failed`]; they never
/// propagate, since the caller is a poll loop that must keep running.
pub struct CaptureClipboardUseCase {
    clipboard: Arc<dyn PlatformClipboardPort>,
    source_app: Arc<dyn SourceAppPort>,
    blob_store: Arc<dyn ImageBlobStorePort>,
    history: Arc<HistoryStore>,
    settings: Arc<SharedSettings>,
    clock: Arc<dyn ClockPort>,
}

impl CaptureClipboardUseCase {
    pub fn new(
        clipboard: Arc<dyn PlatformClipboardPort>,
        source_app: Arc<dyn SourceAppPort>,
        blob_store: Arc<dyn ImageBlobStorePort>,
        history: Arc<HistoryStore>,
        settings: Arc<SharedSettings>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            clipboard,
            source_app,
            blob_store,
            history,
            settings,
            clock,
        }
    }

    pub async fn execute(&self) -> CaptureOutcome {
        let span = info_span!("usecase.capture_clipboard.execute");
        self.capture().instrument(span).await
    }

    async fn capture(&self) -> CaptureOutcome {
        let settings = self.settings.current().capture;
        let source_app = self.source_app.frontmost_app().unwrap_or_default();

        if let Some(bundle_id) = source_app.bundle_id.as_deref() {
            if settings.is_app_ignored(bundle_id) {
                debug!(bundle_id, "Copy from ignored application");
                return CaptureOutcome::Rejected(RejectReason::IgnoredApp);
            }
        }

        let offer = match self.clipboard.offer() {
            Ok(offer) => offer,
            Err(err) => {
                warn!(error = %err, "Failed to inspect clipboard");
                return CaptureOutcome::Failed;
            }
        };

        let target = match self.resolve_target(&settings, offer) {
            Ok(Some(target)) => target,
            Ok(None) => {
                debug!(?offer, "Nothing capturable on clipboard");
                return CaptureOutcome::Rejected(RejectReason::NothingToCapture);
            }
            Err(outcome) => return outcome,
        };

        let entry = match target {
            CaptureTarget::Text => self.capture_text(source_app).await,
            CaptureTarget::Image => self.capture_image(&settings, source_app).await,
            CaptureTarget::File(path) => self.capture_file(path, source_app).await,
        };
        let entry = match entry {
            Ok(entry) => entry,
            Err(outcome) => return outcome,
        };

        let image_file_name = entry.image_file_name().map(str::to_string);
        match self.history.insert(entry.clone()).await {
            Ok(()) => {
                info!(
                    entry_id = %entry.id,
                    content_type = %entry.content_type(),
                    byte_size = entry.byte_size,
                    "Captured clipboard entry"
                );
                CaptureOutcome::Captured(entry)
            }
            Err(_) => {
                if let Some(file_name) = image_file_name {
                    self.release_blob(&file_name).await;
                }
                CaptureOutcome::Failed
            }
        }
    }

    async fn capture_text(&self, source_app: SourceApp) -> Result<ClipboardEntry, CaptureOutcome> {
        let text = match self.clipboard.read_text() {
            Ok(Some(text)) => text,
            Ok(None) => return Err(CaptureOutcome::Rejected(RejectReason::EmptyText)),
            Err(err) => {
                warn!(error = %err, "Failed to read clipboard text");
                return Err(CaptureOutcome::Failed);
            }
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CaptureOutcome::Rejected(RejectReason::EmptyText));
        }
        let preview = build_text_preview(trimmed);

        self.check_duplicate(&CaptureCandidate::Text { text: text.clone() })
            .await?;

        Ok(ClipboardEntry::text(
            self.clock.now_ms(),
            text,
            preview,
            source_app,
        ))
    }

    async fn capture_image(
        &self,
        settings: &CaptureSettings,
        source_app: SourceApp,
    ) -> Result<ClipboardEntry, CaptureOutcome> {
        let image = match self.clipboard.read_image() {
            Ok(Some(image)) => image,
            Ok(None) => return Err(CaptureOutcome::Rejected(RejectReason::NothingToCapture)),
            Err(err) => {
                warn!(error = %err, "Failed to read clipboard image");
                return Err(CaptureOutcome::Failed);
            }
        };

        let max_bytes = settings.max_image_size_bytes();
        if image.estimated_size() > max_bytes {
            debug!(
                estimated = image.estimated_size(),
                max_bytes, "Clipboard image over size limit"
            );
            return Err(CaptureOutcome::Rejected(RejectReason::ImageTooLarge));
        }

        let saved = match self.blob_store.save(&image.bytes).await {
            Ok(saved) => saved,
            Err(err) => {
                warn!(error = %err, "Failed to store clipboard image");
                return Err(CaptureOutcome::Failed);
            }
        };

        if saved.byte_size > max_bytes {
            debug!(
                persisted = saved.byte_size,
                max_bytes, "Encoded image over size limit"
            );
            self.release_blob(&saved.file_name).await;
            return Err(CaptureOutcome::Rejected(RejectReason::ImageTooLarge));
        }

        Ok(ClipboardEntry::image(
            self.clock.now_ms(),
            saved.file_name,
            image_preview(saved.width, saved.height),
            source_app,
            saved.byte_size,
        ))
    }

    /// Classify the offer. A file URL that resolves to no local path does
    /// not count, so the image or text next to it is captured instead.
    fn resolve_target(
        &self,
        settings: &CaptureSettings,
        mut offer: ClipboardOffer,
    ) -> Result<Option<CaptureTarget>, CaptureOutcome> {
        let Some(content_type) = classify(settings, &offer) else {
            return Ok(None);
        };

        let target = match content_type {
            ContentType::Text => CaptureTarget::Text,
            ContentType::Image => CaptureTarget::Image,
            ContentType::File => {
                let first = match self.clipboard.read_file_urls() {
                    Ok(paths) => paths.into_iter().next(),
                    Err(err) => {
                        warn!(error = %err, "Failed to read clipboard file URLs");
                        return Err(CaptureOutcome::Failed);
                    }
                };
                match first {
                    Some(path) => CaptureTarget::File(path),
                    None => {
                        debug!("File URL did not resolve to a local path");
                        offer.has_file_url = false;
                        return Ok(classify(settings, &offer).map(|fallback| match fallback {
                            ContentType::Image => CaptureTarget::Image,
                            _ => CaptureTarget::Text,
                        }));
                    }
                }
            }
        };
        Ok(Some(target))
    }

    async fn capture_file(
        &self,
        path: PathBuf,
        source_app: SourceApp,
    ) -> Result<ClipboardEntry, CaptureOutcome> {
        self.check_duplicate(&CaptureCandidate::File { path: path.clone() })
            .await?;

        let byte_size = file_size(&path).await;
        let name = display_name(&path);

        Ok(ClipboardEntry::file(
            self.clock.now_ms(),
            path,
            name,
            source_app,
            byte_size,
        ))
    }

    async fn check_duplicate(&self, candidate: &CaptureCandidate) -> Result<(), CaptureOutcome> {
        let latest = self.history.latest().await;
        match dedup::check(latest.as_ref(), candidate) {
            DedupDecision::Accept => Ok(()),
            DedupDecision::Duplicate => {
                debug!("Skipping duplicate of latest entry");
                Err(CaptureOutcome::Rejected(RejectReason::Duplicate))
            }
        }
    }

    async fn release_blob(&self, file_name: &str) {
        if let Err(err) = self.blob_store.delete(file_name).await {
            warn!(file_name, error = %err, "Failed to release image blob");
        }
    }
}

async fn file_size(path: &Path) -> i64 {
    match tokio::fs::metadata(path).await {
        Ok(meta) => i64::try_from(meta.len()).unwrap_or(i64::MAX),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "Unreadable file attributes");
            0
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
