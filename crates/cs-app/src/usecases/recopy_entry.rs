use std::sync::Arc;

use cs_core::clipboard::{ClipboardEntry, ClipboardPayload};
use cs_core::ids::EntryId;
use cs_core::ports::{ImageBlobStorePort, PlatformClipboardPort, SkipNextChangePort};
use tracing::{info, info_span, Instrument};

use crate::history::HistoryStore;

#[derive(Debug, thiserror::Error)]
pub enum RecopyError {
    #[error("clipboard entry not found: {0}")]
    EntryNotFound(EntryId),

    #[error("image for entry {entry_id} is missing: {file_name}")]
    ImageMissing { entry_id: EntryId, file_name: String },

    #[error("failed to write entry to the clipboard")]
    Write(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Put a history entry back on the system clipboard without re-capturing it.
///
/// # Correct Usage
///
/// The skip-next flag is raised immediately before the write and withdrawn if
/// the write fails, so the next tick either sees our own write (and skips it)
/// or sees no change at all.
pub struct RecopyEntryUseCase {
    history: Arc<HistoryStore>,
    blob_store: Arc<dyn ImageBlobStorePort>,
    clipboard: Arc<dyn PlatformClipboardPort>,
    skip_next: Arc<dyn SkipNextChangePort>,
}

enum Restorable {
    Text(String),
    Image(Vec<u8>),
    File(std::path::PathBuf),
}

impl RecopyEntryUseCase {
    pub fn new(
        history: Arc<HistoryStore>,
        blob_store: Arc<dyn ImageBlobStorePort>,
        clipboard: Arc<dyn PlatformClipboardPort>,
        skip_next: Arc<dyn SkipNextChangePort>,
    ) -> Self {
        Self {
            history,
            blob_store,
            clipboard,
            skip_next,
        }
    }

    pub async fn execute(&self, entry_id: &EntryId) -> Result<ClipboardEntry, RecopyError> {
        let span = info_span!("usecase.recopy_entry.execute", entry_id = %entry_id);
        async {
            let entry = self
                .history
                .find(entry_id)
                .await
                .ok_or_else(|| RecopyError::EntryNotFound(entry_id.clone()))?;

            let payload = match &entry.payload {
                ClipboardPayload::Text { text } => Restorable::Text(text.clone()),
                ClipboardPayload::Image { file_name } => {
                    let image = self.blob_store.load(file_name).await.ok_or_else(|| {
                        RecopyError::ImageMissing {
                            entry_id: entry.id.clone(),
                            file_name: file_name.clone(),
                        }
                    })?;
                    Restorable::Image(image.bytes)
                }
                ClipboardPayload::File { path, .. } => Restorable::File(path.clone()),
            };

            self.skip_next.skip_next();
            let written = match &payload {
                Restorable::Text(text) => self.clipboard.write_text(text),
                Restorable::Image(png) => self.clipboard.write_image(png),
                Restorable::File(path) => self.clipboard.write_file_url(path),
            };
            if let Err(err) = written {
                self.skip_next.cancel();
                return Err(RecopyError::Write(err.into()));
            }

            info!(content_type = %entry.content_type(), "Restored entry to clipboard");
            Ok(entry)
        }
        .instrument(span)
        .await
    }
}
