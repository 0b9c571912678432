use std::sync::Arc;

use cs_core::clipboard::ClipboardEntry;
use cs_core::ports::ImageBlobStorePort;
use tracing::{info, info_span, warn, Instrument};

use crate::history::HistoryStore;
use crate::settings::SharedSettings;

/// Startup retention pass: drop entries past the configured age and release their images.
pub struct PurgeExpiredEntriesUseCase {
    history: Arc<HistoryStore>,
    blob_store: Arc<dyn ImageBlobStorePort>,
    settings: Arc<SharedSettings>,
}

impl PurgeExpiredEntriesUseCase {
    pub fn new(
        history: Arc<HistoryStore>,
        blob_store: Arc<dyn ImageBlobStorePort>,
        settings: Arc<SharedSettings>,
    ) -> Self {
        Self {
            history,
            blob_store,
            settings,
        }
    }

    pub async fn execute(&self) -> Vec<ClipboardEntry> {
        let retention_days = self.settings.current().retention.retention_days;
        let span = info_span!("usecase.purge_expired_entries.execute", retention_days);

        async {
            let purged = self.history.purge_old_entries(retention_days).await;

            for file_name in purged.iter().filter_map(ClipboardEntry::image_file_name) {
                if let Err(err) = self.blob_store.delete(file_name).await {
                    warn!(file_name, error = %err, "Failed to release expired image");
                }
            }

            if !purged.is_empty() {
                info!(count = purged.len(), "Purged expired clipboard entries");
            }
            purged
        }
        .instrument(span)
        .await
    }
}
