use std::sync::Arc;

use anyhow::Result;
use cs_core::ports::ImageBlobStorePort;
use tracing::{info_span, warn, Instrument};

use crate::history::HistoryStore;

/// Delete every entry and every image referenced by the history.
pub struct ClearHistoryUseCase {
    history: Arc<HistoryStore>,
    blob_store: Arc<dyn ImageBlobStorePort>,
}

impl ClearHistoryUseCase {
    pub fn new(history: Arc<HistoryStore>, blob_store: Arc<dyn ImageBlobStorePort>) -> Self {
        Self {
            history,
            blob_store,
        }
    }

    /// Returns how many entries were cleared.
    pub async fn execute(&self) -> Result<usize> {
        let span = info_span!("usecase.clear_history.execute");
        async {
            let entries = self.history.entries().await;
            self.history.delete_all().await?;

            for entry in &entries {
                if let Some(file_name) = entry.image_file_name() {
                    if let Err(err) = self.blob_store.delete(file_name).await {
                        warn!(file_name, error = %err, "Failed to release image");
                    }
                }
            }
            Ok(entries.len())
        }
        .instrument(span)
        .await
    }
}
