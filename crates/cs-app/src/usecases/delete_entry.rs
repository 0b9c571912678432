use std::sync::Arc;

use anyhow::Result;
use cs_core::ids::EntryId;
use cs_core::ports::ImageBlobStorePort;
use tracing::warn;

use crate::history::HistoryStore;

/// Delete one entry and the image it owns.
pub struct DeleteEntryUseCase {
    history: Arc<HistoryStore>,
    blob_store: Arc<dyn ImageBlobStorePort>,
}

impl DeleteEntryUseCase {
    pub fn new(history: Arc<HistoryStore>, blob_store: Arc<dyn ImageBlobStorePort>) -> Self {
        Self {
            history,
            blob_store,
        }
    }

    /// Returns `false` when the entry was not in the history.
    pub async fn execute(&self, entry_id: &EntryId) -> Result<bool> {
        let existing = self.history.find(entry_id).await;
        self.history.delete(entry_id).await?;

        let Some(entry) = existing else {
            return Ok(false);
        };
        if let Some(file_name) = entry.image_file_name() {
            if let Err(err) = self.blob_store.delete(file_name).await {
                warn!(file_name, error = %err, "Failed to release deleted entry's image");
            }
        }
        Ok(true)
    }
}
