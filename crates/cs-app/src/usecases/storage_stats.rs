use std::sync::Arc;

use cs_core::clipboard::HistoryStats;
use cs_core::ports::ImageBlobStorePort;
use serde::Serialize;

use crate::history::HistoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    #[serde(flatten)]
    pub history: HistoryStats,
    /// Bytes on disk in the image directory.
    pub image_storage_bytes: u64,
}

pub struct StorageStatsUseCase {
    history: Arc<HistoryStore>,
    blob_store: Arc<dyn ImageBlobStorePort>,
}

impl StorageStatsUseCase {
    pub fn new(history: Arc<HistoryStore>, blob_store: Arc<dyn ImageBlobStorePort>) -> Self {
        Self {
            history,
            blob_store,
        }
    }

    pub async fn execute(&self) -> StorageStats {
        StorageStats {
            history: self.history.stats().await,
            image_storage_bytes: self.blob_store.total_storage_size().await,
        }
    }
}
