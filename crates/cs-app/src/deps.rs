//! # Application Dependencies
//!
//! Parameter grouping for constructing the application's use cases.
//! No build steps, no defaults: every port is required.

use std::sync::Arc;
use std::time::Duration;

use cs_core::ports::*;

use crate::history::HistoryStore;
use crate::monitor::ChangeMonitor;
use crate::settings::SharedSettings;
use crate::usecases::*;

pub struct AppDeps {
    // Clipboard
    pub clipboard: Arc<dyn PlatformClipboardPort>,
    pub source_app: Arc<dyn SourceAppPort>,
    pub skip_next: Arc<dyn SkipNextChangePort>,

    // Storage
    pub history_repo: Arc<dyn ClipboardHistoryRepositoryPort>,
    pub blob_store: Arc<dyn ImageBlobStorePort>,

    // Settings
    pub settings: Arc<dyn SettingsPort>,

    // System
    pub clock: Arc<dyn ClockPort>,
}

/// Wired application: the shared stores and accessors for every use case.
pub struct App {
    deps: AppDeps,
    pub history: Arc<HistoryStore>,
    pub settings: Arc<SharedSettings>,
}

impl App {
    /// Load settings and the history cache.
    pub async fn start(deps: AppDeps) -> anyhow::Result<Self> {
        let settings = Arc::new(SharedSettings::load(Arc::clone(&deps.settings)).await?);
        let history = Arc::new(HistoryStore::new(
            Arc::clone(&deps.history_repo),
            Arc::clone(&deps.clock),
        ));
        history.load_all().await?;

        Ok(Self {
            deps,
            history,
            settings,
        })
    }

    pub fn blob_store(&self) -> Arc<dyn ImageBlobStorePort> {
        Arc::clone(&self.deps.blob_store)
    }

    pub fn capture(&self) -> CaptureClipboardUseCase {
        CaptureClipboardUseCase::new(
            Arc::clone(&self.deps.clipboard),
            Arc::clone(&self.deps.source_app),
            Arc::clone(&self.deps.blob_store),
            Arc::clone(&self.history),
            Arc::clone(&self.settings),
            Arc::clone(&self.deps.clock),
        )
    }

    pub fn monitor(&self, interval: Duration) -> Arc<ChangeMonitor> {
        Arc::new(ChangeMonitor::new(
            Arc::clone(&self.deps.clipboard),
            Arc::clone(&self.deps.skip_next),
            Arc::clone(&self.history),
            Arc::clone(&self.settings),
            Arc::new(self.capture()),
            interval,
        ))
    }

    pub fn purge_expired_entries(&self) -> PurgeExpiredEntriesUseCase {
        PurgeExpiredEntriesUseCase::new(
            Arc::clone(&self.history),
            Arc::clone(&self.deps.blob_store),
            Arc::clone(&self.settings),
        )
    }

    pub fn delete_entry(&self) -> DeleteEntryUseCase {
        DeleteEntryUseCase::new(Arc::clone(&self.history), Arc::clone(&self.deps.blob_store))
    }

    pub fn clear_history(&self) -> ClearHistoryUseCase {
        ClearHistoryUseCase::new(Arc::clone(&self.history), Arc::clone(&self.deps.blob_store))
    }

    pub fn recopy_entry(&self) -> RecopyEntryUseCase {
        RecopyEntryUseCase::new(
            Arc::clone(&self.history),
            Arc::clone(&self.deps.blob_store),
            Arc::clone(&self.deps.clipboard),
            Arc::clone(&self.deps.skip_next),
        )
    }

    pub fn export_entries(&self) -> ExportEntriesUseCase {
        ExportEntriesUseCase::new(Arc::clone(&self.deps.blob_store))
    }

    pub fn storage_stats(&self) -> StorageStatsUseCase {
        StorageStatsUseCase::new(Arc::clone(&self.history), Arc::clone(&self.deps.blob_store))
    }
}
