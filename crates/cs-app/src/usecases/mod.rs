pub mod capture_clipboard;
pub mod clear_history;
pub mod delete_entry;
pub mod export_entries;
pub mod purge_expired_entries;
pub mod recopy_entry;
pub mod storage_stats;

pub use capture_clipboard::{CaptureClipboardUseCase, CaptureOutcome, RejectReason};
pub use clear_history::ClearHistoryUseCase;
pub use delete_entry::DeleteEntryUseCase;
pub use export_entries::{ExportBundle, ExportEntriesUseCase, ExportedEntry};
pub use purge_expired_entries::PurgeExpiredEntriesUseCase;
pub use recopy_entry::{RecopyEntryUseCase, RecopyError};
pub use storage_stats::{StorageStats, StorageStatsUseCase};
