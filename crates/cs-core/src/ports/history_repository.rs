use anyhow::Result;
use async_trait::async_trait;

use crate::clipboard::ClipboardEntry;
use crate::ids::EntryId;

/// Durable record of clipboard entries.
///
/// Every listing is ordered by capture time, most recent first.
#[async_trait]
pub trait ClipboardHistoryRepositoryPort: Send + Sync {
    async fn insert_entry(&self, entry: &ClipboardEntry) -> Result<()>;

    /// Returns `false` when no entry had that id.
    async fn delete_entry(&self, entry_id: &EntryId) -> Result<bool>;

    /// Returns the number of removed entries.
    async fn delete_all(&self) -> Result<usize>;

    async fn list_all(&self) -> Result<Vec<ClipboardEntry>>;

    async fn list_recent(&self, limit: usize) -> Result<Vec<ClipboardEntry>>;

    /// Entries with `start_ms <= captured_at_ms < end_ms`.
    async fn list_between(&self, start_ms: i64, end_ms: i64) -> Result<Vec<ClipboardEntry>>;

    /// Case-insensitive substring match over text, preview, file name and source app name.
    async fn search(&self, query: &str) -> Result<Vec<ClipboardEntry>>;

    /// Removes every entry captured strictly before `cutoff_ms` and returns them.
    async fn purge_older_than(&self, cutoff_ms: i64) -> Result<Vec<ClipboardEntry>>;
}
