//! Durable history plus its ordered in-memory projection.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use cs_core::clipboard::{ClipboardEntry, HistoryStats};
use cs_core::ids::EntryId;
use cs_core::ports::{ClipboardHistoryRepositoryPort, ClockPort};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::time::{local_date_of, local_day_range_ms, retention_cutoff_ms};

/// Clipboard history: a durable repository fronted by a cache ordered by
/// capture time, most recent first.
///
/// Every mutation hits the repository first and only touches the cache once
/// that succeeded, so the cache is always an in-order subset of what is stored.
pub struct HistoryStore {
    repo: Arc<dyn ClipboardHistoryRepositoryPort>,
    clock: Arc<dyn ClockPort>,
    cache: RwLock<Vec<ClipboardEntry>>,
}

impl HistoryStore {
    pub fn new(repo: Arc<dyn ClipboardHistoryRepositoryPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            repo,
            clock,
            cache: RwLock::new(Vec::new()),
        }
    }

    pub async fn insert(&self, entry: ClipboardEntry) -> Result<()> {
        if let Err(err) = self.repo.insert_entry(&entry).await {
            error!(entry_id = %entry.id, error = %err, "Failed to persist clipboard entry");
            return Err(err.context(format!("insert clipboard entry {}", entry.id)));
        }

        let mut cache = self.cache.write().await;
        let position = cache.partition_point(|cached| cached.captured_at_ms > entry.captured_at_ms);
        cache.insert(position, entry);
        Ok(())
    }

    /// Removing an unknown id succeeds without changes.
    pub async fn delete(&self, entry_id: &EntryId) -> Result<()> {
        let removed = self
            .repo
            .delete_entry(entry_id)
            .await
            .with_context(|| format!("delete clipboard entry {}", entry_id))?;
        if !removed {
            debug!(entry_id = %entry_id, "Delete of unknown entry");
        }

        self.cache.write().await.retain(|entry| &entry.id != entry_id);
        Ok(())
    }

    pub async fn delete_all(&self) -> Result<()> {
        let removed = self
            .repo
            .delete_all()
            .await
            .context("delete all clipboard entries")?;
        self.cache.write().await.clear();
        info!(removed, "Cleared clipboard history");
        Ok(())
    }

    /// Replace the cache with the full durable history. On failure the cache is kept.
    pub async fn load_all(&self) -> Result<()> {
        let entries = self
            .repo
            .list_all()
            .await
            .context("load clipboard history")?;
        debug!(count = entries.len(), "Loaded clipboard history");
        *self.cache.write().await = entries;
        Ok(())
    }

    /// Re-read after another process changed the durable history.
    pub async fn reload(&self) -> Result<()> {
        self.load_all().await
    }

    /// Empty query returns the cached history as is.
    pub async fn search(&self, query: &str) -> Vec<ClipboardEntry> {
        if query.is_empty() {
            return self.entries().await;
        }

        match self.repo.search(query).await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "Clipboard history search failed");
                Vec::new()
            }
        }
    }

    pub async fn recent_entries(&self, limit: usize) -> Vec<ClipboardEntry> {
        match self.repo.list_recent(limit).await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, limit, "Failed to list recent entries");
                Vec::new()
            }
        }
    }

    /// Entries captured on `date` in the local time zone.
    pub async fn entries_for_date(&self, date: NaiveDate) -> Vec<ClipboardEntry> {
        let (start_ms, end_ms) = local_day_range_ms(date);
        match self.repo.list_between(start_ms, end_ms).await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, %date, "Failed to list entries for date");
                Vec::new()
            }
        }
    }

    /// Delete everything older than `max_age_days` and return what was removed.
    pub async fn purge_old_entries(&self, max_age_days: u32) -> Vec<ClipboardEntry> {
        let cutoff_ms = retention_cutoff_ms(self.clock.now_ms(), max_age_days);

        let purged = match self.repo.purge_older_than(cutoff_ms).await {
            Ok(purged) => purged,
            Err(err) => {
                error!(error = %err, cutoff_ms, "Failed to purge expired entries");
                return Vec::new();
            }
        };

        let purged_ids: HashSet<&EntryId> = purged.iter().map(|entry| &entry.id).collect();
        self.cache
            .write()
            .await
            .retain(|entry| !purged_ids.contains(&entry.id) && entry.captured_at_ms >= cutoff_ms);

        purged
    }

    /// Head of the cache. Dedup compares against this entry only.
    pub async fn latest(&self) -> Option<ClipboardEntry> {
        self.cache.read().await.first().cloned()
    }

    pub async fn find(&self, entry_id: &EntryId) -> Option<ClipboardEntry> {
        self.cache
            .read()
            .await
            .iter()
            .find(|entry| &entry.id == entry_id)
            .cloned()
    }

    pub async fn entries(&self) -> Vec<ClipboardEntry> {
        self.cache.read().await.clone()
    }

    /// Cached history bucketed by local calendar day, most recent day first.
    /// Entries keep their newest-first order inside a day.
    pub async fn entries_grouped_by_day(&self) -> Vec<(NaiveDate, Vec<ClipboardEntry>)> {
        let cache = self.cache.read().await;
        let mut groups: Vec<(NaiveDate, Vec<ClipboardEntry>)> = Vec::new();

        for entry in cache.iter() {
            let Some(date) = local_date_of(entry.captured_at_ms) else {
                continue;
            };
            match groups.last_mut() {
                Some((day, entries)) if *day == date => entries.push(entry.clone()),
                _ => groups.push((date, vec![entry.clone()])),
            }
        }
        groups
    }

    /// Aggregates over the cache; "today" is the local day of the clock's now.
    pub async fn stats(&self) -> HistoryStats {
        let today = local_date_of(self.clock.now_ms());
        let cache = self.cache.read().await;

        HistoryStats {
            total_count: cache.len(),
            total_bytes: cache.iter().map(|entry| entry.byte_size).sum(),
            today_count: cache
                .iter()
                .filter(|entry| today.is_some() && local_date_of(entry.captured_at_ms) == today)
                .count(),
        }
    }
}
