use anyhow::Result;
use cs_core::clipboard::ClipboardEntry;
use cs_core::ids::EntryId;
use cs_core::ports::ClipboardHistoryRepositoryPort;
use diesel::prelude::*;
use tracing::{debug_span, warn};

use crate::db::models::ClipboardEntryRow;
use crate::db::ports::{DbExecutor, InsertMapper, RowMapper};
use crate::db::schema::clipboard_entries;

const LIKE_ESCAPE: char = '\\';

pub struct DieselClipboardHistoryRepository<E, IM, RM> {
    executor: E,
    insert_mapper: IM,
    row_mapper: RM,
}

impl<E, IM, RM> DieselClipboardHistoryRepository<E, IM, RM> {
    pub fn new(executor: E, insert_mapper: IM, row_mapper: RM) -> Self {
        Self {
            executor,
            insert_mapper,
            row_mapper,
        }
    }
}

impl<E, IM, RM> DieselClipboardHistoryRepository<E, IM, RM>
where
    RM: RowMapper<ClipboardEntryRow, ClipboardEntry>,
{
    /// Rows that violate the payload layout are dropped with a warning.
    fn map_rows(&self, rows: Vec<ClipboardEntryRow>) -> Vec<ClipboardEntry> {
        rows.iter()
            .filter_map(|row| match self.row_mapper.to_domain(row) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(entry_id = %row.id, error = %err, "Skipping malformed clipboard entry row");
                    None
                }
            })
            .collect()
    }
}

/// Escapes `%`, `_` and the escape character itself so `query` matches literally.
pub fn escape_like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    for ch in query.chars() {
        if ch == '%' || ch == '_' || ch == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

#[async_trait::async_trait]
impl<E, IM, RM> ClipboardHistoryRepositoryPort for DieselClipboardHistoryRepository<E, IM, RM>
where
    E: DbExecutor,
    IM: InsertMapper<ClipboardEntry, ClipboardEntryRow>,
    RM: RowMapper<ClipboardEntryRow, ClipboardEntry>,
{
    async fn insert_entry(&self, entry: &ClipboardEntry) -> Result<()> {
        let row = self.insert_mapper.to_row(entry)?;
        debug_span!("infra.history.insert", entry_id = %entry.id).in_scope(|| {
            self.executor.run(|conn| {
                diesel::insert_into(clipboard_entries::table)
                    .values(&row)
                    .execute(conn)?;
                Ok(())
            })
        })
    }

    async fn delete_entry(&self, entry_id: &EntryId) -> Result<bool> {
        let entry_id = entry_id.as_str();
        self.executor.run(|conn| {
            let removed = diesel::delete(
                clipboard_entries::table.filter(clipboard_entries::id.eq(entry_id)),
            )
            .execute(conn)?;
            Ok(removed > 0)
        })
    }

    async fn delete_all(&self) -> Result<usize> {
        self.executor
            .run(|conn| Ok(diesel::delete(clipboard_entries::table).execute(conn)?))
    }

    async fn list_all(&self) -> Result<Vec<ClipboardEntry>> {
        let rows = self.executor.run(|conn| {
            Ok(clipboard_entries::table
                .order(clipboard_entries::captured_at_ms.desc())
                .load::<ClipboardEntryRow>(conn)?)
        })?;
        Ok(self.map_rows(rows))
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<ClipboardEntry>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = self.executor.run(|conn| {
            Ok(clipboard_entries::table
                .order(clipboard_entries::captured_at_ms.desc())
                .limit(limit)
                .load::<ClipboardEntryRow>(conn)?)
        })?;
        Ok(self.map_rows(rows))
    }

    async fn list_between(&self, start_ms: i64, end_ms: i64) -> Result<Vec<ClipboardEntry>> {
        let rows = self.executor.run(|conn| {
            Ok(clipboard_entries::table
                .filter(clipboard_entries::captured_at_ms.ge(start_ms))
                .filter(clipboard_entries::captured_at_ms.lt(end_ms))
                .order(clipboard_entries::captured_at_ms.desc())
                .load::<ClipboardEntryRow>(conn)?)
        })?;
        Ok(self.map_rows(rows))
    }

    async fn search(&self, query: &str) -> Result<Vec<ClipboardEntry>> {
        let pattern = format!("%{}%", escape_like_pattern(query));
        let span = debug_span!("infra.history.search");
        let rows = span.in_scope(|| self.executor.run(|conn| {
            Ok(clipboard_entries::table
                .filter(
                    clipboard_entries::text_content
                        .like(&pattern)
                        .escape(LIKE_ESCAPE)
                        .or(clipboard_entries::preview.like(&pattern).escape(LIKE_ESCAPE))
                        .or(clipboard_entries::file_name.like(&pattern).escape(LIKE_ESCAPE))
                        .or(clipboard_entries::source_app_name
                            .like(&pattern)
                            .escape(LIKE_ESCAPE)),
                )
                .order(clipboard_entries::captured_at_ms.desc())
                .load::<ClipboardEntryRow>(conn)?)
        }))?;
        Ok(self.map_rows(rows))
    }

    async fn purge_older_than(&self, cutoff_ms: i64) -> Result<Vec<ClipboardEntry>> {
        let span = debug_span!("infra.history.purge", cutoff_ms);
        let rows = span.in_scope(|| self.executor.run(|conn| {
            conn.transaction::<_, anyhow::Error, _>(|conn| {
                let expired = clipboard_entries::table
                    .filter(clipboard_entries::captured_at_ms.lt(cutoff_ms))
                    .order(clipboard_entries::captured_at_ms.desc())
                    .load::<ClipboardEntryRow>(conn)?;

                diesel::delete(
                    clipboard_entries::table
                        .filter(clipboard_entries::captured_at_ms.lt(cutoff_ms)),
                )
                .execute(conn)?;

                Ok(expired)
            })
        }))?;
        Ok(self.map_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like_pattern("100%"), "100\\%");
        assert_eq!(escape_like_pattern("snake_case"), "snake\\_case");
        assert_eq!(escape_like_pattern("C:\\dir"), "C:\\\\dir");
        assert_eq!(escape_like_pattern("plain"), "plain");
    }
}
