use diesel::prelude::*;

use crate::db::schema::clipboard_entries;

/// Flat row layout of a clipboard entry.
///
/// Exactly one payload column group is populated, selected by `content_type`.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = clipboard_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClipboardEntryRow {
    pub id: String,
    pub captured_at_ms: i64,
    pub content_type: String,
    pub text_content: Option<String>,
    pub preview: Option<String>,
    pub image_file_name: Option<String>,
    pub file_path: Option<String>,
    pub file_name: Option<String>,
    pub source_app_bundle_id: Option<String>,
    pub source_app_name: Option<String>,
    pub byte_size: i64,
}
