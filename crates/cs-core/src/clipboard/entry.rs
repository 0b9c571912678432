use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ContentType;
use crate::ids::EntryId;

/// Application that owned the focus when a capture happened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceApp {
    pub bundle_id: Option<String>,
    pub name: Option<String>,
}

impl SourceApp {
    pub fn new(bundle_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            bundle_id: Some(bundle_id.into()),
            name: Some(name.into()),
        }
    }

    pub fn unknown() -> Self {
        Self::default()
    }
}

/// The type-specific part of an entry.
///
/// Exactly one payload exists per entry, so the content type can never
/// disagree with the populated fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "content_type", rename_all = "snake_case")]
pub enum ClipboardPayload {
    Text { text: String },
    Image { file_name: String },
    File { path: PathBuf, name: String },
}

impl ClipboardPayload {
    pub fn content_type(&self) -> ContentType {
        match self {
            ClipboardPayload::Text { .. } => ContentType::Text,
            ClipboardPayload::Image { .. } => ContentType::Image,
            ClipboardPayload::File { .. } => ContentType::File,
        }
    }
}

/// One captured clipboard event.
///
/// Entries are immutable once created; the only lifecycle transition left is deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardEntry {
    pub id: EntryId,
    pub captured_at_ms: i64,
    #[serde(flatten)]
    pub payload: ClipboardPayload,
    pub preview: String,
    pub source_app: SourceApp,
    pub byte_size: i64,
}

impl ClipboardEntry {
    pub fn new(
        id: EntryId,
        captured_at_ms: i64,
        payload: ClipboardPayload,
        preview: String,
        source_app: SourceApp,
        byte_size: i64,
    ) -> Self {
        Self {
            id,
            captured_at_ms,
            payload,
            preview,
            source_app,
            byte_size: byte_size.max(0),
        }
    }

    pub fn text(
        captured_at_ms: i64,
        text: String,
        preview: String,
        source_app: SourceApp,
    ) -> Self {
        let byte_size = text.len() as i64;
        Self::new(
            EntryId::new(),
            captured_at_ms,
            ClipboardPayload::Text { text },
            preview,
            source_app,
            byte_size,
        )
    }

    pub fn image(
        captured_at_ms: i64,
        file_name: String,
        preview: String,
        source_app: SourceApp,
        byte_size: i64,
    ) -> Self {
        Self::new(
            EntryId::new(),
            captured_at_ms,
            ClipboardPayload::Image { file_name },
            preview,
            source_app,
            byte_size,
        )
    }

    /// File entries reference the file in place; the preview is the file name.
    pub fn file(
        captured_at_ms: i64,
        path: PathBuf,
        name: String,
        source_app: SourceApp,
        byte_size: i64,
    ) -> Self {
        let preview = name.clone();
        Self::new(
            EntryId::new(),
            captured_at_ms,
            ClipboardPayload::File { path, name },
            preview,
            source_app,
            byte_size,
        )
    }

    pub fn content_type(&self) -> ContentType {
        self.payload.content_type()
    }

    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.captured_at_ms)
    }

    pub fn text_content(&self) -> Option<&str> {
        match &self.payload {
            ClipboardPayload::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn image_file_name(&self) -> Option<&str> {
        match &self.payload {
            ClipboardPayload::Image { file_name } => Some(file_name),
            _ => None,
        }
    }

    pub fn file_path(&self) -> Option<&Path> {
        match &self.payload {
            ClipboardPayload::File { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        match &self.payload {
            ClipboardPayload::File { name, .. } => Some(name),
            _ => None,
        }
    }
}
