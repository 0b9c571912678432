use std::path::PathBuf;

use anyhow::Result;
use cs_core::clipboard::{ClipboardEntry, ClipboardPayload, ContentType, SourceApp};

use crate::db::models::ClipboardEntryRow;
use crate::db::ports::{InsertMapper, RowMapper};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EntryMappingError {
    #[error("entry {id}: unknown content type {value:?}")]
    UnknownContentType { id: String, value: String },

    #[error("entry {id}: {content_type} entry is missing column {column}")]
    MissingColumn {
        id: String,
        content_type: ContentType,
        column: &'static str,
    },

    #[error("entry {id}: {content_type} entry has unexpected column {column} set")]
    UnexpectedColumn {
        id: String,
        content_type: ContentType,
        column: &'static str,
    },

    #[error("entry {id}: file path is not valid UTF-8")]
    NonUtf8Path { id: String },
}

pub struct ClipboardEntryRowMapper;

impl InsertMapper<ClipboardEntry, ClipboardEntryRow> for ClipboardEntryRowMapper {
    fn to_row(&self, domain: &ClipboardEntry) -> Result<ClipboardEntryRow> {
        let mut row = ClipboardEntryRow {
            id: domain.id.to_string(),
            captured_at_ms: domain.captured_at_ms,
            content_type: domain.content_type().as_str().to_string(),
            text_content: None,
            preview: Some(domain.preview.clone()),
            image_file_name: None,
            file_path: None,
            file_name: None,
            source_app_bundle_id: domain.source_app.bundle_id.clone(),
            source_app_name: domain.source_app.name.clone(),
            byte_size: domain.byte_size,
        };

        match &domain.payload {
            ClipboardPayload::Text { text } => row.text_content = Some(text.clone()),
            ClipboardPayload::Image { file_name } => row.image_file_name = Some(file_name.clone()),
            ClipboardPayload::File { path, name } => {
                let path = path.to_str().ok_or_else(|| EntryMappingError::NonUtf8Path {
                    id: domain.id.to_string(),
                })?;
                row.file_path = Some(path.to_string());
                row.file_name = Some(name.clone());
            }
        }

        Ok(row)
    }
}

impl RowMapper<ClipboardEntryRow, ClipboardEntry> for ClipboardEntryRowMapper {
    fn to_domain(&self, row: &ClipboardEntryRow) -> Result<ClipboardEntry> {
        let content_type: ContentType =
            row.content_type
                .parse()
                .map_err(|_| EntryMappingError::UnknownContentType {
                    id: row.id.clone(),
                    value: row.content_type.clone(),
                })?;

        let payload = match content_type {
            ContentType::Text => {
                reject_set(row, content_type, "image_file_name", &row.image_file_name)?;
                reject_set(row, content_type, "file_path", &row.file_path)?;
                ClipboardPayload::Text {
                    text: require(row, content_type, "text_content", &row.text_content)?,
                }
            }
            ContentType::Image => {
                reject_set(row, content_type, "text_content", &row.text_content)?;
                reject_set(row, content_type, "file_path", &row.file_path)?;
                ClipboardPayload::Image {
                    file_name: require(row, content_type, "image_file_name", &row.image_file_name)?,
                }
            }
            ContentType::File => {
                reject_set(row, content_type, "text_content", &row.text_content)?;
                reject_set(row, content_type, "image_file_name", &row.image_file_name)?;
                ClipboardPayload::File {
                    path: PathBuf::from(require(row, content_type, "file_path", &row.file_path)?),
                    name: require(row, content_type, "file_name", &row.file_name)?,
                }
            }
        };

        Ok(ClipboardEntry::new(
            row.id.clone().into(),
            row.captured_at_ms,
            payload,
            row.preview.clone().unwrap_or_default(),
            SourceApp {
                bundle_id: row.source_app_bundle_id.clone(),
                name: row.source_app_name.clone(),
            },
            row.byte_size,
        ))
    }
}

fn require(
    row: &ClipboardEntryRow,
    content_type: ContentType,
    column: &'static str,
    value: &Option<String>,
) -> Result<String, EntryMappingError> {
    value.clone().ok_or_else(|| EntryMappingError::MissingColumn {
        id: row.id.clone(),
        content_type,
        column,
    })
}

fn reject_set(
    row: &ClipboardEntryRow,
    content_type: ContentType,
    column: &'static str,
    value: &Option<String>,
) -> Result<(), EntryMappingError> {
    match value {
        Some(_) => Err(EntryMappingError::UnexpectedColumn {
            id: row.id.clone(),
            content_type,
            column,
        }),
        None => Ok(()),
    }
}
