use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use cs_core::clipboard::ClipboardEntry;
use cs_core::ports::ImageBlobStorePort;
use serde::Serialize;
use tracing::{info, info_span, Instrument};

/// Manifest of an export, ready for a renderer to format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportBundle {
    pub label: String,
    pub entries: Vec<ExportedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedEntry {
    #[serde(flatten)]
    pub entry: ClipboardEntry,
    /// Copied image, relative to the export destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<PathBuf>,
}

/// Copy the images referenced by `entries` next to an export.
pub struct ExportEntriesUseCase {
    blob_store: Arc<dyn ImageBlobStorePort>,
}

impl ExportEntriesUseCase {
    pub fn new(blob_store: Arc<dyn ImageBlobStorePort>) -> Self {
        Self { blob_store }
    }

    /// Images land in `<destination>/<label>-images/`. A missing image fails the export.
    pub async fn execute(
        &self,
        label: &str,
        entries: Vec<ClipboardEntry>,
        destination: &Path,
    ) -> Result<ExportBundle> {
        let span = info_span!("usecase.export_entries.execute", label, count = entries.len());
        async {
            let images_dir_name = format!("{}-images", label);
            let images_dir = destination.join(&images_dir_name);
            let has_images = entries.iter().any(|e| e.image_file_name().is_some());
            if has_images {
                tokio::fs::create_dir_all(&images_dir)
                    .await
                    .with_context(|| format!("create export dir {}", images_dir.display()))?;
            }

            let mut exported = Vec::with_capacity(entries.len());
            for entry in entries {
                let image_path = match entry.image_file_name() {
                    Some(file_name) => {
                        self.blob_store
                            .copy_to(file_name, &images_dir.join(file_name))
                            .await
                            .with_context(|| format!("export image {}", file_name))?;
                        Some(Path::new(&images_dir_name).join(file_name))
                    }
                    None => None,
                };
                exported.push(ExportedEntry { entry, image_path });
            }

            info!(count = exported.len(), "Exported clipboard entries");
            Ok(ExportBundle {
                label: label.to_string(),
                entries: exported,
            })
        }
        .instrument(span)
        .await
    }
}
