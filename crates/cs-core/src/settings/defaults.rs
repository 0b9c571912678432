use std::collections::BTreeSet;

use super::model::*;

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            text: true,
            images: true,
            files: true,
            max_image_size_mb: 5,
            ignored_app_bundle_ids: BTreeSet::new(),
        }
    }
}

impl Default for RetentionSettings {
    fn default() -> Self {
        Self { retention_days: 30 }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            capture: CaptureSettings::default(),
            retention: RetentionSettings::default(),
        }
    }
}
