use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

const BYTES_PER_MB: i64 = 1024 * 1024;

/// Which content types get captured and how large an image may be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    pub text: bool,
    pub images: bool,
    pub files: bool,
    pub max_image_size_mb: u32,
    /// Bundle identifiers of applications whose copies are never recorded.
    pub ignored_app_bundle_ids: BTreeSet<String>,
}

impl CaptureSettings {
    pub fn max_image_size_bytes(&self) -> i64 {
        i64::from(self.max_image_size_mb) * BYTES_PER_MB
    }

    pub fn is_app_ignored(&self, bundle_id: &str) -> bool {
        self.ignored_app_bundle_ids.contains(bundle_id)
    }

    /// Returns `true` when the set changed.
    pub fn set_app_ignored(&mut self, bundle_id: &str, ignored: bool) -> bool {
        if ignored {
            self.ignored_app_bundle_ids.insert(bundle_id.to_string())
        } else {
            self.ignored_app_bundle_ids.remove(bundle_id)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionSettings {
    /// Entries older than this many days are purged at startup.
    pub retention_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub capture: CaptureSettings,

    #[serde(default)]
    pub retention: RetentionSettings,
}

fn current_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}
