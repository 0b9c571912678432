//! Application configuration domain model

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Process-level configuration.
///
/// Unlike [`crate::Settings`], which holds the user's capture policy, this
/// describes where data lives and how the engine is tuned. Every field has a
/// default so an absent or partial config file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Overrides the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Clipboard sampling interval. Changes faster than this can be missed.
    pub poll_interval_ms: u64,

    pub thumbnail_cache: ThumbnailCacheConfig,

    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailCacheConfig {
    pub max_entries: usize,
    pub max_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Also write logs to `<data_dir>/logs/clipshelf.log`.
    pub file: bool,
}

impl AppConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            poll_interval_ms: 500,
            thumbnail_cache: ThumbnailCacheConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ThumbnailCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 256,
            max_bytes: 32 * 1024 * 1024,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { file: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_is_clamped() {
        let config = AppConfig {
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
    }

    #[test]
    fn default_interval_is_half_a_second() {
        assert_eq!(AppConfig::default().poll_interval(), Duration::from_millis(500));
    }
}
