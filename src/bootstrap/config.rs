//! # Configuration Loader
//!
//! Reads `config.toml` into [`AppConfig`]. Pure data loading: every field has a
//! serde default, and no value is validated here.

use std::io;
use std::path::{Path, PathBuf};

use cs_core::config::AppConfig;
use cs_infra::fs::app_data_dir::app_config_dir;

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Default location: `<config_dir>/Clipshelf/config.toml`.
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(app_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load configuration from a TOML file.
///
/// A missing file is not an error and yields [`AppConfig::default`]; sections
/// and keys absent from the file fall back to their defaults as well.
///
/// # Errors
///
/// - [`ConfigError::Read`] if the file exists but cannot be read
/// - [`ConfigError::Parse`] if the content is not valid TOML for [`AppConfig`]
pub fn load_config(config_path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match std::fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: config_path.to_path_buf(),
                source,
            })
        }
    };

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: config_path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let temp_file = write_config(
            r#"
            data_dir = "/tmp/clipshelf-data"
            poll_interval_ms = 250

            [thumbnail_cache]
            max_entries = 10
            max_bytes = 2048

            [log]
            file = false
        "#,
        );

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/clipshelf-data")));
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.thumbnail_cache.max_entries, 10);
        assert_eq!(config.thumbnail_cache.max_bytes, 2048);
        assert!(!config.log.file);
    }

    #[test]
    fn test_load_config_fills_missing_values_with_defaults() {
        let temp_file = write_config(
            r#"
            [thumbnail_cache]
            max_entries = 3
        "#,
        );

        let config = load_config(temp_file.path()).unwrap();
        let defaults = AppConfig::default();

        assert_eq!(config.data_dir, None);
        assert_eq!(config.poll_interval_ms, defaults.poll_interval_ms);
        assert_eq!(config.thumbnail_cache.max_entries, 3);
        assert_eq!(
            config.thumbnail_cache.max_bytes,
            defaults.thumbnail_cache.max_bytes
        );
        assert_eq!(config.log, defaults.log);
    }

    #[test]
    fn test_load_config_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_config_reports_parse_errors_with_path() {
        let temp_file = write_config("poll_interval_ms = \"fast\"");

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err
            .to_string()
            .contains(&temp_file.path().display().to_string()));
    }

    #[test]
    fn test_load_config_directory_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
