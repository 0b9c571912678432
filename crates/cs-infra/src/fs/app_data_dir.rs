use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "Clipshelf";

/// Get the Clipshelf application data root directory.
///
/// # Platform-specific Paths
/// - macOS: ~/Library/Application Support/Clipshelf
/// - Windows: %APPDATA%\Clipshelf
/// - Linux: $XDG_DATA_HOME/Clipshelf or ~/.local/share/Clipshelf
///
/// This function does not create the directory.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir =
        get_platform_data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join(APP_DIR_NAME))
}

/// Default location of `config.toml`.
pub fn app_config_dir() -> Result<PathBuf> {
    let base_dir = dirs::config_dir().context("Failed to get platform config directory")?;
    Ok(base_dir.join(APP_DIR_NAME))
}

fn get_platform_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
            return Ok(PathBuf::from(xdg_data_home));
        }
    }

    dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to get platform data directory"))
}

/// Locations of every file Clipshelf keeps under its data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDataPaths {
    root: PathBuf,
}

impl AppDataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the root from an optional override, falling back to [`app_data_dir`].
    pub fn resolve(data_dir_override: Option<&Path>) -> Result<Self> {
        match data_dir_override {
            Some(dir) => Ok(Self::new(dir)),
            None => Ok(Self::new(app_data_dir()?)),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn database_file(&self) -> PathBuf {
        self.root.join("clipboard.sqlite")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join("settings.json")
    }

    /// Marker raised by a re-copy so a monitor in any process skips that write.
    pub fn skip_next_file(&self) -> PathBuf {
        self.root.join("skip-next")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Creates the root directory if it is missing.
    pub fn ensure_root(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("create data dir failed: {}", self.root.display()))
    }
}
