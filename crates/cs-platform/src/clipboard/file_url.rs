use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use url::Url;

/// Turn one clipboard file entry into a local path.
///
/// Platforms hand files over either as `file://` URLs or as plain absolute
/// paths. Anything else (remote URLs, relative paths) is not a local file.
pub fn parse_file_reference(raw: &str) -> Option<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.starts_with("file:") {
        return Url::parse(raw).ok()?.to_file_path().ok();
    }

    let path = PathBuf::from(raw);
    path.is_absolute().then_some(path)
}

/// `file://` URL for writing a path back to the clipboard.
pub fn file_url_for(path: &Path) -> Result<String> {
    Url::from_file_path(path)
        .map(|url| url.to_string())
        .map_err(|_| anyhow!("not an absolute file path: {}", path.display()))
}
