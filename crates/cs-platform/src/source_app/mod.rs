#[cfg(target_os = "macos")]
mod macos;

use cs_core::clipboard::SourceApp;
use cs_core::ports::SourceAppPort;

/// Reports the application that currently has focus.
///
/// Only macOS exposes a bundle identifier; other platforms report nothing,
/// which means the ignore list never matches there.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrontmostAppSource;

impl FrontmostAppSource {
    pub fn new() -> Self {
        Self
    }
}

impl SourceAppPort for FrontmostAppSource {
    #[cfg(target_os = "macos")]
    fn frontmost_app(&self) -> Option<SourceApp> {
        macos::frontmost_app()
    }

    #[cfg(not(target_os = "macos"))]
    fn frontmost_app(&self) -> Option<SourceApp> {
        None
    }
}
