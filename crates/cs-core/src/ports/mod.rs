//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. The capture engine only talks to
//! storage, the platform clipboard and the clock through these traits, so
//! every platform supplies its own adapters without touching the core.

mod clock;
mod history_repository;
mod image_blob_store;
mod platform_clipboard;
pub mod settings;
mod skip_next;
mod source_app;
mod thumbnail_generator;

pub use clock::ClockPort;
pub use history_repository::ClipboardHistoryRepositoryPort;
pub use image_blob_store::{BlobCopyError, ImageBlobStorePort, LoadedImage, SavedImage};
pub use platform_clipboard::PlatformClipboardPort;
pub use settings::{SettingsMigrationPort, SettingsPort};
pub use skip_next::SkipNextChangePort;
pub use source_app::SourceAppPort;
pub use thumbnail_generator::{Thumbnail, ThumbnailGeneratorPort};
