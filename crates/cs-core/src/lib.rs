//! # cs-core
//!
//! Core domain models and capture rules for Clipshelf.
//!
//! This crate contains pure business logic without any infrastructure dependencies.
//! Storage, platform clipboard access and time are reached through the traits in [`ports`].

pub mod clipboard;
pub mod config;
pub mod ids;
pub mod ports;
pub mod settings;

// Re-export commonly used types at the crate root
pub use clipboard::{ClipboardEntry, ClipboardPayload, ContentType, HistoryStats, SourceApp};
pub use config::AppConfig;
pub use ids::EntryId;
pub use settings::Settings;
