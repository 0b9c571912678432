//! Platform adapters: the system clipboard and the frontmost application.

pub mod clipboard;
pub mod source_app;

pub use clipboard::SystemClipboard;
pub use source_app::FrontmostAppSource;
