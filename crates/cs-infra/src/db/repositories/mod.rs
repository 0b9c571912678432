mod clipboard_history_repo;

pub use clipboard_history_repo::{escape_like_pattern, DieselClipboardHistoryRepository};
