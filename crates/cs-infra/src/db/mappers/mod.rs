pub mod clipboard_entry_mapper;

pub use clipboard_entry_mapper::{ClipboardEntryRowMapper, EntryMappingError};
