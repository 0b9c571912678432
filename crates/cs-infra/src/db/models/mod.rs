pub mod clipboard_entry_row;

pub use clipboard_entry_row::ClipboardEntryRow;
