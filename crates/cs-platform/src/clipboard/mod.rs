mod change_count;
mod common;
mod file_url;
mod system;

pub use change_count::FingerprintCounter;
pub use file_url::{file_url_for, parse_file_reference};
pub use system::SystemClipboard;
