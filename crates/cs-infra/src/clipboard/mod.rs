mod file_skip_next;
mod skip_next;

pub use file_skip_next::{FileSkipNextChange, SKIP_NEXT_TTL_MS};
pub use skip_next::InMemorySkipNextChange;
