use std::sync::atomic::{AtomicBool, Ordering};

use cs_core::ports::SkipNextChangePort;

/// Process-local skip-next flag.
#[derive(Debug, Default)]
pub struct InMemorySkipNextChange {
    pending: AtomicBool,
}

impl InMemorySkipNextChange {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SkipNextChangePort for InMemorySkipNextChange {
    fn skip_next(&self) {
        self.pending.store(true, Ordering::SeqCst);
    }

    fn cancel(&self) {
        self.pending.store(false, Ordering::SeqCst);
    }

    fn take(&self) -> bool {
        self.pending.swap(false, Ordering::SeqCst)
    }
}
