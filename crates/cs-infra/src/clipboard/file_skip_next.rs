use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cs_core::ports::{ClockPort, SkipNextChangePort};
use tracing::{debug, warn};

/// A raised flag older than this no longer suppresses anything.
pub const SKIP_NEXT_TTL_MS: i64 = 10_000;

/// Skip-next flag kept as a marker file, so a write made by one process is
/// skipped by the monitor running in another.
///
/// The marker holds the time it was raised in epoch milliseconds. Removing the
/// file is the claim: only the caller whose removal succeeds sees the flag.
pub struct FileSkipNextChange {
    path: PathBuf,
    clock: Arc<dyn ClockPort>,
}

impl FileSkipNextChange {
    pub fn new(path: impl Into<PathBuf>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn raised_at(&self) -> Option<i64> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => content.trim().parse().ok(),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Failed to read skip-next marker");
                None
            }
        }
    }

    fn remove_marker(&self) -> bool {
        match std::fs::remove_file(&self.path) {
            Ok(()) => true,
            Err(err) if err.kind() == ErrorKind::NotFound => false,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Failed to remove skip-next marker");
                false
            }
        }
    }
}

impl SkipNextChangePort for FileSkipNextChange {
    fn skip_next(&self) {
        let stamp = self.clock.now_ms().to_string();
        if let Err(err) = std::fs::write(&self.path, stamp) {
            warn!(path = %self.path.display(), error = %err, "Failed to raise skip-next marker");
        }
    }

    fn cancel(&self) {
        self.remove_marker();
    }

    fn take(&self) -> bool {
        let raised_at = self.raised_at();
        if !self.remove_marker() {
            return false;
        }

        match raised_at {
            Some(at) if self.clock.now_ms().saturating_sub(at) <= SKIP_NEXT_TTL_MS => true,
            _ => {
                debug!(?raised_at, "Discarded stale skip-next marker");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    struct StepClock(AtomicI64);

    impl ClockPort for StepClock {
        fn now_ms(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    fn marker(dir: &Path, clock: &Arc<StepClock>) -> FileSkipNextChange {
        FileSkipNextChange::new(dir.join("skip-next"), clock.clone())
    }

    #[test]
    fn flag_raised_in_one_handle_is_consumed_once_by_another() {
        let dir = tempfile::tempdir().unwrap();
        let clock = Arc::new(StepClock(AtomicI64::new(1_000)));
        let writer = marker(dir.path(), &clock);
        let watcher = marker(dir.path(), &clock);

        assert!(!watcher.take());
        writer.skip_next();
        assert!(writer.path().exists());

        assert!(watcher.take());
        assert!(!watcher.take());
        assert!(!writer.path().exists());
    }

    #[test]
    fn cancel_removes_marker() {
        let dir = tempfile::tempdir().unwrap();
        let clock = Arc::new(StepClock(AtomicI64::new(1_000)));
        let flag = marker(dir.path(), &clock);

        flag.skip_next();
        flag.cancel();

        assert!(!flag.path().exists());
        assert!(!flag.take());
    }

    #[test]
    fn stale_marker_is_dropped_without_skipping() {
        let dir = tempfile::tempdir().unwrap();
        let clock = Arc::new(StepClock(AtomicI64::new(1_000)));
        let flag = marker(dir.path(), &clock);

        flag.skip_next();
        clock.0.store(1_000 + SKIP_NEXT_TTL_MS + 1, Ordering::SeqCst);

        assert!(!flag.take());
        assert!(!flag.path().exists());
    }

    #[test]
    fn unparseable_marker_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let clock = Arc::new(StepClock(AtomicI64::new(1_000)));
        let flag = marker(dir.path(), &clock);
        std::fs::write(flag.path(), "garbage").unwrap();

        assert!(!flag.take());
        assert!(!flag.path().exists());
    }
}
