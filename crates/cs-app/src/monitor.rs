//! Poll-driven clipboard change monitor.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use cs_core::ports::{PlatformClipboardPort, SkipNextChangePort};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::history::HistoryStore;
use crate::settings::SharedSettings;
use crate::usecases::{CaptureClipboardUseCase, CaptureOutcome};

/// What a single poll tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The change counter has not moved.
    Unchanged,
    /// First successful counter read; recorded as the baseline.
    Primed,
    CounterUnavailable,
    /// The change was our own write.
    SkippedOwnWrite,
    Capture(CaptureOutcome),
}

struct RunningLoop {
    stop_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

/// Samples the clipboard change counter on a fixed interval and hands every
/// observed change to the capture use case.
///
/// Ticks never overlap: each tick is awaited inside the loop and missed ticks
/// are skipped. Changes that happen between two samples are coalesced, so
/// rapid successive copies can be missed.
///
/// Other processes may edit the same data root while the monitor runs, so
/// settings and history are re-read from disk before each capture.
pub struct ChangeMonitor {
    clipboard: Arc<dyn PlatformClipboardPort>,
    skip_next: Arc<dyn SkipNextChangePort>,
    history: Arc<HistoryStore>,
    settings: Arc<SharedSettings>,
    capture: Arc<CaptureClipboardUseCase>,
    interval: Duration,
    last_change_count: Mutex<Option<i64>>,
    running: Mutex<Option<RunningLoop>>,
}

impl ChangeMonitor {
    pub fn new(
        clipboard: Arc<dyn PlatformClipboardPort>,
        skip_next: Arc<dyn SkipNextChangePort>,
        history: Arc<HistoryStore>,
        settings: Arc<SharedSettings>,
        capture: Arc<CaptureClipboardUseCase>,
        interval: Duration,
    ) -> Self {
        Self {
            clipboard,
            skip_next,
            history,
            settings,
            capture,
            interval,
            last_change_count: Mutex::new(None),
            running: Mutex::new(None),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Start polling. Content already on the clipboard is not captured.
    ///
    /// Calling `start` on a running monitor does nothing.
    pub fn start(self: &Arc<Self>) {
        let mut running = self.running.lock().unwrap_or_else(PoisonError::into_inner);
        if running.is_some() {
            return;
        }

        self.prime();

        let (stop_tx, mut stop_rx) = oneshot::channel();
        let monitor = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(monitor.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of a tokio interval completes immediately.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {}
                }
                monitor.poll_once().await;
            }
            debug!("Clipboard poll loop exited");
        });

        *running = Some(RunningLoop { stop_tx, handle });
        info!(interval_ms = self.interval.as_millis() as u64, "Clipboard monitor started");
    }

    /// Stop polling and wait for an in-flight tick to finish. Idempotent.
    pub async fn stop(&self) {
        let running = self
            .running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(RunningLoop { stop_tx, handle }) = running else {
            return;
        };

        let _ = stop_tx.send(());
        if let Err(err) = handle.await {
            warn!(error = %err, "Clipboard poll loop ended abnormally");
        }
        info!("Clipboard monitor stopped");
    }

    fn prime(&self) {
        let current = match self.clipboard.change_count() {
            Ok(count) => Some(count),
            Err(err) => {
                debug!(error = %err, "Change counter unavailable at start");
                None
            }
        };
        *self
            .last_change_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = current;
    }

    /// Run one tick: detect a change, honour the skip-next flag, then capture.
    pub async fn poll_once(&self) -> PollOutcome {
        let current = match self.clipboard.change_count() {
            Ok(count) => count,
            Err(err) => {
                debug!(error = %err, "Failed to read clipboard change counter");
                return PollOutcome::CounterUnavailable;
            }
        };

        {
            let mut last = self
                .last_change_count
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            match *last {
                None => {
                    *last = Some(current);
                    return PollOutcome::Primed;
                }
                Some(previous) if previous == current => return PollOutcome::Unchanged,
                Some(_) => *last = Some(current),
            }
        }

        if self.skip_next.take() {
            debug!(change_count = current, "Skipping self-initiated clipboard change");
            return PollOutcome::SkippedOwnWrite;
        }

        self.sync_shared_state().await;
        PollOutcome::Capture(self.capture.execute().await)
    }

    /// On failure the in-memory state is kept and the capture goes ahead.
    async fn sync_shared_state(&self) {
        if let Err(err) = self.settings.reload().await {
            warn!(error = %err, "Failed to refresh settings before capture");
        }
        if let Err(err) = self.history.reload().await {
            warn!(error = %err, "Failed to refresh history before capture");
        }
    }
}
