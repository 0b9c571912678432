use std::sync::Arc;

use anyhow::{Context, Result};
use cs_core::ports::SettingsPort;
use cs_core::Settings;
use tokio::sync::watch;
use tracing::info;

/// Current settings shared between the CLI and the capture engine.
///
/// The capture path only reads [`current`](Self::current); changes go
/// through [`update`](Self::update), which persists before publishing.
/// [`reload`](Self::reload) adopts whatever another process saved.
pub struct SharedSettings {
    repo: Arc<dyn SettingsPort>,
    tx: watch::Sender<Settings>,
}

impl SharedSettings {
    pub fn new(repo: Arc<dyn SettingsPort>, initial: Settings) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { repo, tx }
    }

    pub async fn load(repo: Arc<dyn SettingsPort>) -> Result<Self> {
        let initial = repo.load().await.context("load settings")?;
        Ok(Self::new(repo, initial))
    }

    /// Snapshot of the published value; later updates do not affect it.
    pub fn current(&self) -> Settings {
        self.tx.borrow().clone()
    }

    /// Pick up changes saved by another process. Returns whether anything changed.
    pub async fn reload(&self) -> Result<bool> {
        let stored = self.repo.load().await.context("reload settings")?;
        let changed = self.tx.send_if_modified(|current| {
            if *current == stored {
                return false;
            }
            *current = stored;
            true
        });
        if changed {
            info!("Settings changed on disk");
        }
        Ok(changed)
    }

    /// Apply `change`, persist, then publish. Nothing is published if saving fails.
    pub async fn update(&self, change: impl FnOnce(&mut Settings)) -> Result<Settings> {
        let mut next = self.current();
        change(&mut next);
        if next == *self.tx.borrow() {
            return Ok(next);
        }

        self.repo.save(&next).await.context("save settings")?;
        self.tx.send_replace(next.clone());
        info!("Settings updated");
        Ok(next)
    }
}
