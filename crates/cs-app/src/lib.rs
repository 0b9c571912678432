//! Clipshelf application layer
//!
//! The capture engine (change monitor and capture use case), the history
//! store with its in-memory projection, and the use cases the CLI drives.

pub mod deps;
pub mod history;
pub mod monitor;
pub mod settings;
pub mod time;
pub mod usecases;

pub use deps::{App, AppDeps};
pub use history::HistoryStore;
pub use monitor::{ChangeMonitor, PollOutcome};
pub use settings::SharedSettings;
