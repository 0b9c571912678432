pub mod defaults;
pub mod model;

pub use model::{CaptureSettings, RetentionSettings, Settings, CURRENT_SCHEMA_VERSION};
