pub mod clipboard;
pub mod db;
pub mod fs;
pub mod settings;
pub mod thumbnail;
pub mod time;

pub use time::SystemClock;
