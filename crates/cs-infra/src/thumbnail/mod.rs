pub mod cache;
pub mod generator;

pub use cache::{ThumbnailCache, ThumbnailKey};
pub use generator::WebpThumbnailGenerator;
