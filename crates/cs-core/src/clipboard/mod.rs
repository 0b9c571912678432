mod capture;
mod content_type;
pub mod dedup;
mod entry;
mod stats;

pub use capture::{
    build_text_preview, classify, image_preview, CaptureCandidate, ClipboardImage,
    ClipboardOffer, TEXT_PREVIEW_MAX_CHARS,
};
pub use content_type::{ContentType, ParseContentTypeError};
pub use dedup::DedupDecision;
pub use entry::{ClipboardEntry, ClipboardPayload, SourceApp};
pub use stats::HistoryStats;
