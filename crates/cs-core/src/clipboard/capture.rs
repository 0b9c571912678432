//! Pure capture rules: what kind of entry a clipboard state turns into and how it is previewed.

use std::path::PathBuf;

use super::ContentType;
use crate::settings::CaptureSettings;

pub const TEXT_PREVIEW_MAX_CHARS: usize = 100;

/// Raw image payload as handed over by the platform clipboard.
///
/// The bytes are in whatever encoding the platform produced; they are only
/// re-encoded by the blob store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardImage {
    pub bytes: Vec<u8>,
}

impl ClipboardImage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Size estimate used by the pre-encode size gate.
    pub fn estimated_size(&self) -> i64 {
        self.bytes.len() as i64
    }
}

/// Which representations the clipboard currently offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClipboardOffer {
    pub has_file_url: bool,
    pub has_image: bool,
    pub has_text: bool,
}

/// Pick the single content type to capture for this clipboard state.
///
/// Priority is file > image > text. An image is only taken when no string
/// payload sits next to it (or text capture is off), so rich text that also
/// carries a rendered image is captured as text.
pub fn classify(settings: &CaptureSettings, offer: &ClipboardOffer) -> Option<ContentType> {
    if settings.files && offer.has_file_url {
        return Some(ContentType::File);
    }
    if settings.images && offer.has_image && (!offer.has_text || !settings.text) {
        return Some(ContentType::Image);
    }
    if settings.text && offer.has_text {
        return Some(ContentType::Text);
    }
    None
}

/// A capture that passed classification and is about to be checked for duplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureCandidate {
    Text { text: String },
    Image,
    File { path: PathBuf },
}

/// Preview for text entries: the first characters of the trimmed text.
pub fn build_text_preview(trimmed: &str) -> String {
    trimmed.chars().take(TEXT_PREVIEW_MAX_CHARS).collect()
}

pub fn image_preview(width: u32, height: u32) -> String {
    format!("Image ({}×{})", width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_enabled() -> CaptureSettings {
        CaptureSettings::default()
    }

    #[test]
    fn file_wins_over_everything() {
        let offer = ClipboardOffer {
            has_file_url: true,
            has_image: true,
            has_text: true,
        };
        assert_eq!(classify(&all_enabled(), &offer), Some(ContentType::File));
    }

    #[test]
    fn image_with_text_is_captured_as_text() {
        let offer = ClipboardOffer {
            has_file_url: false,
            has_image: true,
            has_text: true,
        };
        assert_eq!(classify(&all_enabled(), &offer), Some(ContentType::Text));
    }

    #[test]
    fn image_with_text_is_image_when_text_capture_is_off() {
        let settings = CaptureSettings {
            text: false,
            ..all_enabled()
        };
        let offer = ClipboardOffer {
            has_file_url: false,
            has_image: true,
            has_text: true,
        };
        assert_eq!(classify(&settings, &offer), Some(ContentType::Image));
    }

    #[test]
    fn bare_image_is_image() {
        let offer = ClipboardOffer {
            has_image: true,
            ..Default::default()
        };
        assert_eq!(classify(&all_enabled(), &offer), Some(ContentType::Image));
    }

    #[test]
    fn disabled_types_fall_through() {
        let settings = CaptureSettings {
            files: false,
            images: false,
            ..all_enabled()
        };
        let offer = ClipboardOffer {
            has_file_url: true,
            has_image: true,
            has_text: true,
        };
        assert_eq!(classify(&settings, &offer), Some(ContentType::Text));

        let nothing = CaptureSettings {
            text: false,
            ..settings
        };
        assert_eq!(classify(&nothing, &offer), None);
    }

    #[test]
    fn empty_offer_yields_nothing() {
        assert_eq!(classify(&all_enabled(), &ClipboardOffer::default()), None);
    }

    #[test]
    fn text_preview_counts_characters_not_bytes() {
        let long: String = "é".repeat(150);
        let preview = build_text_preview(&long);
        assert_eq!(preview.chars().count(), TEXT_PREVIEW_MAX_CHARS);

        assert_eq!(build_text_preview("short"), "short");
    }

    #[test]
    fn image_preview_shows_dimensions() {
        assert_eq!(image_preview(640, 480), "Image (640×480)");
    }
}
