//! Adjacent-duplicate suppression.
//!
//! Only the most recent entry is consulted: a capture identical to an older,
//! non-adjacent entry is still accepted.

use super::{CaptureCandidate, ClipboardEntry, ClipboardPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupDecision {
    Accept,
    Duplicate,
}

/// Decide whether `candidate` repeats the entry captured right before it.
///
/// Text is compared on its trimmed form, files on their exact path. Images are
/// never deduplicated.
pub fn check(latest: Option<&ClipboardEntry>, candidate: &CaptureCandidate) -> DedupDecision {
    let Some(latest) = latest else {
        return DedupDecision::Accept;
    };

    let duplicate = match (candidate, &latest.payload) {
        (CaptureCandidate::Text { text }, ClipboardPayload::Text { text: previous }) => {
            text.trim() == previous.trim()
        }
        (CaptureCandidate::File { path }, ClipboardPayload::File { path: previous, .. }) => {
            path == previous
        }
        _ => false,
    };

    if duplicate {
        DedupDecision::Duplicate
    } else {
        DedupDecision::Accept
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::clipboard::SourceApp;

    fn text_entry(text: &str) -> ClipboardEntry {
        ClipboardEntry::text(1, text.to_string(), text.trim().to_string(), SourceApp::unknown())
    }

    fn file_entry(path: &str) -> ClipboardEntry {
        ClipboardEntry::file(1, PathBuf::from(path), "x".to_string(), SourceApp::unknown(), 0)
    }

    #[test]
    fn empty_history_accepts() {
        let candidate = CaptureCandidate::Text {
            text: "hello".to_string(),
        };
        assert_eq!(check(None, &candidate), DedupDecision::Accept);
    }

    #[test]
    fn identical_trimmed_text_is_duplicate() {
        let latest = text_entry("hello\n");
        let candidate = CaptureCandidate::Text {
            text: "  hello".to_string(),
        };
        assert_eq!(check(Some(&latest), &candidate), DedupDecision::Duplicate);
    }

    #[test]
    fn different_text_is_accepted() {
        let latest = text_entry("hello");
        let candidate = CaptureCandidate::Text {
            text: "hello world".to_string(),
        };
        assert_eq!(check(Some(&latest), &candidate), DedupDecision::Accept);
    }

    #[test]
    fn same_path_file_is_duplicate() {
        let latest = file_entry("/tmp/a.txt");
        let same = CaptureCandidate::File {
            path: PathBuf::from("/tmp/a.txt"),
        };
        let other = CaptureCandidate::File {
            path: PathBuf::from("/tmp/b.txt"),
        };
        assert_eq!(check(Some(&latest), &same), DedupDecision::Duplicate);
        assert_eq!(check(Some(&latest), &other), DedupDecision::Accept);
    }

    #[test]
    fn type_mismatch_is_never_duplicate() {
        let latest = text_entry("/tmp/a.txt");
        let candidate = CaptureCandidate::File {
            path: PathBuf::from("/tmp/a.txt"),
        };
        assert_eq!(check(Some(&latest), &candidate), DedupDecision::Accept);
    }

    #[test]
    fn images_are_always_accepted() {
        let latest = ClipboardEntry::image(
            1,
            "a.png".to_string(),
            "Image (1×1)".to_string(),
            SourceApp::unknown(),
            1,
        );
        assert_eq!(
            check(Some(&latest), &CaptureCandidate::Image),
            DedupDecision::Accept
        );
    }
}
