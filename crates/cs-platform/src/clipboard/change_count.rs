//! Clipboard change counters.
//!
//! macOS exposes `NSPasteboard.changeCount`, a cheap integer that increments on
//! every write. Elsewhere the counter is derived from a content fingerprint.

/// Read `NSPasteboard.generalPasteboard.changeCount`.
#[cfg(target_os = "macos")]
pub(crate) fn pasteboard_change_count() -> Option<i64> {
    use cocoa::appkit::NSPasteboard;
    use cocoa::base::nil;
    use objc::runtime::Object;
    use objc::{msg_send, sel, sel_impl};

    unsafe {
        let pasteboard: *mut Object = NSPasteboard::generalPasteboard(nil);
        if pasteboard.is_null() {
            return None;
        }

        // NSInteger
        let change_count: i64 = msg_send![pasteboard, changeCount];
        Some(change_count)
    }
}

/// Counter that advances whenever the observed content fingerprint changes.
///
/// Content written by this process is reported through [`Self::mark_written`],
/// so our own writes always count as a change, even when they put back what
/// was already there.
#[derive(Debug, Default)]
pub struct FingerprintCounter {
    last: Option<blake3::Hash>,
    count: i64,
}

impl FingerprintCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, fingerprint: blake3::Hash) -> i64 {
        if self.last != Some(fingerprint) {
            if self.last.is_some() {
                self.count = self.count.wrapping_add(1);
            }
            self.last = Some(fingerprint);
        }
        self.count
    }

    /// Advance once for a write; the next observation only records the new fingerprint.
    pub fn mark_written(&mut self) {
        self.count = self.count.wrapping_add(1);
        self.last = None;
    }
}
