/// One-shot suppression of the next observed clipboard change.
///
/// Raised right before the application writes to the clipboard itself, so the
/// monitor does not record that write as a new capture.
///
/// # Correct Usage (IMPORTANT)
///
/// [`skip_next`](Self::skip_next) MUST be called *before* the clipboard write
/// it guards. Reversing the order lets the monitor observe the write first.
pub trait SkipNextChangePort: Send + Sync {
    fn skip_next(&self);

    /// Withdraws a pending skip, used when the guarded write failed.
    fn cancel(&self);

    /// Consumes the flag. Returns `true` at most once per [`skip_next`](Self::skip_next).
    fn take(&self) -> bool;
}
