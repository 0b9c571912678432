use crate::clipboard::SourceApp;

/// Reports which application is frontmost at poll time.
pub trait SourceAppPort: Send + Sync {
    fn frontmost_app(&self) -> Option<SourceApp>;
}
