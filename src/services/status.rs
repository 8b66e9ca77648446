use crate::models::Notice;
use crate::services::slug::SlugError;

/// The single status message shown above a form.
#[derive(Debug, Default)]
pub struct StatusLine {
    current: Option<Notice>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Show a slug error. Returns `false` when an error of the same kind is
    /// already on screen and nothing had to change.
    pub fn report_error(&mut self, err: &SlugError) -> bool {
        let kind = err.kind();
        if self.current.as_ref().and_then(|notice| notice.kind) == Some(kind) {
            return false;
        }
        tracing::debug!("Slug status: {}", kind);
        self.current = Some(Notice::slug_error(err));
        true
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.current = Some(Notice::info(message));
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.current = Some(Notice::error(message));
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Drop the current notice only if it is a slug error.
    pub fn clear_slug_error(&mut self) {
        if self.current.as_ref().is_some_and(|notice| notice.kind.is_some()) {
            self.current = None;
        }
    }
}
