use crate::services::slug::ErrorKind;
use std::time::Duration;

pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// How long an informational notice stays visible before folding away.
pub const NOTICE_DISPLAY: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub kind: Option<ErrorKind>,
    pub fold_after: Option<Duration>,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            kind: None,
            fold_after: Some(NOTICE_DISPLAY),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            kind: None,
            fold_after: None,
        }
    }

    pub fn slug_error(err: &crate::services::slug::SlugError) -> Self {
        Self {
            kind: Some(err.kind()),
            ..Self::error(err.to_string())
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.level {
            NoticeLevel::Info => write!(f, "{}", self.message),
            NoticeLevel::Error => write!(f, "error: {}", self.message),
        }
    }
}
