//! User Notifier Port
//!
//! Transient user-visible notices (toasts in the web UI, stderr in the CLI).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: &str, message: &str) -> Self {
        Self::with_level(NoticeLevel::Info, title, message)
    }

    pub fn success(title: &str, message: &str) -> Self {
        Self::with_level(NoticeLevel::Success, title, message)
    }

    pub fn error(title: &str, message: &str) -> Self {
        Self::with_level(NoticeLevel::Error, title, message)
    }

    fn with_level(level: NoticeLevel, title: &str, message: &str) -> Self {
        Self {
            level,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

pub trait UserNotifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
