use crate::ports::{Notice, NoticeLevel, UserNotifier};
use parking_lot::Mutex;
use tracing::{error, info};

/// Routes notices into the tracing pipeline
#[derive(Debug, Default)]
pub struct LogNotifier;

impl UserNotifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => error!(title = %notice.title, "{}", notice.message),
            NoticeLevel::Info | NoticeLevel::Success => {
                info!(title = %notice.title, "{}", notice.message)
            }
        }
    }
}

/// Keeps every notice for later inspection
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    pub fn errors(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .iter()
            .filter(|n| n.level == NoticeLevel::Error)
            .cloned()
            .collect()
    }
}

impl UserNotifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}
