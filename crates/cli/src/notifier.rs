//! Console notifier: toasts из web UI превращаются в строки на stderr.

use application::ports::{Notice, NoticeLevel, UserNotifier};
use console::{style, Term};
use tracing::warn;

pub struct ConsoleNotifier {
    term: Term,
}

impl ConsoleNotifier {
    pub fn stderr() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    /// One line per notice: badge, bold title, message
    pub fn render(notice: &Notice) -> String {
        let badge = match notice.level {
            NoticeLevel::Error => style("✗").red().bold(),
            NoticeLevel::Success => style("✓").green().bold(),
            NoticeLevel::Info => style("•").cyan(),
        };
        format!(
            "{} {}: {}",
            badge,
            style(&notice.title).bold(),
            notice.message
        )
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::stderr()
    }
}

impl UserNotifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        if let Err(e) = self.term.write_line(&Self::render(&notice)) {
            warn!(error = %e, title = %notice.title, "failed to print notice");
        }
    }
}
