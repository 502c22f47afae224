use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Типы операций для спиннеров
#[derive(Debug, Clone, Copy)]
pub enum ProgressType {
    /// Одиночный REST запрос (vote, subscribe, post)
    Request,
    /// Загрузка данных (counts, comments, manifest)
    Fetch,
}

impl ProgressType {
    fn tick_chars(self) -> &'static str {
        match self {
            ProgressType::Request => "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏",
            ProgressType::Fetch => "⠋⠙⠚⠞⠖⠦⠴⠲⠳⠓",
        }
    }

    fn tick_interval(self) -> Duration {
        match self {
            ProgressType::Request => Duration::from_millis(80),
            ProgressType::Fetch => Duration::from_millis(120),
        }
    }

    fn color(self) -> &'static str {
        match self {
            ProgressType::Request => "cyan",
            ProgressType::Fetch => "blue",
        }
    }

    /// Spinner on stderr; hidden automatically when stderr is not a terminal
    pub fn create_spinner(self, message: &str) -> Spinner {
        let bar = ProgressBar::new_spinner();
        let template = format!("{{spinner:.{}}} {{msg}}", self.color());

        let spinner_style = ProgressStyle::default_spinner()
            .tick_chars(self.tick_chars())
            .template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        bar.set_style(spinner_style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(self.tick_interval());

        Spinner { bar }
    }
}

pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn finish_success(&self, message: &str) {
        self.bar
            .finish_with_message(style(format!("✓ {message}")).green().to_string());
    }

    pub fn finish_error(&self, message: &str) {
        self.bar
            .finish_with_message(style(format!("✗ {message}")).red().to_string());
    }

    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}
