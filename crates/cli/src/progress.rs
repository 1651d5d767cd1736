use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Kinds of store round-trips, styled differently
#[derive(Debug, Clone, Copy)]
pub enum ProgressType {
    /// Fetches and aggregations
    Read,
    /// Creates, updates and deletes
    Write,
}

impl ProgressType {
    fn tick_chars(self) -> &'static str {
        match self {
            ProgressType::Read => "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏",
            ProgressType::Write => "⠋⠙⠚⠞⠖⠦⠴⠲⠳⠓",
        }
    }

    fn template(self) -> &'static str {
        match self {
            ProgressType::Read => "{spinner:.cyan} {msg}",
            ProgressType::Write => "{spinner:.yellow} {msg}",
        }
    }

    /// Spinner on stderr; hidden when `quiet` (JSON output) or not a terminal
    pub fn spinner(self, message: &str, quiet: bool) -> StoreSpinner {
        if quiet || !console::user_attended_stderr() {
            return StoreSpinner {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner()
            .tick_chars(self.tick_chars())
            .template(self.template())
        {
            bar.set_style(spinner_style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        StoreSpinner { bar }
    }
}

pub struct StoreSpinner {
    bar: ProgressBar,
}

impl StoreSpinner {
    pub fn finish_success(&self, message: &str) {
        self.bar
            .finish_with_message(style(format!("✓ {message}")).green().to_string());
    }

    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for StoreSpinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
