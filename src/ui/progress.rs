use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

use crate::core::Verbosity;
use crate::ui::Logger;

/// Spinner shown on stderr while a single audit runs.
///
/// Only drawn at normal verbosity on an interactive terminal; verbose runs
/// print timing lines instead and silent runs print nothing.
pub struct AuditSpinner {
    bar: Option<ProgressBar>,
}

impl AuditSpinner {
    pub fn start(logger: &Logger, message: &str) -> Self {
        if logger.verbosity() != Verbosity::Normal || !std::io::stderr().is_terminal() {
            return Self::disabled();
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("  {spinner:.green} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar: Some(bar) }
    }

    pub fn disabled() -> Self {
        Self { bar: None }
    }

    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
