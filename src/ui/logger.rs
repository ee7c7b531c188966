//! User-facing console output gated by the run's verbosity.
//!
//! A `Logger` is built once from the resolved options and handed by
//! reference to every component that talks to the user. Internal
//! diagnostics go through the `log` facade instead (see
//! `reporting::logging`).

use std::io::Write;

use crate::core::Verbosity;
use crate::core::constants::display;
use crate::ui::color::{Colors, colorize};

#[derive(Debug, Clone)]
pub struct Logger {
    verbosity: Verbosity,
    /// When stdout carries a machine-readable payload, chatter moves to stderr
    stdout_reserved: bool,
}

impl Logger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            stdout_reserved: false,
        }
    }

    pub fn with_reserved_stdout(mut self, reserved: bool) -> Self {
        self.stdout_reserved = reserved;
        self
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn enabled(&self, min: Verbosity) -> bool {
        self.verbosity >= min
    }

    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    /// Regular progress output, hidden when silent
    pub fn info(&self, message: &str) {
        self.info_at(message, Verbosity::Normal);
    }

    pub fn info_at(&self, message: &str, min: Verbosity) {
        if self.enabled(min) {
            self.emit(message);
        }
    }

    /// Start a line that a later `info` call completes
    pub fn inline(&self, message: &str) {
        if !self.enabled(Verbosity::Normal) {
            return;
        }
        if self.stdout_reserved {
            let mut err = std::io::stderr().lock();
            let _ = write!(err, "{message}");
            let _ = err.flush();
        } else {
            let mut out = std::io::stdout().lock();
            let _ = write!(out, "{message}");
            let _ = out.flush();
        }
    }

    pub fn success(&self, message: &str) {
        self.info(&colorize(
            &format!("{} {message}", display::SUCCESS_EMOJI),
            Colors::GREEN,
        ));
    }

    /// Warnings go to stderr, hidden when silent
    pub fn warn(&self, message: &str) {
        if self.enabled(Verbosity::Normal) {
            eprintln!(
                "{}",
                colorize(&format!("{} {message}", display::WARNING_EMOJI), Colors::YELLOW)
            );
        }
    }

    pub fn verbose(&self, message: &str) {
        if self.is_verbose() {
            self.emit(&colorize(
                &format!("{} {message}", display::VERBOSE_PREFIX),
                Colors::GRAY,
            ));
        }
    }

    /// Errors are shown at every verbosity
    pub fn error(&self, message: &str) {
        eprintln!(
            "{}",
            colorize(&format!("{} {message}", display::ERROR_EMOJI), Colors::RED)
        );
    }

    /// Report an error; the cause chain is only shown when verbose.
    pub fn error_with_chain(&self, error: &dyn std::error::Error) {
        self.error(&error.to_string());
        if self.is_verbose() {
            let mut source = error.source();
            while let Some(cause) = source {
                self.verbose(&format!("caused by: {cause}"));
                source = cause.source();
            }
        }
    }

    /// A line from an external tool's error stream, passed through verbatim
    pub fn passthrough(&self, line: &str) {
        eprintln!("{line}");
    }

    /// Final results, shown even when silent
    pub fn result(&self, message: &str) {
        self.emit(message);
    }

    pub fn blank(&self) {
        self.info("");
    }

    fn emit(&self, message: &str) {
        if self.stdout_reserved {
            eprintln!("{message}");
        } else {
            println!("{message}");
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Verbosity::Normal)
    }
}
