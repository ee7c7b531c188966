//! Filtering of the audit engine's error stream.
//!
//! The engine logs a few internal, non-actionable errors on stderr. A
//! `NoiseFilter` lives for one audit: it turns those into a single short
//! notice, moves the engine's own status lines to verbose output, and
//! passes everything else through untouched.

use crate::core::constants::engine;
use crate::ui::Logger;
use crate::ui::color::{Colors, colorize};

/// How one stderr line from the engine is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StderrLine<'a> {
    /// Known internal engine warning
    Noise(&'a str),
    /// Engine progress logging
    Status(&'a str),
    /// Anything else, shown to the user
    Genuine(&'a str),
    Blank,
}

pub fn classify(line: &str) -> StderrLine<'_> {
    let trimmed = line.trim_end();
    if trimmed.trim().is_empty() {
        StderrLine::Blank
    } else if engine::NOISE_PATTERNS
        .iter()
        .any(|pattern| trimmed.contains(pattern))
    {
        StderrLine::Noise(trimmed)
    } else if trimmed.trim_start().starts_with(engine::STATUS_PREFIX) {
        StderrLine::Status(trimmed)
    } else {
        StderrLine::Genuine(trimmed)
    }
}

pub struct NoiseFilter<'a> {
    logger: &'a Logger,
    suppressed: usize,
    genuine: Vec<String>,
}

impl<'a> NoiseFilter<'a> {
    pub fn new(logger: &'a Logger) -> Self {
        Self {
            logger,
            suppressed: 0,
            genuine: Vec::new(),
        }
    }

    pub fn feed(&mut self, line: &str) {
        match classify(line) {
            StderrLine::Noise(text) => {
                self.suppressed += 1;
                if self.suppressed == 1 {
                    self.logger.info(&colorize(
                        "  └─ ⚠️  Lighthouse internal warning (analysis will continue)",
                        Colors::YELLOW,
                    ));
                    self.logger
                        .verbose(&format!("Lighthouse internal warning: {text}"));
                }
            }
            StderrLine::Status(text) => self.logger.verbose(text),
            StderrLine::Genuine(text) => {
                self.logger.passthrough(text);
                self.genuine.push(text.to_string());
            }
            StderrLine::Blank => {}
        }
    }

    pub fn feed_all(&mut self, stream: &str) {
        for line in stream.lines() {
            self.feed(line);
        }
    }

    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    /// Lines that were passed through to the user
    pub fn genuine(&self) -> &[String] {
        &self.genuine
    }

    /// Close out the audit's filter, noting how much was hidden
    pub fn finish(self) -> Vec<String> {
        if self.suppressed > 1 {
            self.logger.verbose(&format!(
                "Suppressed {} Lighthouse internal warning lines",
                self.suppressed
            ));
        }
        self.genuine
    }
}
