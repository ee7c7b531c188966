//! Library behind the `frontend-performance-analyzer` binary.
//!
//! Collects URLs, validates and probes them, audits each one with
//! Lighthouse in a transient headless browser, and renders the results as
//! console output, JSON or Markdown.

pub mod audit;
pub mod config;
pub mod core;
pub mod discovery;
pub mod orchestrator;
pub mod reporting;
pub mod ui;
pub mod validation;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use audit::{AnalyzeUrl, AuditOutcome, LighthouseAuditor};
pub use config::{AnalysisOptions, CliConfig, Config};
pub use core::{AnalyzerError, Result, ScoreReport, Verbosity};
pub use orchestrator::{Orchestrator, RunStage, RunSummary};
pub use reporting::derive_file_stem;
pub use validation::is_valid_url;
