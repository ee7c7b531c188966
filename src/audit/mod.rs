//! Per-URL audits
//!
//! This module launches a transient headless browser for each URL, runs
//! the Lighthouse CLI against its debugging port, and turns the result
//! into a `ScoreReport` plus the HTML report.

pub mod engine;
pub mod invoker;
pub mod noise;
pub mod session;

// Re-export commonly used items
pub use engine::{AuditEngine, AuditFlags, EngineOutput, LighthouseCli};
pub use invoker::{AnalyzeUrl, AuditOutcome, LighthouseAuditor};
pub use noise::NoiseFilter;
pub use session::{BrowserLauncher, BrowserSession};
