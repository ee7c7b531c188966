use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::core::constants::categories;
use crate::core::error::{AnalyzerError, Result};
use crate::core::types::{CategorySelection, Preset};

/// What the engine is asked to measure for one URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditFlags {
    pub categories: CategorySelection,
    pub preset: Preset,
    pub verbose: bool,
}

/// Raw result of one engine run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stderr: String,
    pub report_json: Option<String>,
    pub html: Option<String>,
}

/// An audit engine that can be pointed at a browser's debugging port.
#[async_trait]
pub trait AuditEngine: Send + Sync {
    async fn run(
        &self,
        url: &str,
        port: u16,
        flags: &AuditFlags,
        output_base: &Path,
    ) -> Result<EngineOutput>;
}

/// Command-line arguments for one Lighthouse run
pub fn lighthouse_args(
    url: &str,
    port: u16,
    flags: &AuditFlags,
    output_base: &Path,
) -> Vec<String> {
    let mut args = vec![
        url.to_string(),
        format!("--port={port}"),
        "--output=json".to_string(),
        "--output=html".to_string(),
        format!("--output-path={}", output_base.display()),
    ];

    if flags.categories == CategorySelection::PerformanceOnly {
        args.push(format!("--only-categories={}", categories::PERFORMANCE));
    }
    if flags.preset == Preset::Desktop {
        args.push(format!("--preset={}", flags.preset));
    }
    if !flags.verbose {
        args.push("--quiet".to_string());
    }

    args
}

/// The `lighthouse` CLI run as a child process
#[derive(Debug, Clone)]
pub struct LighthouseCli {
    binary: PathBuf,
    timeout: Duration,
}

impl LighthouseCli {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }
}

#[async_trait]
impl AuditEngine for LighthouseCli {
    async fn run(
        &self,
        url: &str,
        port: u16,
        flags: &AuditFlags,
        output_base: &Path,
    ) -> Result<EngineOutput> {
        let args = lighthouse_args(url, port, flags, output_base);
        log::debug!("{} {}", self.binary.display(), args.join(" "));

        let child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                AnalyzerError::Engine(format!(
                    "could not start '{}': {e}",
                    self.binary.display()
                ))
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                AnalyzerError::Engine(format!(
                    "timed out after {} seconds",
                    self.timeout.as_secs()
                ))
            })??;

        let report_json = tokio::fs::read_to_string(output_base.with_extension("report.json"))
            .await
            .ok();
        let html = tokio::fs::read_to_string(output_base.with_extension("report.html"))
            .await
            .ok();

        Ok(EngineOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            report_json,
            html,
        })
    }
}
