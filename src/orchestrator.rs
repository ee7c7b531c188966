//! Batch analysis pipeline.
//!
//! The `Orchestrator` walks a run through its stages: collect the URLs,
//! validate them, probe them, audit every accessible URL in order, then
//! summarize. Failures in the first three stages end the run; a failed
//! audit is recorded and the batch moves on to the next URL.

use chrono::{DateTime, Utc};
use std::cell::Cell;
use std::fs;
use std::time::{Duration, Instant};

use crate::audit::AnalyzeUrl;
use crate::config::AnalysisOptions;
use crate::core::error::{AnalyzerError, Result};
use crate::core::types::ScoreReport;
use crate::discovery::collect_urls;
use crate::reporting::{
    ReportEntry, derived_report_path, export_json, export_markdown, print_console,
};
use crate::ui::Logger;
use crate::ui::color::{Colors, colorize, emphasize};
use crate::validation::{Prober, validate_urls};

/// Where a run currently is. Stages only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunStage {
    Collecting,
    Validating,
    Probing,
    Analyzing,
    Summarizing,
    Done,
}

/// Counters for one run, final once the run reaches `Done`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub success_count: usize,
    pub failure_count: usize,
    /// URLs that passed the accessibility probe
    pub total_considered: usize,
    pub skipped_inaccessible: usize,
    pub threshold_violations: usize,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failure_count == 0 && self.threshold_violations == 0
    }

    /// 0 for a clean run, 1 after any audit failure or threshold violation.
    /// Skipped URLs alone do not fail a run.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }
}

/// One successfully audited URL, kept for the batch JSON export
#[derive(Debug, Clone)]
pub struct AnalyzedUrl {
    pub url: String,
    pub report: ScoreReport,
    pub html_report: String,
}

pub struct Orchestrator<'a> {
    options: &'a AnalysisOptions,
    logger: &'a Logger,
    prober: &'a Prober,
    auditor: &'a dyn AnalyzeUrl,
    run_started_at: DateTime<Utc>,
    stage: Cell<RunStage>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        options: &'a AnalysisOptions,
        logger: &'a Logger,
        prober: &'a Prober,
        auditor: &'a dyn AnalyzeUrl,
    ) -> Self {
        Self {
            options,
            logger,
            prober,
            auditor,
            run_started_at: Utc::now(),
            stage: Cell::new(RunStage::Collecting),
        }
    }

    /// Override the timestamp stamped into JSON and Markdown reports
    pub fn with_run_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.run_started_at = timestamp;
        self
    }

    pub fn stage(&self) -> RunStage {
        self.stage.get()
    }

    fn enter(&self, stage: RunStage) {
        log::debug!("stage {:?} -> {:?}", self.stage.get(), stage);
        self.stage.set(stage);
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        let logger = self.logger;

        self.enter(RunStage::Collecting);
        let raw = collect_urls(
            &self.options.urls,
            self.options.input_file.as_deref(),
            logger,
        )?;

        self.enter(RunStage::Validating);
        let urls = validate_urls(raw)?;
        logger.verbose(&format!(
            "URL validation completed: {} valid URLs",
            urls.len()
        ));

        self.enter(RunStage::Probing);
        let probe = self.prober.probe_all(&urls, logger).await?;

        self.enter(RunStage::Analyzing);
        logger.info(&emphasize("🚀 Starting Lighthouse analysis...", Colors::BLUE));
        logger.blank();

        let mut summary = RunSummary {
            total_considered: probe.accessible.len(),
            skipped_inaccessible: probe.inaccessible.len(),
            ..RunSummary::default()
        };
        let mut batch = Vec::with_capacity(probe.accessible.len());

        let total = probe.accessible.len();
        for (index, url) in probe.accessible.iter().enumerate() {
            match self.analyze_one(index, total, url).await {
                Ok(analyzed) => {
                    summary.success_count += 1;
                    if self.violates_threshold(&analyzed.report) {
                        summary.threshold_violations += 1;
                    }
                    batch.push(analyzed);
                }
                Err(err) => {
                    logger.error(&colorize(&format!("Failed: {err}"), Colors::RED));
                    logger.verbose(&format!("Error details: {err:?}"));
                    summary.failure_count += 1;
                }
            }

            if index + 1 < total {
                logger.blank();
            }
        }

        self.enter(RunStage::Summarizing);
        if total > 1 {
            self.export_batch_json(&batch);
        }
        self.print_summary(&summary, started.elapsed());

        self.enter(RunStage::Done);
        Ok(summary)
    }

    /// Audit one URL and write its per-URL reports
    async fn analyze_one(&self, index: usize, total: usize, url: &str) -> Result<AnalyzedUrl> {
        let logger = self.logger;
        let started = Instant::now();

        logger.info(&colorize(
            &format!("[{}/{}] 🔍 Analyzing {url}...", index + 1, total),
            Colors::BLUE,
        ));
        logger.verbose(&format!(
            "Starting analysis {}/{} at {}",
            index + 1,
            total,
            Utc::now().to_rfc3339()
        ));

        let outcome = self.auditor.analyze(url, logger).await.inspect_err(|_| {
            logger.verbose(&format!(
                "Analysis failed for {url} after {}ms",
                started.elapsed().as_millis()
            ));
        })?;

        logger.info(&colorize("  └─ Analysis complete!", Colors::GRAY));
        logger.verbose(&format!(
            "Total analysis time for {url}: {}ms",
            started.elapsed().as_millis()
        ));

        if self.options.shows_console() {
            print_console(&outcome.report, logger);
        }

        if let Some(ref output) = self.options.output_html_path {
            let path = if total == 1 {
                output.clone()
            } else {
                derived_report_path(url, "html")
            };
            logger.verbose(&format!("Saving HTML report to: {}", path.display()));
            match fs::write(&path, &outcome.html_report) {
                Ok(()) => logger.info(&colorize(
                    &format!("  └─ HTML report saved to {}", path.display()),
                    Colors::GRAY,
                )),
                Err(e) => self.report_export_error(AnalyzerError::export(path.display(), e)),
            }
        }

        if self.options.emit_markdown {
            let path = derived_report_path(url, "md");
            if let Err(e) = export_markdown(&outcome.report, &path, self.run_started_at, logger) {
                self.report_export_error(e);
            }
        }

        if total == 1 {
            self.export_json_targets(&[ReportEntry {
                url,
                report: &outcome.report,
            }]);
        }

        Ok(AnalyzedUrl {
            url: url.to_string(),
            report: outcome.report,
            html_report: outcome.html_report,
        })
    }

    /// Warn when a score is strictly below the threshold
    fn violates_threshold(&self, report: &ScoreReport) -> bool {
        let Some(threshold) = self.options.threshold_score else {
            return false;
        };

        let actual = report.score_percent();
        self.logger.verbose(&format!(
            "Comparing score {actual:.1} against threshold {threshold}"
        ));
        if actual < threshold {
            self.logger
                .warn(&colorize(&threshold_warning(actual, threshold), Colors::RED));
            return true;
        }
        false
    }

    fn export_batch_json(&self, batch: &[AnalyzedUrl]) {
        if !self.options.wants_json() {
            return;
        }

        let entries: Vec<ReportEntry<'_>> = batch
            .iter()
            .map(|analyzed| ReportEntry {
                url: &analyzed.url,
                report: &analyzed.report,
            })
            .collect();
        self.export_json_targets(&entries);
    }

    /// Stdout and the JSON file are separate sinks; a failure in one
    /// does not skip the other
    fn export_json_targets(&self, entries: &[ReportEntry<'_>]) {
        for target in self.options.json_targets() {
            match target {
                Some(path) => self
                    .logger
                    .verbose(&format!("Performing JSON export to file: {}", path.display())),
                None => self.logger.verbose("Performing JSON export to stdout"),
            }

            if let Err(e) = export_json(entries, target, self.run_started_at, self.logger) {
                self.report_export_error(e);
            }
        }
    }

    fn report_export_error(&self, err: AnalyzerError) {
        self.logger.error(&colorize(&err.to_string(), Colors::RED));
    }

    fn print_summary(&self, summary: &RunSummary, elapsed: Duration) {
        let logger = self.logger;

        logger.blank();
        logger.info(&emphasize("📋 Analysis Summary:", Colors::BLUE));
        logger.info(&format!(
            "{} {}",
            colorize("✅ Successful:", Colors::GREEN),
            summary.success_count
        ));
        if summary.failure_count > 0 {
            logger.info(&format!(
                "{} {}",
                colorize("❌ Failed:", Colors::RED),
                summary.failure_count
            ));
        }
        logger.info(&format!(
            "{} {}",
            colorize("📊 Total analyzed:", Colors::BLUE),
            summary.total_considered
        ));
        if summary.skipped_inaccessible > 0 {
            logger.info(&format!(
                "{} {}",
                colorize("⚠️  Skipped (inaccessible):", Colors::YELLOW),
                summary.skipped_inaccessible
            ));
        }

        let seconds = elapsed.as_secs_f64();
        logger.verbose(&format!("Analysis completed at {}", Utc::now().to_rfc3339()));
        if seconds > 0.0 {
            logger.verbose(&format!(
                "Performance: {:.2} URLs/sec",
                summary.total_considered as f64 / seconds
            ));
        }
        logger.verbose(&format!("Total execution time: {}ms", elapsed.as_millis()));
    }
}

fn threshold_warning(actual: f64, threshold: f64) -> String {
    format!("Score {actual:.1} is below threshold of {threshold}")
}
