use async_trait::async_trait;
use std::time::Instant;

use crate::audit::engine::{AuditEngine, AuditFlags, LighthouseCli};
use crate::audit::noise::NoiseFilter;
use crate::audit::session::BrowserLauncher;
use crate::config::AuditSettings;
use crate::core::constants::engine;
use crate::core::error::{AnalyzerError, Result};
use crate::core::types::{CategorySelection, Preset, ScoreReport};
use crate::ui::color::{Colors, colorize};
use crate::ui::{AuditSpinner, Logger};

/// A successful audit: the parsed report and the engine's HTML rendering
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub report: ScoreReport,
    pub html_report: String,
}

/// Audits a single URL. Failures come back as `AnalyzerError::Audit`.
#[async_trait]
pub trait AnalyzeUrl: Send + Sync {
    async fn analyze(&self, url: &str, logger: &Logger) -> Result<AuditOutcome>;
}

/// Runs Lighthouse against a fresh browser session per URL
pub struct LighthouseAuditor<E: AuditEngine = LighthouseCli> {
    launcher: BrowserLauncher,
    engine: E,
    categories: CategorySelection,
    preset: Preset,
}

impl LighthouseAuditor<LighthouseCli> {
    pub fn from_settings(settings: &AuditSettings) -> Self {
        Self::new(
            BrowserLauncher::new(
                settings.browser_path.as_deref(),
                settings.browser_start_timeout,
            ),
            LighthouseCli::new(&settings.lighthouse_path, settings.audit_timeout),
            settings.categories,
            settings.preset,
        )
    }
}

impl<E: AuditEngine> LighthouseAuditor<E> {
    pub fn new(
        launcher: BrowserLauncher,
        engine: E,
        categories: CategorySelection,
        preset: Preset,
    ) -> Self {
        Self {
            launcher,
            engine,
            categories,
            preset,
        }
    }

    /// Run the engine against an already running browser on `port`
    async fn run_engine(&self, url: &str, port: u16, logger: &Logger) -> Result<AuditOutcome> {
        let scratch = tempfile::Builder::new().prefix("fpa-audit-").tempdir()?;
        let output_base = scratch.path().join(engine::OUTPUT_BASENAME);
        let flags = AuditFlags {
            categories: self.categories,
            preset: self.preset,
            verbose: logger.is_verbose(),
        };

        logger.verbose("Running Lighthouse analysis...");
        let started = Instant::now();
        let output = self.engine.run(url, port, &flags, &output_base).await?;
        logger.verbose(&format!(
            "Lighthouse analysis completed in {}ms",
            started.elapsed().as_millis()
        ));

        let mut filter = NoiseFilter::new(logger);
        filter.feed_all(&output.stderr);
        let genuine = filter.finish();

        if !output.success {
            let code = output
                .exit_code
                .map_or_else(|| "a signal".to_string(), |c| format!("code {c}"));
            let detail = genuine
                .last()
                .map(|line| format!(": {line}"))
                .unwrap_or_default();
            return Err(AnalyzerError::Engine(format!(
                "lighthouse exited with {code}{detail}"
            )));
        }

        let raw = output
            .report_json
            .ok_or_else(|| AnalyzerError::Engine("no JSON report was written".to_string()))?;
        let html_report = output
            .html
            .ok_or_else(|| AnalyzerError::Engine("no HTML report was written".to_string()))?;
        let report = ScoreReport::from_json(&raw)?;

        logger.verbose(&format!(
            "Performance score: {:.1}",
            report.score_percent()
        ));
        logger.verbose(&format!("Lighthouse version: {}", report.lighthouse_version));

        Ok(AuditOutcome {
            report,
            html_report,
        })
    }
}

#[async_trait]
impl<E: AuditEngine> AnalyzeUrl for LighthouseAuditor<E> {
    async fn analyze(&self, url: &str, logger: &Logger) -> Result<AuditOutcome> {
        logger.verbose(&format!("Starting Lighthouse analysis for: {url}"));
        logger.info(&colorize("  └─ Launching browser...", Colors::GRAY));

        let launch_started = Instant::now();
        let session = self
            .launcher
            .launch(logger)
            .await
            .map_err(|e| AnalyzerError::audit(url, e))?;
        logger.verbose(&format!(
            "Browser launched in {}ms ({})",
            launch_started.elapsed().as_millis(),
            session.endpoint()
        ));

        let spinner = AuditSpinner::start(logger, "Running Lighthouse...");
        let result = self.run_engine(url, session.port(), logger).await;
        spinner.finish();

        let close_started = Instant::now();
        if let Err(e) = session.close().await {
            logger.verbose(&e.to_string());
        }
        logger.verbose(&format!(
            "Browser closed in {}ms",
            close_started.elapsed().as_millis()
        ));

        result.map_err(|e| AnalyzerError::audit(url, e))
    }
}
