use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::core::constants::{categories, metrics, tool};
use crate::core::error::{AnalyzerError, Result};
use crate::core::types::ScoreReport;
use crate::ui::Logger;
use crate::ui::color::{Colors, colorize};

/// One analyzed URL as handed to the JSON exporter
#[derive(Debug, Clone, Copy)]
pub struct ReportEntry<'a> {
    pub url: &'a str,
    pub report: &'a ScoreReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonEnvelope {
    pub timestamp: String,
    pub tool: String,
    pub version: String,
    pub results: Vec<JsonResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonResult {
    pub url: String,
    pub timestamp: String,
    pub performance: JsonPerformance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonPerformance {
    pub score: f64,
    pub metrics: JsonMetrics,
    pub categories: JsonCategories,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonMetrics {
    pub first_contentful_paint: JsonMetric,
    pub speed_index: JsonMetric,
    pub largest_contentful_paint: JsonMetric,
    pub time_to_interactive: JsonMetric,
    pub total_blocking_time: JsonMetric,
    pub cumulative_layout_shift: JsonMetric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonMetric {
    pub value: Option<f64>,
    pub display_value: Option<String>,
    pub score: Option<f64>,
}

/// Category scores in [0, 1]. A category the engine did not run is
/// omitted; one it ran without a score is `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonCategories {
    pub performance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_practices: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pwa: Option<Option<f64>>,
}

fn metric(report: &ScoreReport, spec: metrics::MetricSpec) -> JsonMetric {
    match report.audit(spec.audit_id) {
        Some(audit) => JsonMetric {
            value: audit.numeric_value,
            display_value: audit.display_value.clone(),
            score: audit.score,
        },
        None => JsonMetric {
            value: None,
            display_value: None,
            score: None,
        },
    }
}

impl JsonResult {
    pub fn from_report(url: &str, report: &ScoreReport) -> Self {
        let resolved = report.resolved_url();
        Self {
            url: if resolved.is_empty() { url } else { resolved }.to_string(),
            timestamp: report.fetch_time.clone(),
            performance: JsonPerformance {
                score: report.score_percent(),
                metrics: JsonMetrics {
                    first_contentful_paint: metric(report, metrics::FIRST_CONTENTFUL_PAINT),
                    speed_index: metric(report, metrics::SPEED_INDEX),
                    largest_contentful_paint: metric(report, metrics::LARGEST_CONTENTFUL_PAINT),
                    time_to_interactive: metric(report, metrics::TIME_TO_INTERACTIVE),
                    total_blocking_time: metric(report, metrics::TOTAL_BLOCKING_TIME),
                    cumulative_layout_shift: metric(report, metrics::CUMULATIVE_LAYOUT_SHIFT),
                },
                categories: JsonCategories {
                    performance: report.category_score(categories::PERFORMANCE),
                    accessibility: report.category_entry(categories::ACCESSIBILITY),
                    best_practices: report.category_entry(categories::BEST_PRACTICES),
                    seo: report.category_entry(categories::SEO),
                    pwa: report.category_entry(categories::PWA),
                },
            },
        }
    }
}

/// Wrap results in the envelope stamped with the run's start time
pub fn build_envelope(entries: &[ReportEntry<'_>], run_timestamp: DateTime<Utc>) -> JsonEnvelope {
    JsonEnvelope {
        timestamp: run_timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        tool: tool::NAME.to_string(),
        version: tool::VERSION.to_string(),
        results: entries
            .iter()
            .map(|entry| JsonResult::from_report(entry.url, entry.report))
            .collect(),
    }
}

/// Pretty-printed with two-space indentation
pub fn render_json(envelope: &JsonEnvelope) -> Result<String> {
    Ok(serde_json::to_string_pretty(envelope)?)
}

/// Write the envelope to `path`, or to stdout when no path is given
pub fn export_json(
    entries: &[ReportEntry<'_>],
    path: Option<&Path>,
    run_timestamp: DateTime<Utc>,
    logger: &Logger,
) -> Result<JsonEnvelope> {
    logger.verbose(&format!(
        "Processing {} result(s) for JSON export",
        entries.len()
    ));
    let envelope = build_envelope(entries, run_timestamp);
    let rendered = render_json(&envelope)?;
    logger.verbose(&format!(
        "Generated JSON output ({} characters)",
        rendered.len()
    ));

    match path {
        Some(path) => {
            fs::write(path, &rendered).map_err(|e| AnalyzerError::export(path.display(), e))?;
            logger.info(&colorize(
                &format!("  └─ JSON report saved to {}", path.display()),
                Colors::GRAY,
            ));
        }
        None => {
            let mut out = std::io::stdout().lock();
            writeln!(out, "{rendered}").map_err(|e| AnalyzerError::export("stdout", e))?;
        }
    }

    Ok(envelope)
}
