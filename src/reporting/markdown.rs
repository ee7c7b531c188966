//! Markdown report for a single URL.
//!
//! The layout is fixed: header, overall score badge, Core Web Vitals,
//! a combined metrics table, category scores, the top opportunities and
//! diagnostics, and a footer describing the engine run.

use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

use crate::core::constants::{categories, markdown as limits, score_bands, tool};
use crate::core::error::{AnalyzerError, Result};
use crate::core::types::{AuditResult, ScoreReport};
use crate::ui::Logger;
use crate::ui::color::{Colors, colorize};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

struct MetricRow {
    name: &'static str,
    audit_id: &'static str,
    description: &'static str,
    good: Option<&'static str>,
}

const CORE_WEB_VITALS: [MetricRow; 3] = [
    MetricRow {
        name: "Largest Contentful Paint (LCP)",
        audit_id: "largest-contentful-paint",
        description: "Measures loading performance",
        good: Some("≤ 2.5s"),
    },
    MetricRow {
        name: "First Input Delay / Total Blocking Time",
        audit_id: "total-blocking-time",
        description: "Measures interactivity",
        good: Some("≤ 200ms"),
    },
    MetricRow {
        name: "Cumulative Layout Shift (CLS)",
        audit_id: "cumulative-layout-shift",
        description: "Measures visual stability",
        good: Some("≤ 0.1"),
    },
];

const OTHER_METRICS: [MetricRow; 3] = [
    MetricRow {
        name: "First Contentful Paint (FCP)",
        audit_id: "first-contentful-paint",
        description: "Time when first text/image is painted",
        good: None,
    },
    MetricRow {
        name: "Speed Index",
        audit_id: "speed-index",
        description: "How quickly content is visually displayed",
        good: None,
    },
    MetricRow {
        name: "Time to Interactive (TTI)",
        audit_id: "interactive",
        description: "Time when page becomes fully interactive",
        good: None,
    },
];

const CATEGORY_ROWS: [(&str, &str, &str); 5] = [
    (categories::PERFORMANCE, "Performance", "⚡"),
    (categories::ACCESSIBILITY, "Accessibility", "♿"),
    (categories::BEST_PRACTICES, "Best Practices", "✅"),
    (categories::SEO, "SEO", "🔍"),
    (categories::PWA, "PWA", "📱"),
];

/// Overall score badge for a category score in [0, 1]; null counts as 0
pub fn score_badge(score: Option<f64>) -> String {
    let percentage = (score.unwrap_or(0.0) * 100.0).round();
    if percentage >= score_bands::EXCELLENT {
        format!("🟢 **{percentage}** (Excellent)")
    } else if percentage >= score_bands::GOOD {
        format!("🟡 **{percentage}** (Good)")
    } else if percentage >= score_bands::NEEDS_IMPROVEMENT {
        format!("🟠 **{percentage}** (Needs Improvement)")
    } else {
        format!("🔴 **{percentage}** (Poor)")
    }
}

/// Traffic light for an audit sub-score in [0, 1]
pub fn metric_badge(score: Option<f64>) -> &'static str {
    match score {
        Some(s) if s >= score_bands::METRIC_GREEN => "🟢",
        Some(s) if s >= score_bands::METRIC_YELLOW => "🟡",
        _ => "🔴",
    }
}

fn score_out_of_100(score: Option<f64>) -> String {
    match score {
        Some(s) => format!("{}/100", (s * 100.0).round()),
        None => "N/A".to_string(),
    }
}

fn display_value(audit: Option<&AuditResult>) -> &str {
    audit
        .and_then(|a| a.display_value.as_deref())
        .unwrap_or("N/A")
}

fn format_fetch_time(fetch_time: &str) -> String {
    DateTime::parse_from_rfc3339(fetch_time)
        .map(|t| t.with_timezone(&Utc).format(DATE_FORMAT).to_string())
        .unwrap_or_else(|_| fetch_time.to_string())
}

fn is_opportunity(audit: &AuditResult) -> bool {
    audit.details_kind() == Some("opportunity") && audit.score.is_none_or(|s| s < 1.0)
}

fn is_diagnostic(audit: &AuditResult) -> bool {
    audit.details_kind() == Some("diagnostic") && audit.score.is_some_and(|s| s < 1.0)
}

/// Render the report. `generated_at` is the run's timestamp so output is
/// stable for a given report.
pub fn render_markdown(report: &ScoreReport, generated_at: DateTime<Utc>) -> String {
    let url = report.resolved_url();
    let attribution = format!("[{}]({}) v{}", tool::NAME, tool::HOMEPAGE, tool::VERSION);
    let mut lines: Vec<String> = Vec::new();

    lines.push("# 🚀 Performance Analysis Report".to_string());
    lines.push(format!("**Analyzed URL:** [{url}]({url})"));
    lines.push(String::new());
    lines.push(format!(
        "**Generated:** {}",
        format_fetch_time(&report.fetch_time)
    ));
    lines.push(String::new());
    lines.push(format!("**Tool:** {attribution}"));
    lines.push(String::new());

    lines.push("## 📊 Overall Performance Score".to_string());
    lines.push(format!(
        "### {}",
        score_badge(Some(report.performance_score()))
    ));
    lines.push(String::new());

    lines.push("## 🎯 Core Web Vitals".to_string());
    lines.push(String::new());
    for vital in &CORE_WEB_VITALS {
        let audit = report.audit(vital.audit_id);
        let score = audit.and_then(|a| a.score);
        lines.push(format!("### {} {}", metric_badge(score), vital.name));
        lines.push(format!("- **Value:** {}", display_value(audit)));
        lines.push(format!("- **Score:** {}", score_out_of_100(score)));
        if let Some(good) = vital.good {
            lines.push(format!("- **Good:** {good}"));
        }
        lines.push(format!("- **Description:** {}", vital.description));
        lines.push(String::new());
    }

    lines.push("## 📈 Detailed Performance Metrics".to_string());
    lines.push(String::new());
    lines.push("| Metric | Value | Score | Status |".to_string());
    lines.push("|--------|-------|-------|---------|".to_string());
    for metric in CORE_WEB_VITALS.iter().chain(OTHER_METRICS.iter()) {
        let audit = report.audit(metric.audit_id);
        let score = audit.and_then(|a| a.score);
        lines.push(format!(
            "| {} | {} | {} | {} |",
            metric.name,
            display_value(audit),
            score_out_of_100(score),
            metric_badge(score)
        ));
    }
    lines.push(String::new());

    lines.push("## 🏆 Lighthouse Category Scores".to_string());
    lines.push(String::new());
    for (key, name, icon) in CATEGORY_ROWS {
        if let Some(category) = report.categories.get(key) {
            lines.push(format!("### {icon} {name}"));
            lines.push(score_badge(category.score));
            lines.push(String::new());
        }
    }

    let audits = report.audits_in_order();

    let opportunities: Vec<_> = audits.iter().filter(|a| is_opportunity(a)).collect();
    if !opportunities.is_empty() {
        lines.push("## 🔧 Performance Opportunities".to_string());
        lines.push(String::new());
        lines.push("These suggestions can help improve your page's performance:".to_string());
        lines.push(String::new());
        for (index, audit) in opportunities.iter().take(limits::MAX_OPPORTUNITIES).enumerate() {
            lines.push(format!("{}. **{}**", index + 1, audit.title));
            if let Some(ref savings) = audit.display_value {
                lines.push(format!("   - Potential savings: {savings}"));
            }
            if let Some(ref description) = audit.description {
                lines.push(format!("   - {description}"));
            }
            lines.push(String::new());
        }
    }

    let diagnostics: Vec<_> = audits.iter().filter(|a| is_diagnostic(a)).collect();
    if !diagnostics.is_empty() {
        lines.push("## 🔍 Diagnostics".to_string());
        lines.push(String::new());
        lines.push("Issues that may affect your page's performance:".to_string());
        lines.push(String::new());
        for (index, audit) in diagnostics.iter().take(limits::MAX_DIAGNOSTICS).enumerate() {
            lines.push(format!(
                "{}. {} **{}**",
                index + 1,
                metric_badge(audit.score),
                audit.title
            ));
            if let Some(ref value) = audit.display_value {
                lines.push(format!("   - Value: {value}"));
            }
            if let Some(ref description) = audit.description {
                lines.push(format!("   - {description}"));
            }
            lines.push(String::new());
        }
    }

    let environment = report.environment.as_ref();
    lines.push("---".to_string());
    lines.push("## 📝 Report Information".to_string());
    lines.push(String::new());
    lines.push(format!(
        "- **Analysis Date:** {}",
        generated_at.format(DATE_FORMAT)
    ));
    lines.push(format!(
        "- **Lighthouse Version:** {}",
        report.lighthouse_version
    ));
    lines.push(format!(
        "- **User Agent:** {}",
        environment
            .and_then(|e| e.network_user_agent.as_deref())
            .unwrap_or("unknown")
    ));
    lines.push(format!(
        "- **Benchmark Index:** {}",
        environment
            .and_then(|e| e.benchmark_index)
            .map_or_else(|| "unknown".to_string(), |b| b.to_string())
    ));
    lines.push(String::new());
    lines.push("### 🎯 Score Ranges".to_string());
    lines.push("- 🟢 **90-100:** Excellent".to_string());
    lines.push("- 🟡 **75-89:** Good".to_string());
    lines.push("- 🟠 **50-74:** Needs Improvement".to_string());
    lines.push("- 🔴 **0-49:** Poor".to_string());
    lines.push(String::new());
    lines.push(format!("*Generated by {attribution}*"));

    lines.join("\n")
}

/// Write the Markdown report to `path`
pub fn export_markdown(
    report: &ScoreReport,
    path: &Path,
    generated_at: DateTime<Utc>,
    logger: &Logger,
) -> Result<()> {
    logger.verbose(&format!(
        "Starting Markdown export for {}",
        report.resolved_url()
    ));
    let content = render_markdown(report, generated_at);
    fs::write(path, &content).map_err(|e| AnalyzerError::export(path.display(), e))?;

    logger.info(&colorize(
        &format!("  └─ 📝 Markdown report saved to {}", path.display()),
        Colors::GRAY,
    ));
    logger.verbose(&format!(
        "Markdown export completed: {} ({} characters)",
        path.display(),
        content.len()
    ));
    Ok(())
}
