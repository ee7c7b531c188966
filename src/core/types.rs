//! Shared value types: run verbosity, engine settings and the score report
//! produced by the audit engine.

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::core::constants::categories;
use crate::core::error::{AnalyzerError, Result};

/// How much the tool prints. Ordered so that `Silent < Normal < Verbose`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    Silent,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    /// Resolve the two CLI switches; both at once is a configuration error.
    pub fn from_flags(verbose: bool, silent: bool) -> Result<Self> {
        match (verbose, silent) {
            (true, true) => Err(AnalyzerError::Config(
                "--verbose and --silent cannot be used together".to_string(),
            )),
            (true, false) => Ok(Verbosity::Verbose),
            (false, true) => Ok(Verbosity::Silent),
            (false, false) => Ok(Verbosity::Normal),
        }
    }
}

/// Which categories the engine is asked to measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySelection {
    #[default]
    PerformanceOnly,
    All,
}

/// Device and network emulation preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    #[default]
    Mobile,
    Desktop,
}

impl Preset {
    pub const ALL: [&'static str; 2] = ["mobile", "desktop"];
}

impl FromStr for Preset {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mobile" => Ok(Preset::Mobile),
            "desktop" => Ok(Preset::Desktop),
            other => Err(AnalyzerError::Config(format!(
                "Invalid preset '{other}'. Expected one of: {}.",
                Preset::ALL.join(", ")
            ))),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Mobile => write!(f, "mobile"),
            Preset::Desktop => write!(f, "desktop"),
        }
    }
}

/// Result of one audit as reported by the engine. Read-only once parsed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    #[serde(default)]
    pub requested_url: Option<String>,
    #[serde(default)]
    pub final_url: Option<String>,
    #[serde(default)]
    pub final_displayed_url: Option<String>,
    #[serde(default)]
    pub fetch_time: String,
    #[serde(default)]
    pub lighthouse_version: String,
    #[serde(default)]
    pub environment: Option<Environment>,
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryResult>,
    #[serde(default)]
    pub audits: BTreeMap<String, AuditResult>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    #[serde(default)]
    pub network_user_agent: Option<String>,
    #[serde(default)]
    pub benchmark_index: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResult {
    #[serde(default)]
    pub title: Option<String>,
    pub score: Option<f64>,
    #[serde(default)]
    pub audit_refs: Vec<AuditRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuditRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub numeric_value: Option<f64>,
    #[serde(default)]
    pub display_value: Option<String>,
    #[serde(default)]
    pub details: Option<AuditDetails>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuditDetails {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl AuditResult {
    /// The `details.type` of this audit, if the engine reported one
    pub fn details_kind(&self) -> Option<&str> {
        self.details.as_ref().and_then(|d| d.kind.as_deref())
    }
}

impl ScoreReport {
    /// Parse the engine's JSON result
    pub fn from_json(raw: &str) -> Result<Self> {
        let report: ScoreReport = serde_json::from_str(raw)?;
        if !report.categories.contains_key(categories::PERFORMANCE) {
            return Err(AnalyzerError::Engine(
                "result has no performance category".to_string(),
            ));
        }
        Ok(report)
    }

    /// The URL the page finally resolved to, falling back to the requested one
    pub fn resolved_url(&self) -> &str {
        self.final_displayed_url
            .as_deref()
            .or(self.final_url.as_deref())
            .or(self.requested_url.as_deref())
            .unwrap_or_default()
    }

    pub fn category_score(&self, key: &str) -> Option<f64> {
        self.categories.get(key).and_then(|c| c.score)
    }

    /// `None` when the category was not run, `Some(None)` when it ran
    /// without producing a score
    pub fn category_entry(&self, key: &str) -> Option<Option<f64>> {
        self.categories.get(key).map(|c| c.score)
    }

    /// Performance score in [0, 1]. A null score (engine error) counts as 0.
    pub fn performance_score(&self) -> f64 {
        self.category_score(categories::PERFORMANCE).unwrap_or(0.0)
    }

    /// Performance score scaled to 0-100
    pub fn score_percent(&self) -> f64 {
        self.performance_score() * 100.0
    }

    pub fn audit(&self, id: &str) -> Option<&AuditResult> {
        self.audits.get(id)
    }

    /// Audits in the engine's performance ordering, then any remaining by id.
    pub fn audits_in_order(&self) -> Vec<&AuditResult> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::with_capacity(self.audits.len());

        if let Some(performance) = self.categories.get(categories::PERFORMANCE) {
            for audit_ref in &performance.audit_refs {
                if let Some(audit) = self.audits.get(&audit_ref.id)
                    && seen.insert(audit_ref.id.as_str())
                {
                    ordered.push(audit);
                }
            }
        }

        for (id, audit) in &self.audits {
            if seen.insert(id.as_str()) {
                ordered.push(audit);
            }
        }

        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{SAMPLE_REPORT_JSON, sample_report};

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, false).unwrap(), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(true, false).unwrap(), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, true).unwrap(), Verbosity::Silent);
        assert!(matches!(
            Verbosity::from_flags(true, true),
            Err(AnalyzerError::Config(_))
        ));
    }

    #[test]
    fn test_verbosity_ordering() {
        assert!(Verbosity::Silent < Verbosity::Normal);
        assert!(Verbosity::Normal < Verbosity::Verbose);
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!("desktop".parse::<Preset>().unwrap(), Preset::Desktop);
        assert_eq!("mobile".parse::<Preset>().unwrap(), Preset::Mobile);
        assert!("tablet".parse::<Preset>().is_err());
        assert_eq!(Preset::Desktop.to_string(), "desktop");
    }

    #[test]
    fn test_parse_sample_report() {
        let report = ScoreReport::from_json(SAMPLE_REPORT_JSON).unwrap();
        assert_eq!(report.resolved_url(), "https://example.com/");
        assert_eq!(report.fetch_time, "2024-01-01T00:00:00.000Z");
        assert_eq!(report.lighthouse_version, "12.0.0");
        assert_eq!(report.performance_score(), 0.85);
        assert_eq!(report.category_score("seo"), Some(0.95));
        assert_eq!(report.category_score("pwa"), None);

        let fcp = report.audit("first-contentful-paint").unwrap();
        assert_eq!(fcp.display_value.as_deref(), Some("1.2 s"));
        assert_eq!(fcp.numeric_value, Some(1200.0));
    }

    #[test]
    fn test_resolved_url_falls_back_to_legacy_field() {
        let report = ScoreReport::from_json(
            r#"{"finalUrl":"https://legacy.example/","categories":{"performance":{"score":0.5}}}"#,
        )
        .unwrap();
        assert_eq!(report.resolved_url(), "https://legacy.example/");
    }

    #[test]
    fn test_null_performance_score_counts_as_zero() {
        let report =
            ScoreReport::from_json(r#"{"categories":{"performance":{"score":null}}}"#).unwrap();
        assert_eq!(report.performance_score(), 0.0);
    }

    #[test]
    fn test_missing_performance_category_is_rejected() {
        let result = ScoreReport::from_json(r#"{"categories":{}}"#);
        assert!(matches!(result, Err(AnalyzerError::Engine(_))));
    }

    #[test]
    fn test_audits_follow_category_ordering() {
        let report = sample_report();
        let ids: Vec<_> = report
            .audits_in_order()
            .iter()
            .map(|a| a.id.as_str())
            .collect();

        // auditRefs put unused-javascript ahead of render-blocking-resources,
        // the reverse of alphabetical order
        let render_blocking = ids.iter().position(|id| *id == "render-blocking-resources");
        let unused_js = ids.iter().position(|id| *id == "unused-javascript");
        assert!(unused_js < render_blocking);
        assert_eq!(ids.len(), report.audits.len());
    }
}
