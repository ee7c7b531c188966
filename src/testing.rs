//! Fixtures shared by unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::audit::{AnalyzeUrl, AuditOutcome};
use crate::core::{AnalyzerError, Result, ScoreReport};
use crate::ui::Logger;

pub const SAMPLE_REPORT_JSON: &str = r#"{
  "requestedUrl": "https://example.com",
  "finalDisplayedUrl": "https://example.com/",
  "fetchTime": "2024-01-01T00:00:00.000Z",
  "lighthouseVersion": "12.0.0",
  "environment": {
    "networkUserAgent": "Mozilla/5.0 Test Agent",
    "benchmarkIndex": 1000
  },
  "categories": {
    "performance": {
      "title": "Performance",
      "score": 0.85,
      "auditRefs": [
        { "id": "first-contentful-paint" },
        { "id": "largest-contentful-paint" },
        { "id": "unused-javascript" },
        { "id": "render-blocking-resources" },
        { "id": "mainthread-work-breakdown" }
      ]
    },
    "accessibility": { "title": "Accessibility", "score": 0.92 },
    "best-practices": { "title": "Best Practices", "score": 0.88 },
    "seo": { "title": "SEO", "score": 0.95 }
  },
  "audits": {
    "first-contentful-paint": {
      "id": "first-contentful-paint",
      "title": "First Contentful Paint",
      "score": 0.8,
      "numericValue": 1200,
      "displayValue": "1.2 s"
    },
    "speed-index": {
      "id": "speed-index",
      "title": "Speed Index",
      "score": 0.7,
      "numericValue": 2300,
      "displayValue": "2.3 s"
    },
    "largest-contentful-paint": {
      "id": "largest-contentful-paint",
      "title": "Largest Contentful Paint",
      "score": 0.6,
      "numericValue": 2800,
      "displayValue": "2.8 s"
    },
    "interactive": {
      "id": "interactive",
      "title": "Time to Interactive",
      "score": 0.65,
      "numericValue": 3100,
      "displayValue": "3.1 s"
    },
    "total-blocking-time": {
      "id": "total-blocking-time",
      "title": "Total Blocking Time",
      "score": 0.75,
      "numericValue": 150,
      "displayValue": "150 ms"
    },
    "cumulative-layout-shift": {
      "id": "cumulative-layout-shift",
      "title": "Cumulative Layout Shift",
      "score": 0.9,
      "numericValue": 0.05,
      "displayValue": "0.05"
    },
    "unused-javascript": {
      "id": "unused-javascript",
      "title": "Reduce unused JavaScript",
      "description": "Reduce unused JavaScript and defer loading scripts.",
      "score": 0,
      "displayValue": "Potential savings of 120 KiB",
      "details": { "type": "opportunity", "items": [] }
    },
    "render-blocking-resources": {
      "id": "render-blocking-resources",
      "title": "Eliminate render-blocking resources",
      "description": "Resources are blocking the first paint of your page.",
      "score": 0.5,
      "displayValue": "Potential savings of 300 ms",
      "details": { "type": "opportunity", "items": [] }
    },
    "uses-text-compression": {
      "id": "uses-text-compression",
      "title": "Enable text compression",
      "score": 1,
      "details": { "type": "opportunity", "items": [] }
    },
    "mainthread-work-breakdown": {
      "id": "mainthread-work-breakdown",
      "title": "Minimize main-thread work",
      "description": "Consider reducing the time spent parsing JavaScript.",
      "score": 0.3,
      "displayValue": "4.1 s",
      "details": { "type": "diagnostic" }
    },
    "dom-size": {
      "id": "dom-size",
      "title": "Avoids an excessive DOM size",
      "score": null,
      "displayValue": "812 elements",
      "details": { "type": "diagnostic" }
    },
    "bootup-time": {
      "id": "bootup-time",
      "title": "JavaScript execution time",
      "score": 1,
      "details": { "type": "diagnostic" }
    }
  }
}"#;

pub fn sample_report() -> ScoreReport {
    ScoreReport::from_json(SAMPLE_REPORT_JSON).expect("sample report parses")
}

/// Sample report with the performance score and final URL replaced
pub fn report_with_score(url: &str, score: f64) -> ScoreReport {
    let mut report = sample_report();
    report.final_displayed_url = Some(url.to_string());
    if let Some(performance) = report.categories.get_mut("performance") {
        performance.score = Some(score);
    }
    report
}

/// Auditor that answers from a fixed table and records what it was asked.
#[derive(Default)]
pub struct FakeAuditor {
    scores: HashMap<String, f64>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeAuditor {
    pub fn with_score(mut self, url: &str, score: f64) -> Self {
        self.scores.insert(url.to_string(), score);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl AnalyzeUrl for FakeAuditor {
    async fn analyze(&self, url: &str, _logger: &Logger) -> Result<AuditOutcome> {
        self.calls.lock().expect("calls lock").push(url.to_string());
        match self.scores.get(url) {
            Some(score) => Ok(AuditOutcome {
                report: report_with_score(url, *score),
                html_report: format!("<html><body>{url}</body></html>"),
            }),
            None => Err(AnalyzerError::audit(url, "browser crashed")),
        }
    }
}
