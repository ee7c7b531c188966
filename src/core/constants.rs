/// Application-wide constants to avoid magic values throughout the codebase.
///
/// Tool identity used in reports and attribution lines.
pub mod tool {
    /// Tool name written into JSON envelopes and Markdown attributions
    pub const NAME: &str = env!("CARGO_PKG_NAME");
    /// Tool version written into JSON envelopes and Markdown attributions
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    /// Project homepage linked from Markdown reports
    pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
}

/// Timeout and duration constants
pub mod timeouts {
    /// Accessibility probe timeout in seconds
    pub const PROBE_TIMEOUT_SECONDS: u64 = 10;
    /// Default time budget for a single audit in seconds
    pub const DEFAULT_AUDIT_TIMEOUT_SECONDS: u64 = 300;
    /// Default time to wait for the browser debugging endpoint in seconds
    pub const DEFAULT_BROWSER_START_TIMEOUT_SECONDS: u64 = 30;
    /// Upper bound accepted for any configured timeout (1 hour)
    pub const MAX_TIMEOUT_SECONDS: u64 = 3600;
}

/// HTTP constants for the accessibility probe
pub mod http {
    /// Responses at or above this status are treated as inaccessible
    pub const FIRST_ERROR_STATUS: u16 = 400;
    /// Maximum redirects followed when redirect following is enabled
    pub const MAX_REDIRECTS: usize = 10;
}

/// Input file handling
pub mod input {
    /// Extension that switches the collector to JSON parsing
    pub const JSON_EXTENSION: &str = "json";
    /// Extension for newline-delimited URL lists
    pub const TEXT_EXTENSION: &str = "txt";
    /// Name of the config file searched for in the working directory and parents
    pub const CONFIG_FILE_NAME: &str = ".fpa.toml";
}

/// Browser launch settings
pub mod browser {
    /// Flags passed to every transient browser session
    pub const LAUNCH_ARGS: [&str; 7] = [
        "--headless=new",
        "--no-sandbox",
        "--disable-setuid-sandbox",
        "--disable-dev-shm-usage",
        "--no-first-run",
        "--no-default-browser-check",
        "--remote-debugging-port=0",
    ];
    /// Marker the browser prints on stderr once the debugging endpoint is up
    pub const DEVTOOLS_MARKER: &str = "DevTools listening on ";
    /// Binary names tried on PATH when no browser path is configured
    pub const CANDIDATE_BINARIES: [&str; 5] = [
        "google-chrome",
        "google-chrome-stable",
        "chromium",
        "chromium-browser",
        "chrome",
    ];
    /// Environment variable that overrides browser discovery
    pub const PATH_ENV: &str = "CHROME_PATH";
}

/// Audit engine settings
pub mod engine {
    /// Default engine executable
    pub const DEFAULT_BINARY: &str = "lighthouse";
    /// Base name for the engine's report files inside the scratch directory
    pub const OUTPUT_BASENAME: &str = "lighthouse";
    /// Known internal engine warnings that are not actionable for users
    pub const NOISE_PATTERNS: [&str; 2] = ["LanternError", "Invalid dependency graph"];
    /// Prefix of the engine's own status log lines
    pub const STATUS_PREFIX: &str = "LH:";
}

/// Performance metrics reported by every formatter, in display order
pub mod metrics {
    /// One metric: engine audit id, console label, JSON key
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MetricSpec {
        pub audit_id: &'static str,
        pub label: &'static str,
        pub json_key: &'static str,
    }

    pub const FIRST_CONTENTFUL_PAINT: MetricSpec = MetricSpec {
        audit_id: "first-contentful-paint",
        label: "First Contentful Paint",
        json_key: "firstContentfulPaint",
    };
    pub const SPEED_INDEX: MetricSpec = MetricSpec {
        audit_id: "speed-index",
        label: "Speed Index",
        json_key: "speedIndex",
    };
    pub const LARGEST_CONTENTFUL_PAINT: MetricSpec = MetricSpec {
        audit_id: "largest-contentful-paint",
        label: "Largest Contentful Paint",
        json_key: "largestContentfulPaint",
    };
    pub const TIME_TO_INTERACTIVE: MetricSpec = MetricSpec {
        audit_id: "interactive",
        label: "Time to Interactive",
        json_key: "timeToInteractive",
    };
    pub const TOTAL_BLOCKING_TIME: MetricSpec = MetricSpec {
        audit_id: "total-blocking-time",
        label: "Total Blocking Time",
        json_key: "totalBlockingTime",
    };
    pub const CUMULATIVE_LAYOUT_SHIFT: MetricSpec = MetricSpec {
        audit_id: "cumulative-layout-shift",
        label: "Cumulative Layout Shift",
        json_key: "cumulativeLayoutShift",
    };

    pub const ALL: [MetricSpec; 6] = [
        FIRST_CONTENTFUL_PAINT,
        SPEED_INDEX,
        LARGEST_CONTENTFUL_PAINT,
        TIME_TO_INTERACTIVE,
        TOTAL_BLOCKING_TIME,
        CUMULATIVE_LAYOUT_SHIFT,
    ];
}

/// Category keys as they appear in engine results
pub mod categories {
    pub const PERFORMANCE: &str = "performance";
    pub const ACCESSIBILITY: &str = "accessibility";
    pub const BEST_PRACTICES: &str = "best-practices";
    pub const SEO: &str = "seo";
    pub const PWA: &str = "pwa";
}

/// Score bands shared by the console and Markdown renderers
pub mod score_bands {
    /// Percentage at or above which a score is "Excellent"
    pub const EXCELLENT: f64 = 90.0;
    /// Percentage at or above which a score is "Good"
    pub const GOOD: f64 = 75.0;
    /// Percentage at or above which a score "Needs Improvement"
    pub const NEEDS_IMPROVEMENT: f64 = 50.0;
    /// Audit sub-score at or above which a metric is green
    pub const METRIC_GREEN: f64 = 0.9;
    /// Audit sub-score at or above which a metric is yellow
    pub const METRIC_YELLOW: f64 = 0.5;
}

/// Limits on the Markdown advice sections
pub mod markdown {
    pub const MAX_OPPORTUNITIES: usize = 5;
    pub const MAX_DIAGNOSTICS: usize = 3;
}

/// Display and formatting constants
pub mod display {
    pub const SUCCESS_EMOJI: &str = "✅";
    pub const WARNING_EMOJI: &str = "⚠️ ";
    pub const ERROR_EMOJI: &str = "❌";
    pub const VERBOSE_PREFIX: &str = "[VERBOSE]";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_identity() {
        assert_eq!(tool::NAME, "frontend-performance-analyzer");
        assert!(!tool::VERSION.is_empty());
    }

    #[test]
    fn test_probe_timeout_is_ten_seconds() {
        assert_eq!(timeouts::PROBE_TIMEOUT_SECONDS, 10);
    }

    #[test]
    fn test_metric_order_and_keys() {
        let labels: Vec<_> = metrics::ALL.iter().map(|m| m.label).collect();
        assert_eq!(
            labels,
            vec![
                "First Contentful Paint",
                "Speed Index",
                "Largest Contentful Paint",
                "Time to Interactive",
                "Total Blocking Time",
                "Cumulative Layout Shift",
            ]
        );
        assert_eq!(metrics::TIME_TO_INTERACTIVE.audit_id, "interactive");
        assert_eq!(metrics::TIME_TO_INTERACTIVE.json_key, "timeToInteractive");
    }

    #[test]
    fn test_launch_args_request_debugging_port() {
        assert!(
            browser::LAUNCH_ARGS
                .iter()
                .any(|arg| arg.starts_with("--remote-debugging-port"))
        );
    }
}
