use crate::core::constants::metrics;
use crate::core::types::ScoreReport;
use crate::ui::Logger;
use crate::ui::color::{Colors, colorize, emphasize, score_color};

/// Shown for a metric the engine did not report
const MISSING_VALUE: &str = "N/A";

/// Score header and the six key metrics, one per line
pub fn render_console(report: &ScoreReport) -> String {
    let mut lines = vec![
        String::new(),
        emphasize(
            &format!("📊 Performance Metrics for {}", report.resolved_url()),
            Colors::GREEN,
        ),
        colorize(
            &format!("Score: {:.0}/100", report.score_percent()),
            Colors::YELLOW,
        ),
        String::new(),
    ];

    for metric in metrics::ALL {
        let audit = report.audit(metric.audit_id);
        let value = audit
            .and_then(|audit| audit.display_value.as_deref())
            .unwrap_or(MISSING_VALUE);
        let color = match audit {
            Some(audit) => score_color(audit.score),
            None => Colors::WHITE,
        };
        lines.push(format!(
            "{}: {}",
            colorize(metric.label, Colors::CYAN),
            colorize(value, color)
        ));
    }

    lines.join("\n")
}

/// Print the console rendering; shown at every verbosity
pub fn print_console(report: &ScoreReport, logger: &Logger) {
    for line in render_console(report).lines() {
        logger.result(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{report_with_score, sample_report};

    #[test]
    fn test_render_console() {
        let rendered = render_console(&sample_report());
        let expected = "\n\
            📊 Performance Metrics for https://example.com/\n\
            Score: 85/100\n\
            \n\
            First Contentful Paint: 1.2 s\n\
            Speed Index: 2.3 s\n\
            Largest Contentful Paint: 2.8 s\n\
            Time to Interactive: 3.1 s\n\
            Total Blocking Time: 150 ms\n\
            Cumulative Layout Shift: 0.05";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_console_is_idempotent() {
        let report = sample_report();
        assert_eq!(render_console(&report), render_console(&report));
    }

    #[test]
    fn test_score_is_rounded_to_whole_points() {
        let rendered = render_console(&report_with_score("https://a.com/", 0.57));
        assert!(rendered.contains("Score: 57/100"));
    }

    #[test]
    fn test_missing_metric_is_shown_as_not_available() {
        let mut report = sample_report();
        report.audits.remove("interactive");
        let rendered = render_console(&report);
        assert!(rendered.contains("Time to Interactive: N/A"));
    }
}
