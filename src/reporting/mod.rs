//! Report rendering and export
//!
//! Console, JSON and Markdown renderings of a `ScoreReport`, the per-URL
//! output file naming, and `env_logger` setup for internal diagnostics.

pub mod console;
pub mod json;
pub mod logging;
pub mod markdown;

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

// Re-export commonly used items
pub use console::{print_console, render_console};
pub use json::{JsonEnvelope, ReportEntry, build_envelope, export_json, render_json};
pub use markdown::{export_markdown, render_markdown};

static SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://").expect("Failed to compile scheme pattern"));

static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("Failed to compile file name pattern"));

/// File name stem for a URL's reports: the first `http(s)://` is dropped
/// and every remaining non-word character becomes `_`.
pub fn derive_file_stem(url: &str) -> String {
    let without_scheme = SCHEME.replacen(url, 1, "");
    NON_WORD.replace_all(&without_scheme, "_").into_owned()
}

/// Per-URL report path in the working directory, e.g. `example_com.md`
pub fn derived_report_path(url: &str, extension: &str) -> PathBuf {
    PathBuf::from(format!("{}.{extension}", derive_file_stem(url)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_file_stem() {
        assert_eq!(derive_file_stem("https://example.com"), "example_com");
        assert_eq!(
            derive_file_stem("http://localhost:8080/a/b?q=1"),
            "localhost_8080_a_b_q_1"
        );
        assert_eq!(derive_file_stem("https://a.com/"), "a_com_");
    }

    #[test]
    fn test_only_first_scheme_is_stripped() {
        assert_eq!(
            derive_file_stem("https://a.com/?next=https://b.com"),
            "a_com__next_https___b_com"
        );
    }

    #[test]
    fn test_derived_report_path() {
        assert_eq!(
            derived_report_path("https://example.com/page", "md"),
            PathBuf::from("example_com_page.md")
        );
        assert_eq!(
            derived_report_path("https://example.com", "html"),
            PathBuf::from("example_com.html")
        );
    }
}
