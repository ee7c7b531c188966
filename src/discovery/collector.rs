use std::fs;
use std::path::Path;

use crate::core::constants::input;
use crate::core::error::{AnalyzerError, Result};
use crate::ui::Logger;

/// Check that an input file exists and has a supported extension
pub fn check_input_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(AnalyzerError::Input(format!(
            "Input file not found: {}",
            path.display()
        )));
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(input::JSON_EXTENSION) | Some(input::TEXT_EXTENSION) => Ok(()),
        _ => Err(AnalyzerError::Input(format!(
            "Unsupported input file '{}'. Use a .{} or .{} file.",
            path.display(),
            input::TEXT_EXTENSION,
            input::JSON_EXTENSION
        ))),
    }
}

/// Gather raw URLs, in source order and without deduplication.
///
/// An input file wins over explicit URLs. `.json` files hold either a single
/// string or an array of strings; anything else is read one URL per line.
pub fn collect_urls(
    urls: &[String],
    input_file: Option<&Path>,
    logger: &Logger,
) -> Result<Vec<String>> {
    let Some(path) = input_file else {
        if urls.is_empty() {
            return Err(AnalyzerError::Input(
                "Please provide URLs using --url or --input".to_string(),
            ));
        }
        return Ok(urls.to_vec());
    };

    check_input_file(path)?;
    let content = fs::read_to_string(path).map_err(|e| {
        AnalyzerError::Input(format!("Could not read '{}': {}", path.display(), e))
    })?;

    let is_json = path.extension().and_then(|ext| ext.to_str()) == Some(input::JSON_EXTENSION);
    let collected = if is_json {
        parse_json_list(&content, path)?
    } else {
        parse_text_list(&content)
    };

    logger.verbose(&format!(
        "Loaded {} URL(s) from {}",
        collected.len(),
        path.display()
    ));
    Ok(collected)
}

fn parse_text_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn parse_json_list(content: &str, path: &Path) -> Result<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(content).map_err(|e| {
        AnalyzerError::Input(format!("Invalid JSON in '{}': {}", path.display(), e))
    })?;

    match value {
        serde_json::Value::String(url) => Ok(vec![url]),
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(url) => Ok(url),
                other => Err(AnalyzerError::Input(format!(
                    "Expected only strings in '{}', found {}",
                    path.display(),
                    other
                ))),
            })
            .collect(),
        _ => Err(AnalyzerError::Input(format!(
            "Expected a URL string or an array of URL strings in '{}'",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_explicit_urls_pass_through_verbatim() {
        let urls = vec![
            "https://b.com".to_string(),
            "https://a.com".to_string(),
            "https://b.com".to_string(),
        ];
        let collected = collect_urls(&urls, None, &Logger::default()).unwrap();
        assert_eq!(collected, urls);
    }

    #[test]
    fn test_no_source_is_an_input_error() {
        let result = collect_urls(&[], None, &Logger::default());
        assert!(matches!(result, Err(AnalyzerError::Input(_))));
    }

    #[test]
    fn test_text_file_drops_blank_lines() {
        let file = temp_file(".txt", "https://a.com\n\nhttps://b.com\n");
        let collected = collect_urls(&[], Some(file.path()), &Logger::default()).unwrap();
        assert_eq!(collected, vec!["https://a.com", "https://b.com"]);
    }

    #[test]
    fn test_text_file_trims_whitespace() {
        let file = temp_file(".txt", "  https://a.com  \r\n\t\n   \nhttps://b.com");
        let collected = collect_urls(&[], Some(file.path()), &Logger::default()).unwrap();
        assert_eq!(collected, vec!["https://a.com", "https://b.com"]);
    }

    #[test]
    fn test_json_bare_string() {
        let file = temp_file(".json", r#""https://a.com""#);
        let collected = collect_urls(&[], Some(file.path()), &Logger::default()).unwrap();
        assert_eq!(collected, vec!["https://a.com"]);
    }

    #[test]
    fn test_json_array_keeps_order() {
        let file = temp_file(".json", r#"["https://a.com", "https://b.com"]"#);
        let collected = collect_urls(&[], Some(file.path()), &Logger::default()).unwrap();
        assert_eq!(collected, vec!["https://a.com", "https://b.com"]);
    }

    #[test]
    fn test_input_file_wins_over_explicit_urls() {
        let file = temp_file(".txt", "https://from-file.com\n");
        let urls = vec!["https://from-flag.com".to_string()];
        let collected = collect_urls(&urls, Some(file.path()), &Logger::default()).unwrap();
        assert_eq!(collected, vec!["https://from-file.com"]);
    }

    #[test]
    fn test_invalid_json_is_an_input_error() {
        let file = temp_file(".json", "[\"https://a.com\",");
        let result = collect_urls(&[], Some(file.path()), &Logger::default());
        assert!(matches!(result, Err(AnalyzerError::Input(_))));
    }

    #[test]
    fn test_json_with_wrong_shape_is_an_input_error() {
        let object = temp_file(".json", r#"{"url": "https://a.com"}"#);
        assert!(collect_urls(&[], Some(object.path()), &Logger::default()).is_err());

        let numbers = temp_file(".json", "[1, 2]");
        assert!(collect_urls(&[], Some(numbers.path()), &Logger::default()).is_err());
    }

    #[test]
    fn test_check_input_file() {
        let txt = temp_file(".txt", "");
        assert!(check_input_file(txt.path()).is_ok());

        let csv = temp_file(".csv", "https://a.com");
        assert!(matches!(
            check_input_file(csv.path()),
            Err(AnalyzerError::Input(_))
        ));

        assert!(check_input_file(Path::new("/nonexistent/urls.txt")).is_err());
    }
}
