use url::Url;

use crate::core::error::{AnalyzerError, Result};

/// A URL is valid when it parses as absolute `http`/`https` with a host
pub fn is_valid_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

/// Reject the whole batch if any entry is malformed.
///
/// Invalid format is fatal rather than filtered: every offending entry is
/// reported in the error so the user can fix the list in one pass.
pub fn validate_urls(raw: Vec<String>) -> Result<Vec<String>> {
    let (valid, invalid): (Vec<String>, Vec<String>) =
        raw.into_iter().partition(|url| is_valid_url(url));

    if !invalid.is_empty() {
        return Err(AnalyzerError::Validation {
            message: "Invalid URL format".to_string(),
            invalid,
        });
    }

    if valid.is_empty() {
        return Err(AnalyzerError::Validation {
            message: "No valid URLs found".to_string(),
            invalid: Vec::new(),
        });
    }

    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://a.com"));
        assert!(is_valid_url("http://localhost:8080/path?q=1"));
        assert!(is_valid_url("HTTPS://EXAMPLE.COM"));

        assert!(!is_valid_url("ftp://b.com"));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("mailto:someone@example.com"));
        assert!(!is_valid_url("file:///etc/hosts"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_validate_urls_lists_invalid_entries() {
        let result = validate_urls(strings(&["https://a.com", "ftp://b.com"]));
        match result {
            Err(AnalyzerError::Validation { invalid, .. }) => {
                assert_eq!(invalid, vec!["ftp://b.com"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_urls_keeps_order_and_duplicates() {
        let urls = strings(&["https://b.com", "https://a.com", "https://b.com"]);
        assert_eq!(validate_urls(urls.clone()).unwrap(), urls);
    }

    #[test]
    fn test_validate_urls_rejects_empty_list() {
        let result = validate_urls(Vec::new());
        assert!(matches!(
            result,
            Err(AnalyzerError::Validation { ref invalid, .. }) if invalid.is_empty()
        ));
    }
}
