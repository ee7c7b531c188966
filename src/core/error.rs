use std::fmt;

/// Error types for the analysis pipeline
#[derive(Debug)]
pub enum AnalyzerError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error (bad flags, bad config file values)
    Config(String),

    /// URL source missing or unreadable
    Input(String),

    /// One or more URLs failed format validation, or none were left
    Validation {
        message: String,
        invalid: Vec<String>,
    },

    /// Every URL failed the accessibility probe
    NoAccessibleUrls,

    /// Browser session could not be started or controlled
    Browser(String),

    /// Audit engine could not be run or produced unusable output
    Engine(String),

    /// Audit of a single URL failed
    Audit { url: String, message: String },

    /// A report could not be written
    Export { path: String, message: String },

    /// HTTP client error
    Http(reqwest::Error),

    /// JSON parsing error
    Json(serde_json::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),
}

impl AnalyzerError {
    /// Wrap any lower-level failure as the audit failure of `url`
    pub fn audit(url: &str, cause: impl fmt::Display) -> Self {
        AnalyzerError::Audit {
            url: url.to_string(),
            message: cause.to_string(),
        }
    }

    pub fn export(path: impl fmt::Display, cause: impl fmt::Display) -> Self {
        AnalyzerError::Export {
            path: path.to_string(),
            message: cause.to_string(),
        }
    }
}

impl fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzerError::Io(err) => write!(f, "IO error: {err}"),
            AnalyzerError::Config(msg) => write!(f, "Configuration error: {msg}"),
            AnalyzerError::Input(msg) => write!(f, "Input error: {msg}"),
            AnalyzerError::Validation { message, invalid } => {
                if invalid.is_empty() {
                    write!(f, "Validation error: {message}")
                } else {
                    write!(f, "Validation error: {message}: {}", invalid.join(", "))
                }
            }
            AnalyzerError::NoAccessibleUrls => write!(f, "No accessible URLs found"),
            AnalyzerError::Browser(msg) => write!(f, "Browser error: {msg}"),
            AnalyzerError::Engine(msg) => write!(f, "Audit engine error: {msg}"),
            AnalyzerError::Audit { url, message } => {
                write!(f, "Analysis failed for {url}: {message}")
            }
            AnalyzerError::Export { path, message } => {
                write!(f, "Could not write report '{path}': {message}")
            }
            AnalyzerError::Http(err) => write!(f, "HTTP error: {err}"),
            AnalyzerError::Json(err) => write!(f, "JSON error: {err}"),
            AnalyzerError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
        }
    }
}

impl std::error::Error for AnalyzerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalyzerError::Io(err) => Some(err),
            AnalyzerError::Http(err) => Some(err),
            AnalyzerError::Json(err) => Some(err),
            AnalyzerError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AnalyzerError {
    fn from(err: std::io::Error) -> Self {
        AnalyzerError::Io(err)
    }
}

impl From<reqwest::Error> for AnalyzerError {
    fn from(err: reqwest::Error) -> Self {
        AnalyzerError::Http(err)
    }
}

impl From<serde_json::Error> for AnalyzerError {
    fn from(err: serde_json::Error) -> Self {
        AnalyzerError::Json(err)
    }
}

impl From<toml::de::Error> for AnalyzerError {
    fn from(err: toml::de::Error) -> Self {
        AnalyzerError::TomlParsing(err)
    }
}

/// Type alias for Results using AnalyzerError
pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let config_error = AnalyzerError::Config("Threshold must be between 0 and 100".to_string());
        assert_eq!(
            format!("{config_error}"),
            "Configuration error: Threshold must be between 0 and 100"
        );

        let audit_error = AnalyzerError::audit("https://a.com", "browser crashed");
        assert_eq!(
            format!("{audit_error}"),
            "Analysis failed for https://a.com: browser crashed"
        );
    }

    #[test]
    fn test_validation_display_lists_every_invalid_entry() {
        let error = AnalyzerError::Validation {
            message: "Invalid URL format".to_string(),
            invalid: vec!["ftp://b.com".to_string(), "nope".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Validation error: Invalid URL format: ftp://b.com, nope"
        );
        assert!(!error.to_string().contains('\n'));
    }

    #[test]
    fn test_audit_and_export_constructors() {
        assert_eq!(
            AnalyzerError::audit("https://a.com", "boom").to_string(),
            "Analysis failed for https://a.com: boom"
        );
        assert_eq!(
            AnalyzerError::export("out.md", "denied").to_string(),
            "Could not write report 'out.md': denied"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = AnalyzerError::from(io_error);

        assert!(matches!(error, AnalyzerError::Io(_)));
        let source = error.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("file not found"));
    }

    #[test]
    fn test_error_from_json_and_toml() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(
            AnalyzerError::from(json_error),
            AnalyzerError::Json(_)
        ));

        let toml_error = toml::from_str::<toml::Value>("invalid toml [").unwrap_err();
        let converted = AnalyzerError::from(toml_error);
        assert!(matches!(converted, AnalyzerError::TomlParsing(_)));
        assert!(converted.source().is_some());
    }

    #[test]
    fn test_string_variants_have_no_source() {
        let errors = vec![
            AnalyzerError::Config("c".to_string()),
            AnalyzerError::Input("i".to_string()),
            AnalyzerError::Browser("b".to_string()),
            AnalyzerError::Engine("e".to_string()),
            AnalyzerError::NoAccessibleUrls,
        ];

        for error in errors {
            assert!(error.source().is_none());
            assert!(!format!("{error}").is_empty());
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnalyzerError>();
    }
}
