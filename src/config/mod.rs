//! Configuration management
//!
//! This module handles loading settings from TOML files, merging them with
//! CLI arguments, and resolving the immutable `AnalysisOptions` a run uses.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{engine, input, timeouts};
use crate::core::error::{AnalyzerError, Result};
use crate::core::types::{CategorySelection, Preset, Verbosity};

/// Settings that may come from a `.fpa.toml` file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Chrome or Chromium binary used for audit sessions
    pub browser_path: Option<String>,

    /// Audit engine executable
    pub lighthouse_path: Option<String>,

    /// Measure every category instead of performance only
    pub all_categories: Option<bool>,

    /// Emulation preset (mobile, desktop)
    pub preset: Option<String>,

    /// Follow redirects during the accessibility probe
    pub follow_redirects: Option<bool>,

    /// Time budget for one audit in seconds
    pub audit_timeout: Option<u64>,

    /// Time to wait for the browser's debugging endpoint in seconds
    pub browser_start_timeout: Option<u64>,

    /// User-Agent header for probe requests
    pub user_agent: Option<String>,

    /// Minimum acceptable performance score (0-100)
    pub threshold: Option<f64>,
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AnalyzerError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            AnalyzerError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Look for a config file in the working directory and up to three parents.
    ///
    /// A file that exists but fails to load is an error; no file at all
    /// yields the defaults.
    pub fn load_from_standard_locations() -> Result<Self> {
        for depth in 0..=3 {
            let path = PathBuf::from(format!(
                "{}{}",
                "../".repeat(depth),
                input::CONFIG_FILE_NAME
            ));
            if path.is_file() {
                log::debug!("Loading config from {}", path.display());
                return Self::load_from_file(&path);
            }
        }
        Ok(Self::default())
    }

    /// Merge CLI arguments over this config (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(ref browser_path) = cli_config.browser_path {
            self.browser_path = Some(browser_path.clone());
        }
        if let Some(ref lighthouse_path) = cli_config.lighthouse_path {
            self.lighthouse_path = Some(lighthouse_path.clone());
        }
        if cli_config.all_categories {
            self.all_categories = Some(true);
        }
        if let Some(ref preset) = cli_config.preset {
            self.preset = Some(preset.clone());
        }
        if cli_config.no_follow_redirects {
            self.follow_redirects = Some(false);
        }
        if let Some(threshold) = cli_config.threshold {
            self.threshold = Some(threshold);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("Audit timeout", self.audit_timeout),
            ("Browser start timeout", self.browser_start_timeout),
        ] {
            if let Some(seconds) = value {
                if seconds == 0 {
                    return Err(AnalyzerError::Config(format!(
                        "{name} cannot be 0. Expected a positive integer representing seconds."
                    )));
                }
                if seconds > timeouts::MAX_TIMEOUT_SECONDS {
                    return Err(AnalyzerError::Config(format!(
                        "{name} of {seconds} seconds is larger than the {} second limit.",
                        timeouts::MAX_TIMEOUT_SECONDS
                    )));
                }
            }
        }

        if let Some(ref preset) = self.preset {
            preset.parse::<Preset>()?;
        }

        if let Some(threshold) = self.threshold {
            validate_threshold(threshold)?;
        }

        Ok(())
    }

    pub fn audit_timeout_duration(&self) -> Duration {
        Duration::from_secs(
            self.audit_timeout
                .unwrap_or(timeouts::DEFAULT_AUDIT_TIMEOUT_SECONDS),
        )
    }

    pub fn browser_start_timeout_duration(&self) -> Duration {
        Duration::from_secs(
            self.browser_start_timeout
                .unwrap_or(timeouts::DEFAULT_BROWSER_START_TIMEOUT_SECONDS),
        )
    }
}

/// Threshold must be a number in [0, 100]
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if threshold.is_nan() || !(0.0..=100.0).contains(&threshold) {
        return Err(AnalyzerError::Config(
            "Threshold must be a number between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

/// Configuration options that can come from CLI
#[derive(Debug, Default, Clone)]
pub struct CliConfig {
    pub urls: Vec<String>,
    pub input_file: Option<String>,
    pub output_html_path: Option<String>,
    pub emit_json: bool,
    pub json_file_path: Option<String>,
    pub emit_markdown: bool,
    pub threshold: Option<f64>,
    pub verbose: bool,
    pub silent: bool,
    pub all_categories: bool,
    pub preset: Option<String>,
    pub no_follow_redirects: bool,
    pub browser_path: Option<String>,
    pub lighthouse_path: Option<String>,
    pub config_file: Option<String>,
    pub no_config: bool,
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file)?
    } else {
        Config::load_from_standard_locations()?
    };

    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// How each URL is audited
#[derive(Debug, Clone, PartialEq)]
pub struct AuditSettings {
    pub browser_path: Option<PathBuf>,
    pub lighthouse_path: PathBuf,
    pub categories: CategorySelection,
    pub preset: Preset,
    pub audit_timeout: Duration,
    pub browser_start_timeout: Duration,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            browser_path: None,
            lighthouse_path: PathBuf::from(engine::DEFAULT_BINARY),
            categories: CategorySelection::default(),
            preset: Preset::default(),
            audit_timeout: Duration::from_secs(timeouts::DEFAULT_AUDIT_TIMEOUT_SECONDS),
            browser_start_timeout: Duration::from_secs(
                timeouts::DEFAULT_BROWSER_START_TIMEOUT_SECONDS,
            ),
        }
    }
}

/// How the accessibility probe talks to each URL
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeSettings {
    pub timeout: Duration,
    pub follow_redirects: bool,
    pub user_agent: Option<String>,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(timeouts::PROBE_TIMEOUT_SECONDS),
            follow_redirects: true,
            user_agent: None,
        }
    }
}

/// Everything a run needs, resolved once at startup and never mutated
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisOptions {
    pub urls: Vec<String>,
    pub input_file: Option<PathBuf>,
    pub output_html_path: Option<PathBuf>,
    pub emit_json: bool,
    pub json_file_path: Option<PathBuf>,
    pub emit_markdown: bool,
    pub threshold_score: Option<f64>,
    pub verbosity: Verbosity,
    pub audit: AuditSettings,
    pub probe: ProbeSettings,
}

impl AnalysisOptions {
    /// Combine CLI flags with the merged config, checking cross-field rules
    pub fn resolve(cli_config: &CliConfig, config: &Config) -> Result<Self> {
        let verbosity = Verbosity::from_flags(cli_config.verbose, cli_config.silent)?;

        if cli_config.urls.is_empty() && cli_config.input_file.is_none() {
            return Err(AnalyzerError::Input(
                "Please provide URLs using --url or --input".to_string(),
            ));
        }

        let threshold_score = config.threshold;
        if let Some(threshold) = threshold_score {
            validate_threshold(threshold)?;
        }

        let preset = match config.preset {
            Some(ref preset) => preset.parse()?,
            None => Preset::default(),
        };

        let categories = if config.all_categories.unwrap_or(false) {
            CategorySelection::All
        } else {
            CategorySelection::PerformanceOnly
        };

        Ok(Self {
            urls: cli_config.urls.clone(),
            input_file: cli_config.input_file.as_ref().map(PathBuf::from),
            output_html_path: cli_config.output_html_path.as_ref().map(PathBuf::from),
            emit_json: cli_config.emit_json,
            json_file_path: cli_config.json_file_path.as_ref().map(PathBuf::from),
            emit_markdown: cli_config.emit_markdown,
            threshold_score,
            verbosity,
            audit: AuditSettings {
                browser_path: config.browser_path.as_ref().map(PathBuf::from),
                lighthouse_path: config
                    .lighthouse_path
                    .as_ref()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(engine::DEFAULT_BINARY)),
                categories,
                preset,
                audit_timeout: config.audit_timeout_duration(),
                browser_start_timeout: config.browser_start_timeout_duration(),
            },
            probe: ProbeSettings {
                follow_redirects: config.follow_redirects.unwrap_or(true),
                user_agent: config.user_agent.clone(),
                ..ProbeSettings::default()
            },
        })
    }

    /// JSON goes to stdout and nothing else may share it
    pub fn json_to_stdout(&self) -> bool {
        self.emit_json && self.json_file_path.is_none()
    }

    /// Console metrics are printed unless stdout is reserved for JSON
    pub fn shows_console(&self) -> bool {
        !self.emit_json || self.json_file_path.is_some()
    }

    pub fn wants_json(&self) -> bool {
        self.emit_json || self.json_file_path.is_some()
    }

    /// Every place a JSON envelope goes; `None` is stdout
    pub fn json_targets(&self) -> Vec<Option<&Path>> {
        let mut targets = Vec::with_capacity(2);
        if self.emit_json {
            targets.push(None);
        }
        if let Some(ref path) = self.json_file_path {
            targets.push(Some(path.as_path()));
        }
        targets
    }
}
