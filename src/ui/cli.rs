// Command-line interface definitions and parsing for frontend-performance-analyzer

use crate::config::CliConfig;
use crate::core::types::Preset;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "frontend-performance-analyzer",
    author,
    version,
    about = "Analyze frontend performance of a given URL",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // Input
    /// One or more URLs to analyze
    #[arg(short = 'u', long = "url", value_name = "URL", num_args = 1.., help_heading = "Input")]
    pub url: Vec<String>,

    /// Load URLs from a .txt or .json file
    #[arg(long, value_name = "FILE", help_heading = "Input")]
    pub input: Option<String>,

    // Reports
    /// Save HTML report to file
    #[arg(short = 'o', long, value_name = "FILE", help_heading = "Reports")]
    pub output: Option<String>,

    /// Print the JSON report to stdout
    #[arg(long, help_heading = "Reports")]
    pub json: bool,

    /// Save the JSON report to file
    #[arg(long = "json-file", value_name = "FILE", help_heading = "Reports")]
    pub json_file: Option<String>,

    /// Save metrics as Markdown report
    #[arg(long, help_heading = "Reports")]
    pub markdown: bool,

    /// Minimum acceptable performance score (0-100)
    #[arg(long, value_name = "SCORE", help_heading = "Reports")]
    pub threshold: Option<f64>,

    // Audit
    /// Measure every category instead of performance only
    #[arg(long, help_heading = "Audit")]
    pub all_categories: bool,

    /// Device and network emulation preset
    #[arg(long, value_name = "PRESET", value_parser = Preset::ALL, help_heading = "Audit")]
    pub preset: Option<String>,

    /// Treat redirects as the probe's final answer instead of following them
    #[arg(long, help_heading = "Audit")]
    pub no_follow_redirects: bool,

    /// Path to a Chrome or Chromium binary
    #[arg(long, value_name = "PATH", help_heading = "Audit")]
    pub browser_path: Option<String>,

    /// Path to the lighthouse executable
    #[arg(long, value_name = "PATH", help_heading = "Audit")]
    pub lighthouse_path: Option<String>,

    // Output & Verbosity
    /// Enable verbose output with debugging details
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Minimal output (errors and final results only)
    #[arg(short = 's', long, help_heading = "Output & Verbosity")]
    pub silent: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print shell completions to stdout
    #[command(name = "completions", arg_required_else_help = true)]
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Convert the parsed CLI into the config overlay merged over file settings
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        urls: cli.url.clone(),
        input_file: cli.input.clone(),
        output_html_path: cli.output.clone(),
        emit_json: cli.json,
        json_file_path: cli.json_file.clone(),
        emit_markdown: cli.markdown,
        threshold: cli.threshold,
        verbose: cli.verbose,
        silent: cli.silent,
        all_categories: cli.all_categories,
        preset: cli.preset.clone(),
        no_follow_redirects: cli.no_follow_redirects,
        browser_path: cli.browser_path.clone(),
        lighthouse_path: cli.lighthouse_path.clone(),
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}
