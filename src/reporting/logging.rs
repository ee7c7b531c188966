use log::{debug, info};

use crate::config::AnalysisOptions;
use crate::core::Verbosity;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbosity: Verbosity) {
    let level = match verbosity {
        Verbosity::Verbose => log::LevelFilter::Debug,
        // Structured logs are only shown in verbose mode
        Verbosity::Normal | Verbosity::Silent => log::LevelFilter::Off,
    };

    let initialized = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    if initialized.is_ok() {
        debug!("Logger initialized with level: {level:?}");
    }
}

/// Log the resolved options of a run
pub fn log_options(options: &AnalysisOptions) {
    info!(
        "Options: urls={}, input={:?}, threshold={:?}, verbosity={:?}",
        options.urls.len(),
        options.input_file,
        options.threshold_score,
        options.verbosity
    );
    info!(
        "Reports: html={:?}, json={}, json_file={:?}, markdown={}",
        options.output_html_path,
        options.emit_json,
        options.json_file_path,
        options.emit_markdown
    );
    info!(
        "Audit: categories={:?}, preset={}, audit_timeout={}s, browser_start_timeout={}s",
        options.audit.categories,
        options.audit.preset,
        options.audit.audit_timeout.as_secs(),
        options.audit.browser_start_timeout.as_secs()
    );
    info!(
        "Probe: timeout={}s, follow_redirects={}",
        options.probe.timeout.as_secs(),
        options.probe.follow_redirects
    );
}

/// Log run completion with throughput
pub fn log_run_complete(analyzed: usize, duration_ms: u128) {
    info!("Analyzed {analyzed} URL(s) in {duration_ms}ms");
}
