use clap::{CommandFactory, Parser};
use fpa::audit::LighthouseAuditor;
use fpa::config::{AnalysisOptions, load_and_merge_config};
use fpa::core::Verbosity;
use fpa::core::constants::tool;
use fpa::orchestrator::Orchestrator;
use fpa::reporting::logging;
use fpa::ui::{Cli, Commands, Logger, cli_to_config, print_completions};
use fpa::validation::Prober;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(Commands::Completions { shell }) = cli.command {
        let mut app = Cli::command();
        print_completions(shell, &mut app);
        std::process::exit(0);
    }

    let verbose_requested = cli.verbose && !cli.silent;
    match run(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            let logger = Logger::new(if verbose_requested {
                Verbosity::Verbose
            } else {
                Verbosity::Normal
            });
            logger.error_with_chain(&e);
            std::process::exit(1);
        }
    }
}

/// Resolve options, wire up the pipeline and return the exit code
async fn run(cli: &Cli) -> fpa::Result<i32> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;
    let options = AnalysisOptions::resolve(&cli_config, &config)?;

    logging::init_logger(options.verbosity);
    let logger = Logger::new(options.verbosity).with_reserved_stdout(options.json_to_stdout());

    logger.verbose(&format!("Starting {} v{}", tool::NAME, tool::VERSION));
    logger.verbose(&format!(
        "Platform: {} {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    ));
    if let Ok(cwd) = std::env::current_dir() {
        logger.verbose(&format!("Working directory: {}", cwd.display()));
    }
    logging::log_options(&options);

    let prober = Prober::new(&options.probe)?;
    let auditor = LighthouseAuditor::from_settings(&options.audit);
    let started = std::time::Instant::now();

    let summary = Orchestrator::new(&options, &logger, &prober, &auditor)
        .run()
        .await?;

    logging::log_run_complete(summary.total_considered, started.elapsed().as_millis());
    Ok(summary.exit_code())
}
