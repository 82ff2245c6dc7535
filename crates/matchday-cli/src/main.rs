//! Matchday CLI: download fixtures and match sheets as JSON
//!
//! ## Usage
//!
//! ```bash
//! matchday --save-dir ./out                    # Scrape native-stats.org
//! matchday --scrape-page https://mirror.example --headful -v
//! matchday --layout site.yaml --timeout-ms 10000
//! ```

use clap::{CommandFactory, Parser};
use matchday_cli::{
    home_dir, Cli, CliConfig, CliResult, ColorChoice, ProgressReporter, ScrapeRunner, Verbosity,
};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    if std::env::args_os().len() <= 1 {
        eprintln!("{}", Cli::command().render_help());
        return ExitCode::FAILURE;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Path fallbacks in to_config log warnings
    init_tracing(cli.verbosity(), cli.color_choice());
    let config = cli.to_config(&home_dir());

    let mut reporter =
        ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());
    if config.verbosity.is_verbose() {
        reporter.info(&format!("saving to {}", config.save_dir.display()));
    }
    let timeout_ms = config.timeout_ms;
    match run(config, &mut reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            reporter.finish();
            reporter.failure(&format!("Error: {e}"));
            if e.is_timeout() {
                reporter.warning(&format!(
                    "the page was not ready within {timeout_ms}ms, try a larger --timeout-ms"
                ));
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbosity: Verbosity, color: ColorChoice) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| verbosity.default_filter().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(color.should_color()),
        )
        .try_init();
}

fn run(config: CliConfig, reporter: &mut ProgressReporter) -> CliResult<()> {
    let runner = ScrapeRunner::new(config);
    let rt = tokio::runtime::Runtime::new()?;

    let start = Instant::now();
    let summary = rt.block_on(runner.run(reporter))?;
    reporter.summary(&summary, start.elapsed());
    Ok(())
}
