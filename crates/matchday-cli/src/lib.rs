//! Matchday CLI Library
//!
//! Argument parsing, configuration and progress output for the `matchday`
//! binary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use commands::{Cli, ColorArg};
pub use config::{
    default_save_dir, home_dir, is_webdriver_server, resolve_driver_path, resolve_save_dir,
    CliConfig, ColorChoice, Verbosity, DEFAULT_BROWSER_PATH,
};
pub use error::{CliError, CliResult};
pub use output::ProgressReporter;
pub use runner::ScrapeRunner;
