//! CLI command definitions using clap

use crate::config::{
    default_save_dir, resolve_driver_path, resolve_save_dir, CliConfig, ColorChoice, Verbosity,
    DEFAULT_BROWSER_PATH,
};
use clap::{Parser, ValueEnum};
use matchday::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_PREFIX, DEFAULT_SITE_URL, DEFAULT_WAIT_TIMEOUT_MS};
use std::path::{Path, PathBuf};

/// Download match data from Native Stats.
#[derive(Parser, Debug)]
#[command(name = "matchday")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Site root; its front page lists the matches
    #[arg(long, value_name = "URL", default_value = DEFAULT_SITE_URL)]
    pub scrape_page: String,

    /// Directory the JSON files are written to [default: ~/Downloads/]
    #[arg(long, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,

    /// Chromium or Chrome executable (chromedriver is not accepted)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_BROWSER_PATH)]
    pub driver_dir: PathBuf,

    /// YAML file overriding the site layout
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// How long to wait for a page to become ready
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_WAIT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// How often to check whether a page is ready
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    pub poll_ms: u64,

    /// Show the browser window
    #[arg(long)]
    pub headful: bool,

    /// Disable the Chromium sandbox (containers, CI)
    #[arg(long)]
    pub no_sandbox: bool,

    /// Let the browser download images
    #[arg(long)]
    pub load_images: bool,

    /// User agent sent with every request
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Prefix of the JSON file names
    #[arg(long, value_name = "PREFIX", default_value = DEFAULT_PREFIX)]
    pub file_prefix: String,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorArg,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

impl Cli {
    /// Verbosity from `-q` and `-v`
    #[must_use]
    pub const fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }

    /// Color choice from `--color`
    #[must_use]
    pub fn color_choice(&self) -> ColorChoice {
        self.color.clone().into()
    }

    /// Resolve the arguments into a run configuration.
    ///
    /// Missing directories and executables fall back as documented on
    /// [`resolve_save_dir`] and [`resolve_driver_path`].
    #[must_use]
    pub fn to_config(&self, home: &Path) -> CliConfig {
        let requested_dir = self
            .save_dir
            .clone()
            .unwrap_or_else(|| default_save_dir(home));

        CliConfig::new()
            .with_verbosity(self.verbosity())
            .with_color(self.color_choice())
            .with_site_url(&self.scrape_page)
            .with_save_dir(resolve_save_dir(&requested_dir, home))
            .with_driver_path(resolve_driver_path(&self.driver_dir))
            .with_layout(self.layout.clone())
            .with_wait(self.timeout_ms, self.poll_ms)
            .with_headless(!self.headful)
            .with_sandbox(!self.no_sandbox)
            .with_load_images(self.load_images)
            .with_user_agent(self.user_agent.clone())
            .with_file_prefix(&self.file_prefix)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["matchday", "-v"]).unwrap();
        assert_eq!(cli.scrape_page, "https://native-stats.org");
        assert_eq!(cli.driver_dir, PathBuf::from(DEFAULT_BROWSER_PATH));
        assert_eq!(cli.file_prefix, "native-stats");
        assert!(cli.user_agent.is_none());
        assert!(!cli.load_images);
        assert_eq!(cli.verbosity(), Verbosity::Verbose);
        assert_eq!(cli.timeout_ms, 5000);
        assert_eq!(cli.poll_ms, 500);
        assert!(cli.save_dir.is_none());
        assert!(!cli.headful);
    }

    #[test]
    fn test_to_config_uses_existing_save_dir() {
        let out = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let cli = Cli::try_parse_from([
            "matchday",
            "--scrape-page",
            "https://example.org",
            "--save-dir",
            out.path().to_str().unwrap(),
            "--timeout-ms",
            "1000",
            "--headful",
            "--no-sandbox",
            "-q",
        ])
        .unwrap();

        let config = cli.to_config(home.path());
        assert_eq!(config.site_url, "https://example.org");
        assert_eq!(config.save_dir, out.path());
        assert_eq!(config.timeout_ms, 1000);
        assert!(!config.headless);
        assert!(!config.sandbox);
        assert!(config.verbosity.is_quiet());
    }

    #[test]
    fn test_to_config_falls_back_to_desktop() {
        let home = TempDir::new().unwrap();
        let cli = Cli::try_parse_from(["matchday", "--scrape-page", "https://example.org"]).unwrap();
        let config = cli.to_config(home.path());
        assert_eq!(config.save_dir, home.path().join("Desktop"));
    }

    #[test]
    fn test_to_config_browser_and_output_options() {
        let home = TempDir::new().unwrap();
        let cli = Cli::try_parse_from([
            "matchday",
            "--load-images",
            "--user-agent",
            "Mozilla/5.0 matchday",
            "--file-prefix",
            "ligue1",
            "--color",
            "never",
        ])
        .unwrap();

        assert_eq!(cli.color_choice(), ColorChoice::Never);
        let config = cli.to_config(home.path());
        assert!(config.load_images);
        assert_eq!(config.user_agent.as_deref(), Some("Mozilla/5.0 matchday"));
        assert_eq!(config.file_prefix, "ligue1");
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["matchday", "-q", "-v"]).is_err());
    }
}
