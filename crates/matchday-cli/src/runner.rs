//! Scrape runner: turns a [`CliConfig`] into one browser-backed run

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;
use matchday::{
    ChromiumSession, JsonSink, RunSummary, ScrapeConfig, SessionConfig, SiteLayout, WaitOptions,
};

/// Runs one scrape from a resolved configuration
#[derive(Debug, Clone)]
pub struct ScrapeRunner {
    config: CliConfig,
}

impl ScrapeRunner {
    /// Create a runner
    #[must_use]
    pub const fn new(config: CliConfig) -> Self {
        Self { config }
    }

    /// Scrape settings: site, wait and layout
    pub fn scrape_config(&self) -> CliResult<ScrapeConfig> {
        if self.config.poll_ms == 0 {
            return Err(CliError::config("--poll-ms must be greater than zero"));
        }
        let layout = match self.config.layout {
            Some(ref path) => SiteLayout::from_yaml_file(path)?,
            None => SiteLayout::default(),
        };
        let wait = WaitOptions::new()
            .with_timeout(self.config.timeout_ms)
            .with_poll_interval(self.config.poll_ms);

        Ok(ScrapeConfig::new(&self.config.site_url)
            .with_wait(wait)
            .with_layout(layout))
    }

    /// Browser settings
    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        let mut session = SessionConfig::new()
            .headless(self.config.headless)
            .disable_images(!self.config.load_images);
        if !self.config.sandbox {
            session = session.no_sandbox();
        }
        if let Some(ref path) = self.config.driver_path {
            session = session.executable_path(path.to_string_lossy());
        }
        if let Some(ref ua) = self.config.user_agent {
            session = session.user_agent(ua);
        }
        session
    }

    /// Where the JSON files go
    #[must_use]
    pub fn sink(&self) -> JsonSink {
        JsonSink::new(&self.config.save_dir).with_prefix(&self.config.file_prefix)
    }

    /// Launch the browser and run both phases
    pub async fn run(&self, reporter: &mut ProgressReporter) -> CliResult<RunSummary> {
        let scrape = self.scrape_config()?;
        let sink = self.sink();

        tracing::info!(
            site = %scrape.site_url,
            save_dir = %sink.dir().display(),
            "starting scrape"
        );
        let mut session = ChromiumSession::launch(self.session_config()).await?;
        Ok(matchday::run(&mut session, &scrape, &sink, reporter).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_scrape_config_defaults() {
        let runner = ScrapeRunner::new(CliConfig::new().with_site_url("https://example.org"));
        let scrape = runner.scrape_config().unwrap();
        assert_eq!(scrape.site_url, "https://example.org");
        assert_eq!(scrape.wait.timeout_ms, 5000);
        assert_eq!(scrape.wait.poll_interval_ms, 500);
        assert_eq!(scrape.layout, SiteLayout::default());
    }

    #[test]
    fn test_scrape_config_reads_layout_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "detail:\n  error_message: \"Oops\"").unwrap();
        let runner = ScrapeRunner::new(
            CliConfig::new().with_layout(Some(file.path().to_path_buf())),
        );
        assert_eq!(runner.scrape_config().unwrap().layout.detail.error_message, "Oops");
    }

    #[test]
    fn test_bad_layout_file_is_error() {
        let runner = ScrapeRunner::new(
            CliConfig::new().with_layout(Some(PathBuf::from("/definitely/not/layout.yaml"))),
        );
        assert!(matches!(runner.scrape_config(), Err(CliError::Scrape(_))));
    }

    #[test]
    fn test_zero_poll_interval_is_rejected() {
        let runner = ScrapeRunner::new(CliConfig::new().with_wait(100, 0));
        assert!(matches!(runner.scrape_config(), Err(CliError::Config { .. })));
    }

    #[test]
    fn test_session_config() {
        let runner = ScrapeRunner::new(
            CliConfig::new()
                .with_headless(false)
                .with_sandbox(false)
                .with_driver_path(Some(PathBuf::from("/usr/bin/chromium"))),
        );
        let session = runner.session_config();
        assert!(!session.headless);
        assert!(!session.sandbox);
        assert!(session.disable_images);
        assert!(session.user_agent.is_none());
        assert_eq!(session.executable_path.as_deref(), Some("/usr/bin/chromium"));
    }

    #[test]
    fn test_session_config_images_and_user_agent() {
        let runner = ScrapeRunner::new(
            CliConfig::new()
                .with_load_images(true)
                .with_user_agent(Some("matchday/1".to_string())),
        );
        let session = runner.session_config();
        assert!(!session.disable_images);
        assert_eq!(session.user_agent.as_deref(), Some("matchday/1"));
    }

    #[test]
    fn test_sink_uses_save_dir_and_prefix() {
        let runner = ScrapeRunner::new(
            CliConfig::new()
                .with_save_dir("/tmp/out")
                .with_file_prefix("bundesliga"),
        );
        let sink = runner.sink();
        assert_eq!(sink.dir(), std::path::Path::new("/tmp/out"));
        let date = chrono::NaiveDate::from_ymd_opt(2021, 8, 14).unwrap();
        assert_eq!(sink.file_name("home", date), "bundesliga-home_2021-08-14.json");
    }
}
