//! Output formatting and progress reporting

use console::{style, Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use matchday::{MatchDetail, MatchId, MatchStatus, RunObserver, RunSummary};
use std::path::Path;
use std::time::Duration;

/// Progress reporter for a scrape run
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Start a progress bar over the detail pages
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
        self.progress_bar = Some(pb);
    }

    /// Increment progress
    pub fn increment(&self, delta: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(delta);
        }
    }

    /// Update progress message
    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(message.to_string());
        }
    }

    /// Finish progress bar
    pub fn finish(&mut self) {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_and_clear();
        }
    }

    fn line(&self, line: &str) {
        match self.progress_bar {
            Some(ref pb) => pb.println(line),
            None => {
                let _ = self.term.write_line(line);
            }
        }
    }

    fn prefix(&self, symbol: &str, color: Style, plain: &str) -> String {
        if self.use_color {
            color.bold().apply_to(symbol).to_string()
        } else {
            plain.to_string()
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = self.prefix("✓", Style::new().green(), "OK");
        self.line(&format!("{prefix} {message}"));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        let prefix = self.prefix("✗", Style::new().red(), "FAIL");
        self.line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = self.prefix("⚠", Style::new().yellow(), "WARN");
        self.line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = self.prefix("ℹ", Style::new().blue(), "INFO");
        self.line(&format!("{prefix} {message}"));
    }

    /// Print the run summary
    pub fn summary(&self, summary: &RunSummary, duration: Duration) {
        if self.quiet {
            return;
        }

        let _ = self.term.write_line("");
        let secs = duration.as_secs_f64();
        if self.use_color {
            let _ = self.term.write_line(&format!(
                "{} {} matches in {secs:.2}s ({} loaded, {} error pages)",
                style("DONE").green().bold(),
                summary.outlines,
                Style::new().green().apply_to(summary.loaded),
                if summary.errors > 0 {
                    Style::new().yellow().apply_to(summary.errors).to_string()
                } else {
                    summary.errors.to_string()
                },
            ));
        } else {
            let _ = self.term.write_line(&format!(
                "DONE {} matches in {secs:.2}s ({} loaded, {} error pages)",
                summary.outlines, summary.loaded, summary.errors
            ));
        }
    }
}

impl RunObserver for ProgressReporter {
    fn listing_done(&mut self, matches: usize) {
        self.info(&format!("found {matches} matches"));
        self.start_progress(matches as u64, "match sheets");
    }

    fn detail_started(&mut self, _index: usize, id: &MatchId) {
        self.set_message(&format!("match {id}"));
    }

    fn detail_done(&mut self, detail: &MatchDetail) {
        if detail.status == MatchStatus::Error {
            self.warning(&format!("match {} served the error page", detail.id));
        }
        self.increment(1);
    }

    fn saved(&mut self, path: &Path) {
        let complete = self
            .progress_bar
            .as_ref()
            .is_some_and(|pb| pb.length().is_some_and(|len| pb.position() >= len));
        if complete {
            self.finish();
        }
        self.success(&format!("saved {}", path.display()));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    mod progress_reporter_tests {
        use super::*;

        #[test]
        fn test_new_reporter() {
            let reporter = ProgressReporter::new(true, false);
            assert!(reporter.use_color);
            assert!(!reporter.quiet);
        }

        #[test]
        fn test_default_reporter() {
            let reporter = ProgressReporter::default();
            assert!(reporter.use_color);
            assert!(!reporter.quiet);
        }

        #[test]
        fn test_messages_without_progress_bar() {
            let reporter = ProgressReporter::new(false, false);
            reporter.success("saved");
            reporter.failure("timed out");
            reporter.warning("error page");
            reporter.info("found 2 matches");
        }

        #[test]
        fn test_quiet_mode_starts_no_bar() {
            let mut reporter = ProgressReporter::new(false, true);
            reporter.start_progress(10, "match sheets");
            assert!(reporter.progress_bar.is_none());
            reporter.failure("shown");
        }

        #[test]
        fn test_summary() {
            let reporter = ProgressReporter::new(false, false);
            let summary = RunSummary {
                outlines: 3,
                loaded: 2,
                errors: 1,
                outline_path: PathBuf::from("home.json"),
                detail_path: PathBuf::from("match.json"),
            };
            reporter.summary(&summary, Duration::from_secs(4));
        }
    }

    mod observer_tests {
        use super::*;

        #[test]
        fn test_observer_drives_progress_bar() {
            let mut reporter = ProgressReporter::new(false, false);
            reporter.listing_done(2);
            assert_eq!(reporter.progress_bar.as_ref().unwrap().length(), Some(2));

            let id = MatchId::new("1");
            reporter.detail_started(0, &id);
            reporter.detail_done(&MatchDetail::error(id, "https://native-stats.org/matches/1"));
            assert_eq!(reporter.progress_bar.as_ref().unwrap().position(), 1);

            reporter.saved(Path::new("/tmp/native-stats-home_2021-08-06.json"));
            assert!(reporter.progress_bar.is_some());

            let id = MatchId::new("2");
            reporter.detail_started(1, &id);
            reporter.detail_done(&MatchDetail::error(id, "https://native-stats.org/matches/2"));
            reporter.saved(Path::new("/tmp/native-stats-match_2021-08-06.json"));
            assert!(reporter.progress_bar.is_none());
        }
    }
}
