//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Scrape run failed
    #[error("Scrape failed: {0}")]
    Scrape(#[from] matchday::ScrapeError),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the run stopped on an expired page wait
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Scrape(e) if e.is_timeout())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use matchday::ScrapeError;

    #[test]
    fn test_config_error() {
        let err = CliError::config("bad layout");
        assert!(err.to_string().contains("Configuration"));
        assert!(err.to_string().contains("bad layout"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }

    #[test]
    fn test_timeout_from_scrape() {
        let err: CliError = ScrapeError::Timeout {
            waited_for: "//div".to_string(),
            ms: 5000,
        }
        .into();
        assert!(err.is_timeout());
        assert!(err.to_string().contains("5000ms"));
        assert!(!CliError::config("x").is_timeout());
    }
}
