//! Result and error types for Matchday.
//!
//! Only failures that end a run live here. A locator that matches nothing is
//! not an error (see [`crate::Extracted`]), and a site error page is a record
//! status (see [`crate::MatchStatus`]).

use thiserror::Error;

/// Result type for Matchday operations
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Errors that can occur while scraping
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page error
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// In-page script evaluation failed
    #[error("Script evaluation failed: {message}")]
    Script {
        /// Error message
        message: String,
    },

    /// Explicit wait expired
    #[error("Timed out after {ms}ms waiting for {waited_for}")]
    Timeout {
        /// What the wait was polling for
        waited_for: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Site layout could not be loaded
    #[error("Invalid site layout: {message}")]
    Layout {
        /// Error message
        message: String,
    },

    /// Browser support compiled out
    #[error("Browser feature not enabled. Rebuild with --features browser")]
    BrowserUnavailable,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    /// Create a page error
    #[must_use]
    pub fn page(message: impl Into<String>) -> Self {
        Self::Page {
            message: message.into(),
        }
    }

    /// Create a script error
    #[must_use]
    pub fn script(message: impl Into<String>) -> Self {
        Self::Script {
            message: message.into(),
        }
    }

    /// Create a layout error
    #[must_use]
    pub fn layout(message: impl Into<String>) -> Self {
        Self::Layout {
            message: message.into(),
        }
    }

    /// Whether this is an expired explicit wait
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message() {
        let err = ScrapeError::Timeout {
            waited_for: "//div[@class='container']".to_string(),
            ms: 5000,
        };
        assert!(err.is_timeout());
        assert_eq!(
            err.to_string(),
            "Timed out after 5000ms waiting for //div[@class='container']"
        );
    }

    #[test]
    fn test_navigation_message() {
        let err = ScrapeError::Navigation {
            url: "https://native-stats.org".to_string(),
            message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
        };
        assert!(!err.is_timeout());
        assert!(err.to_string().contains("https://native-stats.org"));
    }

    #[test]
    fn test_helpers() {
        assert!(ScrapeError::page("gone").to_string().contains("Page error"));
        assert!(ScrapeError::script("bad").to_string().contains("Script"));
        assert!(ScrapeError::layout("x").to_string().contains("layout"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ScrapeError = io_err.into();
        assert!(err.to_string().contains("I/O"));
    }
}
