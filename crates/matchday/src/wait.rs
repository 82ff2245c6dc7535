//! Wait Mechanisms
//!
//! Explicit waits are the only suspension point of a run: poll a condition at
//! a fixed interval until it holds or the deadline passes. An expired wait is
//! fatal ([`ScrapeError::Timeout`]); nothing here retries.

use crate::driver::PageSession;
use crate::locator::Locator;
use crate::result::{ScrapeError, ScrapeResult};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for page readiness (5 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval (500ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// =============================================================================
// WAIT RESULT
// =============================================================================

/// Result of a successful wait
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// Time spent waiting
    pub elapsed: Duration,
    /// Description of what was waited for
    pub waited_for: String,
}

impl WaitResult {
    /// Create a wait result
    #[must_use]
    pub fn new(elapsed: Duration, waited_for: impl Into<String>) -> Self {
        Self {
            elapsed,
            waited_for: waited_for.into(),
        }
    }
}

// =============================================================================
// WAITS
// =============================================================================

/// Block until an element matching `locator` is present.
///
/// The condition is checked once immediately, then once per poll interval.
/// The last check happens no later than the deadline.
pub async fn wait_for_selector<S>(
    session: &S,
    locator: &Locator,
    options: &WaitOptions,
) -> ScrapeResult<WaitResult>
where
    S: PageSession + ?Sized,
{
    let start = Instant::now();
    let timeout = options.timeout();
    let poll_interval = options.poll_interval().max(Duration::from_millis(1));

    loop {
        if session.resolve_one(locator).await?.is_some() {
            let result = WaitResult::new(start.elapsed(), locator.as_str());
            tracing::debug!(
                locator = %locator,
                elapsed_ms = result.elapsed.as_millis() as u64,
                "page ready"
            );
            return Ok(result);
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            break;
        }
        tokio::time::sleep(poll_interval.min(timeout - elapsed)).await;
    }

    tracing::warn!(
        url = session.current_url(),
        locator = %locator,
        timeout_ms = options.timeout_ms,
        "page never became ready"
    );
    Err(ScrapeError::Timeout {
        waited_for: locator.to_string(),
        ms: options.timeout_ms,
    })
}

// =============================================================================
// TESTS
// =============================================================================
