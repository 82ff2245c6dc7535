//! Two-phase scrape orchestration.
//!
//! ```text
//! listing page ──► outlines ──► {prefix}-home_{date}.json
//!                     │ ids
//!                     ▼
//! detail pages ──► details  ──► {prefix}-match_{date}.json
//! ```
//!
//! Both phases share one [`PageSession`]. [`run`] closes it before returning,
//! whether the run succeeded or not.

mod detail;
mod listing;

pub use detail::scrape_detail;
pub use listing::{listing_ids, scrape_listing};

use crate::driver::PageSession;
use crate::layout::SiteLayout;
use crate::record::{MatchDetail, MatchId, MatchOutline, MatchStatus};
use crate::result::ScrapeResult;
use crate::sink::{JsonSink, DETAIL_KIND, OUTLINE_KIND};
use crate::wait::WaitOptions;
use std::path::{Path, PathBuf};

/// Default site root
pub const DEFAULT_SITE_URL: &str = "https://native-stats.org";

/// What to scrape and how patiently
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Site root; also the listing page
    pub site_url: String,
    /// Page readiness wait
    pub wait: WaitOptions,
    /// Site markup
    pub layout: SiteLayout,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
            wait: WaitOptions::default(),
            layout: SiteLayout::default(),
        }
    }
}

impl ScrapeConfig {
    /// Config for a site root with default wait and layout
    #[must_use]
    pub fn new(site_url: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into(),
            ..Self::default()
        }
    }

    /// Set the readiness wait
    #[must_use]
    pub const fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Set the site layout
    #[must_use]
    pub fn with_layout(mut self, layout: SiteLayout) -> Self {
        self.layout = layout;
        self
    }
}

/// Progress callbacks for a run. Every method defaults to doing nothing.
#[allow(unused_variables)]
pub trait RunObserver {
    /// The listing phase produced `matches` outlines
    fn listing_done(&mut self, matches: usize) {}

    /// A detail page is about to be visited
    fn detail_started(&mut self, index: usize, id: &MatchId) {}

    /// A detail page was read
    fn detail_done(&mut self, detail: &MatchDetail) {}

    /// A collection was written
    fn saved(&mut self, path: &Path) {}
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl RunObserver for SilentObserver {}

/// What a completed run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Outlines written
    pub outlines: usize,
    /// Detail records with status `loaded`
    pub loaded: usize,
    /// Detail records with status `error`
    pub errors: usize,
    /// Outline file
    pub outline_path: PathBuf,
    /// Detail file
    pub detail_path: PathBuf,
}

/// Run both phases, persist both collections, then close the session.
///
/// The outline file is written before the detail phase starts, so a timeout
/// on a detail page leaves it in place and writes no detail file.
///
/// # Errors
///
/// The first fatal error of either phase or of persistence. A failure to
/// close the session is reported only when the run itself succeeded.
pub async fn run<S, O>(
    session: &mut S,
    config: &ScrapeConfig,
    sink: &JsonSink,
    observer: &mut O,
) -> ScrapeResult<RunSummary>
where
    S: PageSession + ?Sized,
    O: RunObserver + ?Sized,
{
    let outcome = run_phases(&mut *session, config, sink, observer).await;
    let closed = session.close().await;

    match (outcome, closed) {
        (Ok(summary), Ok(())) => Ok(summary),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), close) => {
            if let Err(close_err) = close {
                tracing::warn!(error = %close_err, "failed to close session after error");
            }
            Err(e)
        }
    }
}

async fn run_phases<S, O>(
    session: &mut S,
    config: &ScrapeConfig,
    sink: &JsonSink,
    observer: &mut O,
) -> ScrapeResult<RunSummary>
where
    S: PageSession + ?Sized,
    O: RunObserver + ?Sized,
{
    let outlines = scrape_listing(&mut *session, config).await?;
    observer.listing_done(outlines.len());
    let outline_path = sink.write(OUTLINE_KIND, &outlines)?;
    observer.saved(&outline_path);

    let details = scrape_details(&mut *session, config, &outlines, observer).await?;
    let detail_path = sink.write(DETAIL_KIND, &details)?;
    observer.saved(&detail_path);

    let loaded = details
        .iter()
        .filter(|d| d.status == MatchStatus::Loaded)
        .count();
    let summary = RunSummary {
        outlines: outlines.len(),
        loaded,
        errors: details.len() - loaded,
        outline_path,
        detail_path,
    };
    tracing::info!(
        outlines = summary.outlines,
        loaded = summary.loaded,
        errors = summary.errors,
        "run complete"
    );
    Ok(summary)
}

async fn scrape_details<S, O>(
    session: &mut S,
    config: &ScrapeConfig,
    outlines: &[MatchOutline],
    observer: &mut O,
) -> ScrapeResult<Vec<MatchDetail>>
where
    S: PageSession + ?Sized,
    O: RunObserver + ?Sized,
{
    let ids = listing_ids(outlines);
    let mut details = Vec::with_capacity(ids.len());
    for (index, id) in ids.iter().enumerate() {
        observer.detail_started(index, id);
        let detail = scrape_detail(&mut *session, config, id).await?;
        observer.detail_done(&detail);
        details.push(detail);
    }
    Ok(details)
}
