//! Matchday: browser-driven football match scraper
//!
//! Reads the fixtures listing of a football statistics site, visits the
//! detail page of every match on it, and writes both collections as JSON.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    MATCHDAY Architecture                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ scrape     │    │ extract    │    │ PageSession│            │
//! │   │ listing +  │───►│ field /    │───►│ chromium   │            │
//! │   │ detail     │    │ table      │    │ or mock    │            │
//! │   └─────┬──────┘    └────────────┘    └────────────┘            │
//! │         ▼                                                        │
//! │   ┌────────────┐                                                 │
//! │   │ JsonSink   │  {prefix}-home_{date}.json                      │
//! │   │            │  {prefix}-match_{date}.json                     │
//! │   └────────────┘                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A locator that matches nothing never fails a run: the field is written as
//! the sentinel `"null"` and a table as `["null"]`. Only an expired page wait
//! or a backend failure ends a run.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

#[allow(clippy::missing_errors_doc)]
mod browser;
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod driver;
#[allow(clippy::missing_errors_doc)]
mod extract;
mod layout;
mod locator;
mod record;
mod result;
#[allow(clippy::missing_errors_doc)]
pub mod scrape;
#[allow(clippy::missing_errors_doc)]
mod sink;
#[allow(clippy::missing_errors_doc)]
mod wait;

pub use browser::{ChromiumSession, HANDLER_SHUTDOWN_GRACE, IMAGES_DISABLED_ARG};
pub use driver::{ElementHandle, MockPage, MockSession, PageSession, SessionConfig};
pub use extract::{
    extract_attributes, extract_field, extract_table, Extracted, FieldRow, FieldSchema, Table,
    TableOptions, TableRow, DEFAULT_SCHEMA, DEFAULT_TABLE_SKIP_WORD, SENTINEL,
};
pub use layout::{DetailLayout, ListingLayout, SiteLayout, DEFAULT_ERROR_MESSAGE, ID_PLACEHOLDER};
pub use locator::{xpath_literal, Locator, CELL_TAG, ROW_TAG};
pub use record::{
    detail_url, Fixture, MatchDetail, MatchId, MatchOutline, MatchSheet, MatchStatus, Schedule,
    Statistics, TeamSheet,
};
pub use result::{ScrapeError, ScrapeResult};
pub use scrape::{
    listing_ids, run, scrape_detail, scrape_listing, RunObserver, RunSummary, ScrapeConfig,
    SilentObserver, DEFAULT_SITE_URL,
};
pub use sink::{JsonSink, DEFAULT_PREFIX, DETAIL_KIND, OUTLINE_KIND};
pub use wait::{
    wait_for_selector, WaitOptions, WaitResult, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_WAIT_TIMEOUT_MS,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::driver::*;
    pub use super::extract::*;
    pub use super::locator::*;
    pub use super::record::*;
    pub use super::result::*;
    pub use super::scrape::*;
    pub use super::sink::*;
    pub use super::wait::*;
    pub use super::ChromiumSession;
}
