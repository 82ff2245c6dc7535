//! JSON persistence for record collections.
//!
//! One file per collection per run, named `{prefix}-{kind}_{YYYY-MM-DD}.json`
//! after the local date. Output is compact UTF-8 JSON; non-ASCII text (team
//! and player names) is written as-is, not escaped.

use crate::result::ScrapeResult;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default file name prefix
pub const DEFAULT_PREFIX: &str = "native-stats";

/// Kind of the listing-phase collection
pub const OUTLINE_KIND: &str = "home";

/// Kind of the detail-phase collection
pub const DETAIL_KIND: &str = "match";

/// Writes record collections into one directory
#[derive(Debug, Clone)]
pub struct JsonSink {
    dir: PathBuf,
    prefix: String,
}

impl JsonSink {
    /// Sink writing into `dir` with the default prefix
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    /// Set the file name prefix
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Output directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a collection kind on a date
    #[must_use]
    pub fn file_name(&self, kind: &str, date: NaiveDate) -> String {
        format!("{}-{kind}_{}.json", self.prefix, date.format("%Y-%m-%d"))
    }

    /// Write a collection stamped with today's local date
    pub fn write<T: Serialize>(&self, kind: &str, records: &[T]) -> ScrapeResult<PathBuf> {
        self.write_dated(kind, Local::now().date_naive(), records)
    }

    /// Write a collection stamped with `date`
    pub fn write_dated<T: Serialize>(
        &self,
        kind: &str,
        date: NaiveDate,
        records: &[T],
    ) -> ScrapeResult<PathBuf> {
        let path = self.dir.join(self.file_name(kind, date));
        let json = serde_json::to_vec(records)?;
        fs::write(&path, json)?;
        tracing::info!(path = %path.display(), records = records.len(), "saved");
        Ok(path)
    }
}
