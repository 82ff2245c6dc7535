//! Extraction primitives: locator in, value out.
//!
//! Three extractors turn page state into record fields:
//!
//! - [`extract_field`]: text of one element
//! - [`extract_table`]: rows of a table body, raw or zipped against a [`FieldSchema`]
//! - [`extract_attributes`]: one attribute per matching element
//!
//! A locator that matches nothing is not an error. The first two return
//! [`Extracted::Absent`], which only becomes the literal `"null"` / `["null"]`
//! when a record is serialized. Skip words are compared for exact equality:
//! text that merely contains the skip word is kept.

use crate::driver::{ElementHandle, PageSession};
use crate::locator::Locator;
use crate::result::ScrapeResult;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Literal written in place of data that was not found
pub const SENTINEL: &str = "null";

/// Skip word for lineup tables: the aggregate footer row
pub const DEFAULT_TABLE_SKIP_WORD: &str = "Total market value:";

/// Field names of a lineup row
pub const DEFAULT_SCHEMA: [&str; 4] = ["number", "name", "position", "market_value"];

// =============================================================================
// EXTRACTED
// =============================================================================

/// Outcome of one extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted<T> {
    /// The locator resolved
    Found(T),
    /// Nothing usable matched
    Absent,
}

impl<T> Extracted<T> {
    /// Whether a value was found
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Borrow the found value
    #[must_use]
    pub const fn found(&self) -> Option<&T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Absent => None,
        }
    }

    /// Map the found value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Extracted<U> {
        match self {
            Self::Found(value) => Extracted::Found(f(value)),
            Self::Absent => Extracted::Absent,
        }
    }
}

impl<T> From<Option<T>> for Extracted<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Found)
    }
}

impl Extracted<String> {
    /// The found text, or the sentinel
    #[must_use]
    pub fn as_text(&self) -> &str {
        self.found().map_or(SENTINEL, String::as_str)
    }
}

impl Serialize for Extracted<String> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_text())
    }
}

impl<T: Serialize> Serialize for Extracted<Vec<T>> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Found(items) => items.serialize(serializer),
            Self::Absent => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(SENTINEL)?;
                seq.end()
            }
        }
    }
}

// =============================================================================
// SCHEMA AND ROWS
// =============================================================================

/// Ordered field names a table row is zipped against
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, Serialize)]
#[serde(transparent)]
pub struct FieldSchema(Vec<String>);

impl FieldSchema {
    /// Create a schema from field names
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(fields.into_iter().map(Into::into).collect())
    }

    /// Field names in order
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.0
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the schema has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Zip cell texts against the schema by position.
    ///
    /// Missing trailing cells are padded with [`Extracted::Absent`]; cells past
    /// the schema length are dropped.
    #[must_use]
    pub fn zip_row(&self, cells: Vec<String>) -> FieldRow {
        let mut cells = cells.into_iter();
        FieldRow(
            self.0
                .iter()
                .map(|name| (name.clone(), cells.next().into()))
                .collect(),
        )
    }
}

impl Default for FieldSchema {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEMA)
    }
}

/// A row zipped against a schema, serialized as an object in schema order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow(Vec<(String, Extracted<String>)>);

impl FieldRow {
    /// Value of a field
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Extracted<String>> {
        self.0
            .iter()
            .find_map(|(name, value)| (name == field).then_some(value))
    }

    /// Fields in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Extracted<String>)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the row has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for FieldRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// One extracted table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TableRow {
    /// Cells zipped against a schema
    Fields(FieldRow),
    /// Raw cell texts, for tables without a fixed shape
    Cells(Vec<String>),
}

impl TableRow {
    /// The zipped form, if this row had a schema
    #[must_use]
    pub const fn as_fields(&self) -> Option<&FieldRow> {
        match self {
            Self::Fields(row) => Some(row),
            Self::Cells(_) => None,
        }
    }

    /// The raw form, if this row had no schema
    #[must_use]
    pub fn as_cells(&self) -> Option<&[String]> {
        match self {
            Self::Cells(cells) => Some(cells),
            Self::Fields(_) => None,
        }
    }
}

/// Result of a table extraction
pub type Table = Extracted<Vec<TableRow>>;

/// How a table is read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Schema to zip rows against; `None` keeps raw cells
    pub schema: Option<FieldSchema>,
    /// Rows whose text equals this are dropped
    pub skip_word: Option<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            schema: Some(FieldSchema::default()),
            skip_word: Some(DEFAULT_TABLE_SKIP_WORD.to_string()),
        }
    }
}

impl TableOptions {
    /// Raw rows, no skip word
    #[must_use]
    pub const fn raw() -> Self {
        Self {
            schema: None,
            skip_word: None,
        }
    }

    /// Zip rows against a schema
    #[must_use]
    pub fn with_schema(mut self, schema: Option<FieldSchema>) -> Self {
        self.schema = schema;
        self
    }

    /// Drop rows whose text equals `skip_word`
    #[must_use]
    pub fn with_skip_word(mut self, skip_word: Option<String>) -> Self {
        self.skip_word = skip_word;
        self
    }
}

// =============================================================================
// EXTRACTORS
// =============================================================================

fn is_skipped(element: &ElementHandle, skip_word: Option<&str>) -> bool {
    skip_word.is_some_and(|word| element.text() == word)
}

/// Text of the first element matching `locator`.
///
/// With a skip word, every match is considered and the first whose text is
/// not exactly the skip word wins.
pub async fn extract_field<S>(
    session: &S,
    locator: &Locator,
    skip_word: Option<&str>,
) -> ScrapeResult<Extracted<String>>
where
    S: PageSession + ?Sized,
{
    let found = match skip_word {
        None => session.resolve_one(locator).await?,
        Some(_) => session
            .resolve_many(locator)
            .await?
            .into_iter()
            .find(|el| !is_skipped(el, skip_word)),
    };

    match found {
        Some(el) => Ok(Extracted::Found(el.text)),
        None => {
            tracing::warn!(locator = %locator, "no element matched, check the locator");
            Ok(Extracted::Absent)
        }
    }
}

/// Rows of the table body at `locator`.
///
/// Only the first container matching `locator` is read. Each of its direct
/// `tr` children contributes its `td` texts in document order. Rows
/// whose text equals the skip word are dropped. A missing container, a
/// container without rows, or a table whose rows were all skipped is
/// [`Extracted::Absent`].
pub async fn extract_table<S>(
    session: &S,
    locator: &Locator,
    options: &TableOptions,
) -> ScrapeResult<Table>
where
    S: PageSession + ?Sized,
{
    if session.resolve_one(locator).await?.is_none() {
        tracing::debug!(locator = %locator, "table container not found");
        return Ok(Extracted::Absent);
    }

    let container = locator.nth(1);
    let skip_word = options.skip_word.as_deref();
    let rows = session.resolve_many(&container.rows()).await?;
    let mut out = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        if is_skipped(row, skip_word) {
            tracing::debug!(locator = %locator, row = i + 1, "skipping row");
            continue;
        }
        let cells: Vec<String> = session
            .resolve_many(&container.row_cells(i + 1))
            .await?
            .into_iter()
            .map(|cell| cell.text)
            .collect();

        out.push(match &options.schema {
            Some(schema) => TableRow::Fields(schema.zip_row(cells)),
            None => TableRow::Cells(cells),
        });
    }

    if out.is_empty() {
        tracing::debug!(locator = %locator, "table has no rows");
        return Ok(Extracted::Absent);
    }
    Ok(Extracted::Found(out))
}

/// One attribute per element matching `locator`.
///
/// Elements whose text equals the skip word are excluded first. Elements
/// without the attribute yield `None`, so the output lines up one-to-one with
/// the kept elements.
pub async fn extract_attributes<S>(
    session: &S,
    locator: &Locator,
    attribute: &str,
    skip_word: Option<&str>,
) -> ScrapeResult<Vec<Option<String>>>
where
    S: PageSession + ?Sized,
{
    Ok(session
        .resolve_many(locator)
        .await?
        .iter()
        .filter(|el| !is_skipped(el, skip_word))
        .map(|el| el.attribute(attribute).map(str::to_string))
        .collect())
}
