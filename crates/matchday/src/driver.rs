//! PageSession - Abstract Browser Session Trait
//!
//! The extractors and orchestrators only ever talk to a [`PageSession`]:
//! navigate, resolve a locator to one or many element snapshots, close.
//! Any browser-automation backend can sit behind it.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  PageSession (async trait)                                   │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────────────────┐   ┌──────────────────────────┐   │
//! │  │  ChromiumSession       │   │  MockSession             │   │
//! │  │  (feature "browser")   │   │  (tests, fixtures)       │   │
//! │  │  CDP via chromiumoxide │   │  in-memory locator map   │   │
//! │  └────────────────────────┘   └──────────────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use crate::locator::Locator;
use crate::result::ScrapeResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Snapshot of one DOM element
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Element tag name, lowercase
    pub tag_name: String,
    /// Rendered text content, trimmed
    #[serde(default)]
    pub text: String,
    /// Element attributes
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Self::default()
        }
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Rendered text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attribute value, if the element carries it
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Browser configuration for a page session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Skip image downloads (no effect on extraction)
    pub disable_images: bool,
    /// Browser executable override (None = auto-detect)
    pub executable_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
    /// User agent string
    pub user_agent: Option<String>,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Timeout for a single navigation request
    pub navigation_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            headless: true,
            disable_images: true,
            executable_path: None,
            sandbox: true,
            user_agent: None,
            viewport_width: 1920,
            viewport_height: 1080,
            navigation_timeout: Duration::from_secs(30),
        }
    }
}

impl SessionConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set headless mode
    #[must_use]
    pub const fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Enable or disable image loading
    #[must_use]
    pub const fn disable_images(mut self, disable: bool) -> Self {
        self.disable_images = disable;
        self
    }

    /// Set browser executable
    #[must_use]
    pub fn executable_path(mut self, path: impl Into<String>) -> Self {
        self.executable_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }
}

/// Abstract page session for browser automation
///
/// One session is owned by one run; every call is awaited before the next
/// one starts.
#[async_trait]
pub trait PageSession: Send + Sync {
    /// Navigate to URL
    async fn navigate(&mut self, url: &str) -> ScrapeResult<()>;

    /// First element matching the locator, if any
    async fn resolve_one(&self, locator: &Locator) -> ScrapeResult<Option<ElementHandle>> {
        Ok(self.resolve_many(locator).await?.into_iter().next())
    }

    /// All elements matching the locator, in document order
    async fn resolve_many(&self, locator: &Locator) -> ScrapeResult<Vec<ElementHandle>>;

    /// Current URL
    fn current_url(&self) -> &str;

    /// Release the browser
    async fn close(&mut self) -> ScrapeResult<()>;
}

// =============================================================================
// MOCK SESSION
// =============================================================================

/// In-memory page: locator expression to matching elements
#[derive(Debug, Clone, Default)]
pub struct MockPage {
    elements: HashMap<String, Vec<ElementHandle>>,
}

impl MockPage {
    /// Create an empty page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one element under a locator (appends to existing matches)
    #[must_use]
    pub fn with_element(mut self, locator: &Locator, element: ElementHandle) -> Self {
        self.elements
            .entry(locator.as_str().to_string())
            .or_default()
            .push(element);
        self
    }

    /// Register a text-only element under a locator
    #[must_use]
    pub fn with_text(self, locator: &Locator, text: impl Into<String>) -> Self {
        self.with_element(locator, ElementHandle::new("span").with_text(text))
    }

    /// Register several elements under a locator
    #[must_use]
    pub fn with_elements(
        mut self,
        locator: &Locator,
        elements: impl IntoIterator<Item = ElementHandle>,
    ) -> Self {
        self.elements
            .entry(locator.as_str().to_string())
            .or_default()
            .extend(elements);
        self
    }

    /// Register a table body: the container, its rows and each row's cells.
    ///
    /// Rows and cells are registered under the first-match form of the
    /// container, `(container)[1]/tr`. A row's text is its cell texts joined
    /// by single spaces.
    #[must_use]
    pub fn with_table(mut self, container: &Locator, rows: &[&[&str]]) -> Self {
        self = self.with_element(container, ElementHandle::new("tbody"));
        let first = container.nth(1);
        // Keep the rows locator registered even for empty bodies
        self.elements.entry(first.rows().as_str().to_string()).or_default();
        for (i, cells) in rows.iter().enumerate() {
            let row = ElementHandle::new("tr").with_text(cells.join(" "));
            self = self.with_element(&first.rows(), row);
            let cell_locator = first.row_cells(i + 1);
            // Keep the locator registered even for rows without cells
            self.elements
                .entry(cell_locator.as_str().to_string())
                .or_default();
            for cell in *cells {
                self = self.with_element(&cell_locator, ElementHandle::new("td").with_text(*cell));
            }
        }
        self
    }

    /// Elements registered under a locator
    #[must_use]
    pub fn lookup(&self, locator: &Locator) -> &[ElementHandle] {
        self.elements
            .get(locator.as_str())
            .map_or(&[], Vec::as_slice)
    }
}

/// Mock session for unit testing
#[derive(Debug, Default)]
pub struct MockSession {
    /// Current URL
    pub current_url: String,
    /// Pages by URL
    pages: HashMap<String, MockPage>,
    /// Call history for verification
    pub call_history: Vec<String>,
    closed: bool,
}

impl MockSession {
    /// Create new mock session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve a page at a URL
    #[must_use]
    pub fn with_page(mut self, url: impl Into<String>, page: MockPage) -> Self {
        self.pages.insert(url.into(), page);
        self
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.call_history
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.call_history.iter().any(|c| c.starts_with(method))
    }

    /// Whether `close` has been called
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    fn current_page(&self) -> Option<&MockPage> {
        self.pages.get(&self.current_url)
    }
}

#[async_trait]
impl PageSession for MockSession {
    async fn navigate(&mut self, url: &str) -> ScrapeResult<()> {
        self.call_history.push(format!("navigate:{url}"));
        self.current_url = url.to_string();
        Ok(())
    }

    async fn resolve_many(&self, locator: &Locator) -> ScrapeResult<Vec<ElementHandle>> {
        Ok(self
            .current_page()
            .map(|page| page.lookup(locator).to_vec())
            .unwrap_or_default())
    }

    fn current_url(&self) -> &str {
        &self.current_url
    }

    async fn close(&mut self) -> ScrapeResult<()> {
        self.call_history.push("close".to_string());
        self.closed = true;
        Ok(())
    }
}
