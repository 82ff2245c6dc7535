//! Locator abstraction for element selection.
//!
//! A [`Locator`] is an XPath expression. Table extraction never needs a richer
//! query language: rows and cells are addressed by composing XPath steps onto
//! the container's locator, so every lookup goes through the same
//! `resolve_one` / `resolve_many` pair on the page session.
//!
//! ```text
//! container            //div[@id='content']/div[3]/div[3]/table[1]/tbody
//! container.rows()     //div[@id='content']/div[3]/div[3]/table[1]/tbody/tr
//! ...nth(2)            (//div[@id='content']/div[3]/div[3]/table[1]/tbody/tr)[2]
//! ...child("td")       (//div[@id='content']/div[3]/div[3]/table[1]/tbody/tr)[2]/td
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag name of a table row
pub const ROW_TAG: &str = "tr";

/// Tag name of a table cell
pub const CELL_TAG: &str = "td";

/// An XPath expression identifying zero or more elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    /// Create a locator from an XPath expression
    #[must_use]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self(expr.into())
    }

    /// The raw XPath expression
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Direct row children of this container
    #[must_use]
    pub fn rows(&self) -> Self {
        self.child(ROW_TAG)
    }

    /// Direct children with the given tag
    #[must_use]
    pub fn child(&self, tag: &str) -> Self {
        Self(format!("{}/{tag}", self.0))
    }

    /// The `n`th match of this locator, 1-based as in XPath
    #[must_use]
    pub fn nth(&self, n: usize) -> Self {
        Self(format!("({})[{n}]", self.0))
    }

    /// Cells of the `n`th (1-based) row of this container
    #[must_use]
    pub fn row_cells(&self, n: usize) -> Self {
        self.rows().nth(n).child(CELL_TAG)
    }

    /// JavaScript that snapshots every match of this locator.
    ///
    /// Evaluates to an array of `{ tag_name, text, attributes }` objects that
    /// deserialize into [`crate::ElementHandle`]. Tabs in `innerText` (the
    /// separator browsers put between table cells) become single spaces.
    #[must_use]
    pub fn to_collect_script(&self) -> String {
        let expr = serde_json::to_string(&self.0).unwrap_or_else(|_| "\"\"".to_string());
        format!(
            "(() => {{\
                const snap = document.evaluate({expr}, document, null, \
                    XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null);\
                const out = [];\
                for (let i = 0; i < snap.snapshotLength; i++) {{\
                    const el = snap.snapshotItem(i);\
                    const attributes = {{}};\
                    if (el.attributes) {{\
                        for (const a of el.attributes) {{ attributes[a.name] = a.value; }}\
                    }}\
                    const raw = el.innerText ?? el.textContent ?? '';\
                    out.push({{\
                        tag_name: (el.tagName || el.nodeName || '').toLowerCase(),\
                        text: raw.replace(/\\t+/g, ' ').trim(),\
                        attributes\
                    }});\
                }}\
                return out;\
            }})()"
        )
    }
}

/// `value` as an XPath string literal.
///
/// XPath 1.0 has no escape sequences, so a value holding both quote kinds is
/// spelled as a `concat()` of single-quoted pieces.
#[must_use]
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    if !value.contains('"') {
        return format!("\"{value}\"");
    }
    let pieces: Vec<String> = value.split('\'').map(|p| format!("'{p}'")).collect();
    format!("concat({})", pieces.join(", \"'\", "))
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locator {
    fn from(expr: &str) -> Self {
        Self::xpath(expr)
    }
}

impl From<String> for Locator {
    fn from(expr: String) -> Self {
        Self::xpath(expr)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod composition_tests {
        use super::*;

        #[test]
        fn test_rows_are_direct_children() {
            let table = Locator::xpath("//table[1]/tbody");
            assert_eq!(table.rows().as_str(), "//table[1]/tbody/tr");
        }

        #[test]
        fn test_nth_wraps_in_parentheses() {
            let rows = Locator::xpath("//tbody/tr");
            assert_eq!(rows.nth(3).as_str(), "(//tbody/tr)[3]");
        }

        #[test]
        fn test_row_cells() {
            let table = Locator::xpath("//div[@id='content']/table/tbody");
            assert_eq!(
                table.row_cells(2).as_str(),
                "(//div[@id='content']/table/tbody/tr)[2]/td"
            );
        }

        #[test]
        fn test_display_and_from() {
            let loc: Locator = "//tr[@class='open_match_view']".into();
            assert_eq!(loc.to_string(), "//tr[@class='open_match_view']");
            let owned: Locator = String::from("//a").into();
            assert_eq!(owned, Locator::xpath("//a"));
        }
    }

    mod literal_tests {
        use super::*;

        #[test]
        fn test_plain_value_is_single_quoted() {
            assert_eq!(xpath_literal("4711"), "'4711'");
        }

        #[test]
        fn test_apostrophe_switches_to_double_quotes() {
            assert_eq!(xpath_literal("o'neil"), "\"o'neil\"");
        }

        #[test]
        fn test_both_quote_kinds_use_concat() {
            assert_eq!(
                xpath_literal(r#"a'b"c"#),
                r#"concat('a', "'", 'b"c')"#
            );
            assert_eq!(xpath_literal("'"), r#"concat('', "'", '')"#);
        }
    }

    mod script_tests {
        use super::*;

        #[test]
        fn test_collect_script_embeds_quoted_expression() {
            let loc = Locator::xpath("//tr[@id='42']/td[@class='score']");
            let script = loc.to_collect_script();
            assert!(script.contains("\"//tr[@id='42']/td[@class='score']\""));
            assert!(script.contains("ORDERED_NODE_SNAPSHOT_TYPE"));
            assert!(script.contains("tag_name"));
        }

        #[test]
        fn test_collect_script_escapes_double_quotes() {
            let loc = Locator::xpath(r#"//span[text()="vs."]"#);
            let script = loc.to_collect_script();
            assert!(script.contains(r#"\"vs.\""#));
        }
    }

    mod serde_tests {
        use super::*;

        #[test]
        fn test_locator_is_transparent() {
            let loc = Locator::xpath("//div");
            assert_eq!(serde_json::to_string(&loc).unwrap(), "\"//div\"");
            let back: Locator = serde_json::from_str("\"//p\"").unwrap();
            assert_eq!(back.as_str(), "//p");
        }
    }
}
