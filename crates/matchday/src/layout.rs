//! Site layout: every locator and literal that is specific to the site markup.
//!
//! [`SiteLayout::default`] matches native-stats.org. A YAML file can override
//! any subset of fields; the rest keep their defaults.
//!
//! ```yaml
//! ready: "//div[@class='container']"
//! detail:
//!   error_message: "Something went wrong."
//!   lineup_schema: [number, name, position, market_value]
//! ```

use crate::extract::{FieldSchema, TableOptions, DEFAULT_TABLE_SKIP_WORD};
use crate::locator::{xpath_literal, Locator};
use crate::record::MatchId;
use crate::result::{ScrapeError, ScrapeResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder replaced by the match id in listing templates
pub const ID_PLACEHOLDER: &str = "{id}";

/// Heading text of the site's error page
pub const DEFAULT_ERROR_MESSAGE: &str =
    "No time yet to build a proper error page, but be sure that something went wrong.";

/// Complete site layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteLayout {
    /// Element whose presence means a page is ready
    pub ready: Locator,
    /// Listing page layout
    pub listing: ListingLayout,
    /// Detail page layout
    pub detail: DetailLayout,
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self {
            ready: Locator::xpath("//div[@class='container']"),
            listing: ListingLayout::default(),
            detail: DetailLayout::default(),
        }
    }
}

impl SiteLayout {
    /// Parse a layout from YAML and validate it
    pub fn from_yaml_str(yaml: &str) -> ScrapeResult<Self> {
        let layout: Self =
            serde_yaml_ng::from_str(yaml).map_err(|e| ScrapeError::layout(e.to_string()))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Read a layout from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ScrapeResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml).map_err(|e| match e {
            ScrapeError::Layout { message } => {
                ScrapeError::layout(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }

    /// Check that every listing template mentions the id placeholder
    pub fn validate(&self) -> ScrapeResult<()> {
        for (name, template) in self.listing.templates() {
            if !template.contains(ID_PLACEHOLDER) {
                return Err(ScrapeError::layout(format!(
                    "listing.{name} must contain {ID_PLACEHOLDER}"
                )));
            }
        }
        Ok(())
    }
}

/// Listing page layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingLayout {
    /// One element per match row
    pub match_rows: Locator,
    /// Attribute of a match row holding its id
    pub id_attribute: String,
    /// Match date, templated on `{id}`
    pub match_date: String,
    /// Kick-off time, templated on `{id}`
    pub match_time: String,
    /// Status badge, templated on `{id}`
    pub badge: String,
    /// Match-day label, templated on `{id}`
    pub matchday: String,
    /// Home team name, templated on `{id}`
    pub home_team: String,
    /// Away team name, templated on `{id}`
    pub away_team: String,
    /// Separator text sharing the away-team locator
    pub away_team_skip_word: Option<String>,
    /// Score, templated on `{id}`
    pub score: String,
}

impl Default for ListingLayout {
    fn default() -> Self {
        let row = "//tr[@id='{id}']";
        Self {
            match_rows: Locator::xpath("//tr[@class='open_match_view']"),
            id_attribute: "id".to_string(),
            match_date: format!(
                "{row}/td[@class='datetime']/span[contains(@class, 'match_date')]"
            ),
            match_time: format!(
                "{row}/td[@class='datetime']/span[contains(@class, 'match_time')]"
            ),
            badge: format!("{row}/td[@class='datetime']/span[contains(@class, 'badge')]"),
            matchday: format!("{row}/td[@class='matchday']"),
            home_team: format!(
                "{row}/td[@class='fixture']/span[@class='homeTeam']/span[@class='ls-only']"
            ),
            away_team: format!(
                "{row}/td[@class='fixture']/span[@class='awayTeam']/span[@class='ls-only']"
            ),
            away_team_skip_word: Some(".vs".to_string()),
            score: format!("{row}/td[@class='score']"),
        }
    }
}

impl ListingLayout {
    /// Resolve a row template for one match.
    ///
    /// A quoted placeholder (`'{id}'` or `"{id}"`) becomes an XPath string
    /// literal of the id, so ids holding quotes still yield a valid
    /// expression. A bare placeholder is replaced by the raw id.
    #[must_use]
    pub fn locate(template: &str, id: &MatchId) -> Locator {
        let literal = xpath_literal(id.as_str());
        let expr = template
            .replace(&format!("'{ID_PLACEHOLDER}'"), &literal)
            .replace(&format!("\"{ID_PLACEHOLDER}\""), &literal)
            .replace(ID_PLACEHOLDER, id.as_str());
        Locator::xpath(expr)
    }

    fn templates(&self) -> [(&'static str, &str); 7] {
        [
            ("match_date", self.match_date.as_str()),
            ("match_time", self.match_time.as_str()),
            ("badge", self.badge.as_str()),
            ("matchday", self.matchday.as_str()),
            ("home_team", self.home_team.as_str()),
            ("away_team", self.away_team.as_str()),
            ("score", self.score.as_str()),
        ]
    }
}

/// Detail page layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailLayout {
    /// Heading compared against the error message
    pub error_heading: Locator,
    /// Heading text of the site's error page
    pub error_message: String,
    /// Home starting eleven
    pub home_lineup: Locator,
    /// Home substitutes
    pub home_bench: Locator,
    /// Away starting eleven
    pub away_lineup: Locator,
    /// Away substitutes
    pub away_bench: Locator,
    /// Schema for lineup and bench rows (`None` keeps raw cells)
    pub lineup_schema: Option<FieldSchema>,
    /// Footer row dropped from lineup and bench tables
    pub lineup_skip_word: Option<String>,
    /// Goals table
    pub goals: Locator,
    /// Goals row schema
    pub goals_schema: FieldSchema,
    /// Substitutions table
    pub substitutions: Locator,
    /// Substitutions row schema
    pub substitutions_schema: FieldSchema,
    /// Bookings table
    pub bookings: Locator,
    /// Bookings row schema
    pub bookings_schema: FieldSchema,
    /// Head-to-head table
    pub head2head: Locator,
    /// Prior encounters table
    pub encounters: Locator,
}

impl Default for DetailLayout {
    fn default() -> Self {
        let sheet = |path: &str| Locator::xpath(format!("//div[@id='content']/{path}/tbody"));
        Self {
            error_heading: Locator::xpath("//div[@class='h4']"),
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            home_lineup: sheet("div[3]/div[1]/table[1]"),
            home_bench: sheet("div[3]/div[1]/table[2]"),
            away_lineup: sheet("div[3]/div[2]/table[1]"),
            away_bench: sheet("div[3]/div[2]/table[2]"),
            lineup_schema: None,
            lineup_skip_word: Some(DEFAULT_TABLE_SKIP_WORD.to_string()),
            goals: sheet("div[3]/div[3]/table[1]"),
            goals_schema: FieldSchema::new(["minute", "team", "scorer", "assist"]),
            substitutions: sheet("div[3]/div[3]/table[2]"),
            substitutions_schema: FieldSchema::new(["minute", "team", "player_in", "player_out"]),
            bookings: sheet("div[3]/div[3]/table[3]"),
            bookings_schema: FieldSchema::new(["minute", "team", "player", "card"]),
            head2head: sheet("div[4]/div[1]/table"),
            encounters: sheet("div[4]/div[2]/table"),
        }
    }
}

impl DetailLayout {
    /// How lineup and bench tables are read
    #[must_use]
    pub fn lineup_options(&self) -> TableOptions {
        TableOptions::raw()
            .with_schema(self.lineup_schema.clone())
            .with_skip_word(self.lineup_skip_word.clone())
    }

    /// How an event table is read: zipped, nothing skipped
    #[must_use]
    pub fn event_options(schema: &FieldSchema) -> TableOptions {
        TableOptions::raw().with_schema(Some(schema.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;

    mod default_tests {
        use super::*;

        #[test]
        fn test_default_layout_is_valid() {
            assert!(SiteLayout::default().validate().is_ok());
        }

        #[test]
        fn test_locate_substitutes_id() {
            let layout = ListingLayout::default();
            let loc = ListingLayout::locate(&layout.score, &MatchId::new("4711"));
            assert_eq!(loc.as_str(), "//tr[@id='4711']/td[@class='score']");
        }

        #[test]
        fn test_locate_quotes_id_with_apostrophe() {
            let layout = ListingLayout::default();
            let loc = ListingLayout::locate(&layout.matchday, &MatchId::new("it's"));
            assert_eq!(loc.as_str(), "//tr[@id=\"it's\"]/td[@class='matchday']");

            let loc = ListingLayout::locate(&layout.matchday, &MatchId::new(r#"a'b"c"#));
            assert_eq!(
                loc.as_str(),
                r#"//tr[@id=concat('a', "'", 'b"c')]/td[@class='matchday']"#
            );
        }

        #[test]
        fn test_locate_bare_placeholder_is_raw() {
            let loc = ListingLayout::locate("//tr[@data-n={id}]", &MatchId::new("9"));
            assert_eq!(loc.as_str(), "//tr[@data-n=9]");
        }

        #[test]
        fn test_detail_locators() {
            let detail = DetailLayout::default();
            assert_eq!(
                detail.goals.as_str(),
                "//div[@id='content']/div[3]/div[3]/table[1]/tbody"
            );
            assert_eq!(
                detail.encounters.as_str(),
                "//div[@id='content']/div[4]/div[2]/table/tbody"
            );
        }

        #[test]
        fn test_lineup_options_keep_raw_rows_and_drop_footer() {
            let opts = DetailLayout::default().lineup_options();
            assert!(opts.schema.is_none());
            assert_eq!(opts.skip_word.as_deref(), Some("Total market value:"));
        }

        #[test]
        fn test_event_options_have_no_skip_word() {
            let detail = DetailLayout::default();
            let opts = DetailLayout::event_options(&detail.bookings_schema);
            assert!(opts.skip_word.is_none());
            assert_eq!(opts.schema.unwrap().fields(), ["minute", "team", "player", "card"]);
        }
    }

    mod yaml_tests {
        use super::*;

        #[test]
        fn test_partial_override_keeps_defaults() {
            let yaml = r#"
ready: "//main"
detail:
  error_message: "Oops"
  lineup_schema: [number, name, position, market_value]
"#;
            let layout = SiteLayout::from_yaml_str(yaml).unwrap();
            assert_eq!(layout.ready.as_str(), "//main");
            assert_eq!(layout.detail.error_message, "Oops");
            assert_eq!(layout.detail.lineup_schema, Some(FieldSchema::default()));
            assert_eq!(layout.listing, ListingLayout::default());
            assert_eq!(layout.detail.goals, DetailLayout::default().goals);
        }

        #[test]
        fn test_template_without_placeholder_is_rejected() {
            let yaml = "listing:\n  score: \"//td[@class='score']\"\n";
            let err = SiteLayout::from_yaml_str(yaml).unwrap_err();
            assert!(err.to_string().contains("listing.score"));
        }

        #[test]
        fn test_malformed_yaml_is_layout_error() {
            let err = SiteLayout::from_yaml_str("ready: [unclosed").unwrap_err();
            assert!(matches!(err, ScrapeError::Layout { .. }));
        }

        #[test]
        fn test_from_file() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "listing:\n  id_attribute: data-id").unwrap();
            let layout = SiteLayout::from_yaml_file(file.path()).unwrap();
            assert_eq!(layout.listing.id_attribute, "data-id");
        }

        #[test]
        fn test_missing_file_is_io_error() {
            let err = SiteLayout::from_yaml_file("/definitely/not/here.yaml").unwrap_err();
            assert!(matches!(err, ScrapeError::Io(_)));
        }
    }
}
