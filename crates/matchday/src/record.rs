//! Output records.
//!
//! Records are assembled once and never mutated. Every field whose locator
//! missed is still present in the JSON, holding the sentinel.

use crate::extract::{Extracted, Table};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one match, taken from the listing page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    /// Create a match id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Address of a match's detail page
#[must_use]
pub fn detail_url(site: &str, id: &MatchId) -> String {
    format!("{}/matches/{id}", site.trim_end_matches('/'))
}

// =============================================================================
// LISTING PHASE
// =============================================================================

/// Kick-off information of a listing row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    /// Match date
    pub match_date: Extracted<String>,
    /// Kick-off time
    pub match_time: Extracted<String>,
    /// Status badge (e.g. "FT", "LIVE")
    pub badge: Extracted<String>,
}

/// The two sides of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fixture {
    /// Home team name
    pub home_team: Extracted<String>,
    /// Away team name
    pub away_team: Extracted<String>,
}

/// One match as shown on the listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchOutline {
    /// Match id
    pub id: MatchId,
    /// Detail page address
    pub url: String,
    /// Date, time and badge
    pub datetime: Schedule,
    /// Match-day label
    pub matchday: Extracted<String>,
    /// Home and away team
    pub fixture: Fixture,
    /// Score
    pub score: Extracted<String>,
}

// =============================================================================
// DETAIL PHASE
// =============================================================================

/// Whether a detail page could be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// The match sheet was extracted
    Loaded,
    /// The site served its error page
    Error,
}

/// Players of one side
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSheet {
    /// Starting eleven
    pub lineup: Table,
    /// Substitutes
    pub bench: Table,
}

/// Match events
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Goals: minute, team, scorer, assist
    pub goals: Table,
    /// Substitutions: minute, team, player in, player out
    pub substitutions: Table,
    /// Bookings: minute, team, player, card
    pub bookings: Table,
}

/// Everything read from a loaded detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSheet {
    /// Home side
    pub home_team: TeamSheet,
    /// Away side
    pub away_team: TeamSheet,
    /// Goals, substitutions and bookings
    pub statistics: Statistics,
    /// Head-to-head table
    pub head2head: Table,
    /// Prior encounters table
    pub encounters: Table,
}

/// One match as read from its detail page.
///
/// An error record serializes to exactly `{id, url, status}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchDetail {
    /// Match id
    pub id: MatchId,
    /// Detail page address
    pub url: String,
    /// Load status
    pub status: MatchStatus,
    #[serde(flatten)]
    sheet: Option<MatchSheet>,
}

impl MatchDetail {
    /// Record for a detail page that showed the site's error message
    #[must_use]
    pub fn error(id: MatchId, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            status: MatchStatus::Error,
            sheet: None,
        }
    }

    /// Record for a detail page that loaded
    #[must_use]
    pub fn loaded(id: MatchId, url: impl Into<String>, sheet: MatchSheet) -> Self {
        Self {
            id,
            url: url.into(),
            status: MatchStatus::Loaded,
            sheet: Some(sheet),
        }
    }

    /// The match sheet, present only when loaded
    #[must_use]
    pub const fn sheet(&self) -> Option<&MatchSheet> {
        self.sheet.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::extract::{FieldSchema, TableRow};
    use serde_json::json;

    fn absent_sheet() -> MatchSheet {
        let side = || TeamSheet {
            lineup: Extracted::Absent,
            bench: Extracted::Absent,
        };
        MatchSheet {
            home_team: side(),
            away_team: side(),
            statistics: Statistics {
                goals: Extracted::Absent,
                substitutions: Extracted::Absent,
                bookings: Extracted::Absent,
            },
            head2head: Extracted::Absent,
            encounters: Extracted::Absent,
        }
    }

    #[test]
    fn test_detail_url_trims_trailing_slash() {
        let id = MatchId::new("4711");
        assert_eq!(
            detail_url("https://native-stats.org/", &id),
            "https://native-stats.org/matches/4711"
        );
        assert_eq!(
            detail_url("https://native-stats.org", &id),
            "https://native-stats.org/matches/4711"
        );
    }

    #[test]
    fn test_outline_shape_with_sentinels() {
        let outline = MatchOutline {
            id: MatchId::new("4711"),
            url: "https://native-stats.org/matches/4711".to_string(),
            datetime: Schedule {
                match_date: Extracted::Found("Sat 14.08.".to_string()),
                match_time: Extracted::Found("15:00".to_string()),
                badge: Extracted::Absent,
            },
            matchday: Extracted::Found("1".to_string()),
            fixture: Fixture {
                home_team: Extracted::Found("Brentford".to_string()),
                away_team: Extracted::Found("Arsenal".to_string()),
            },
            score: Extracted::Absent,
        };

        assert_eq!(
            serde_json::to_value(&outline).unwrap(),
            json!({
                "id": "4711",
                "url": "https://native-stats.org/matches/4711",
                "datetime": {"match_date": "Sat 14.08.", "match_time": "15:00", "badge": "null"},
                "matchday": "1",
                "fixture": {"home_team": "Brentford", "away_team": "Arsenal"},
                "score": "null"
            })
        );
    }

    #[test]
    fn test_error_detail_has_only_three_keys() {
        let detail = MatchDetail::error(MatchId::new("9"), "https://native-stats.org/matches/9");
        assert!(detail.sheet().is_none());
        assert_eq!(
            serde_json::to_value(&detail).unwrap(),
            json!({"id": "9", "url": "https://native-stats.org/matches/9", "status": "error"})
        );
    }

    #[test]
    fn test_loaded_detail_flattens_sheet() {
        let mut sheet = absent_sheet();
        sheet.statistics.goals = Extracted::Found(vec![TableRow::Fields(
            FieldSchema::new(["minute", "team", "scorer", "assist"])
                .zip_row(vec!["12'".into(), "home".into(), "Toney".into()]),
        )]);
        let detail = MatchDetail::loaded(MatchId::new("1"), "u", sheet);

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["status"], "loaded");
        assert_eq!(value["home_team"]["lineup"], json!(["null"]));
        assert_eq!(
            value["statistics"]["goals"],
            json!([{"minute": "12'", "team": "home", "scorer": "Toney", "assist": "null"}])
        );
        assert_eq!(value["encounters"], json!(["null"]));
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(serde_json::to_value(MatchStatus::Loaded).unwrap(), json!("loaded"));
        let status: MatchStatus = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(status, MatchStatus::Error);
    }
}
