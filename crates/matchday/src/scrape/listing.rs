//! Listing phase: one visit to the fixtures page, one outline per match row.

use super::ScrapeConfig;
use crate::driver::PageSession;
use crate::extract::{extract_attributes, extract_field};
use crate::layout::ListingLayout;
use crate::record::{detail_url, Fixture, MatchId, MatchOutline, Schedule};
use crate::result::ScrapeResult;
use crate::wait::wait_for_selector;

/// Visit the listing page and build an outline for every match row.
///
/// Rows come back in page order. A row without an id attribute is skipped
/// with a warning; duplicate ids are kept as they appear.
///
/// # Errors
///
/// [`crate::ScrapeError::Timeout`] if the page never becomes ready, or any
/// backend failure.
pub async fn scrape_listing<S>(
    session: &mut S,
    config: &ScrapeConfig,
) -> ScrapeResult<Vec<MatchOutline>>
where
    S: PageSession + ?Sized,
{
    let layout = &config.layout.listing;

    session.navigate(&config.site_url).await?;
    wait_for_selector(&*session, &config.layout.ready, &config.wait).await?;

    let ids = extract_attributes(&*session, &layout.match_rows, &layout.id_attribute, None).await?;
    tracing::info!(matches = ids.len(), url = %config.site_url, "listing loaded");

    let mut outlines = Vec::with_capacity(ids.len());
    for (position, id) in ids.into_iter().enumerate() {
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            tracing::warn!(
                row = position + 1,
                attribute = %layout.id_attribute,
                "match row has no id, skipping"
            );
            continue;
        };
        outlines.push(scrape_outline(&*session, config, MatchId::new(id)).await?);
    }
    Ok(outlines)
}

/// Identifiers of the outlines, in listing order
#[must_use]
pub fn listing_ids(outlines: &[MatchOutline]) -> Vec<MatchId> {
    outlines.iter().map(|outline| outline.id.clone()).collect()
}

async fn scrape_outline<S>(
    session: &S,
    config: &ScrapeConfig,
    id: MatchId,
) -> ScrapeResult<MatchOutline>
where
    S: PageSession + ?Sized,
{
    let layout = &config.layout.listing;
    let field = |template: &str| ListingLayout::locate(template, &id);

    let datetime = Schedule {
        match_date: extract_field(session, &field(&layout.match_date), None).await?,
        match_time: extract_field(session, &field(&layout.match_time), None).await?,
        badge: extract_field(session, &field(&layout.badge), None).await?,
    };
    let matchday = extract_field(session, &field(&layout.matchday), None).await?;
    let fixture = Fixture {
        home_team: extract_field(session, &field(&layout.home_team), None).await?,
        away_team: extract_field(
            session,
            &field(&layout.away_team),
            layout.away_team_skip_word.as_deref(),
        )
        .await?,
    };
    let score = extract_field(session, &field(&layout.score), None).await?;

    Ok(MatchOutline {
        url: detail_url(&config.site_url, &id),
        id,
        datetime,
        matchday,
        fixture,
        score,
    })
}
