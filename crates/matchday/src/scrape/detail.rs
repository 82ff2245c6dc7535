//! Detail phase: one visit per match, one [`MatchDetail`] per visit.

use super::ScrapeConfig;
use crate::driver::PageSession;
use crate::extract::{extract_table, TableOptions};
use crate::layout::DetailLayout;
use crate::record::{detail_url, MatchDetail, MatchId, MatchSheet, Statistics, TeamSheet};
use crate::result::ScrapeResult;
use crate::wait::wait_for_selector;

/// Visit the detail page of `id` and read its match sheet.
///
/// If the error heading shows the site's error message, the record is
/// `status: error` and nothing else is read.
///
/// # Errors
///
/// [`crate::ScrapeError::Timeout`] if the page never becomes ready, or any
/// backend failure.
pub async fn scrape_detail<S>(
    session: &mut S,
    config: &ScrapeConfig,
    id: &MatchId,
) -> ScrapeResult<MatchDetail>
where
    S: PageSession + ?Sized,
{
    let layout = &config.layout.detail;
    let url = detail_url(&config.site_url, id);

    session.navigate(&url).await?;
    wait_for_selector(&*session, &config.layout.ready, &config.wait).await?;

    if is_error_page(&*session, layout).await? {
        tracing::warn!(id = %id, url = %url, "site served its error page");
        return Ok(MatchDetail::error(id.clone(), url));
    }

    let sheet = read_sheet(&*session, layout).await?;
    Ok(MatchDetail::loaded(id.clone(), url, sheet))
}

async fn is_error_page<S>(session: &S, layout: &DetailLayout) -> ScrapeResult<bool>
where
    S: PageSession + ?Sized,
{
    Ok(session
        .resolve_one(&layout.error_heading)
        .await?
        .is_some_and(|heading| heading.text() == layout.error_message))
}

async fn read_sheet<S>(session: &S, layout: &DetailLayout) -> ScrapeResult<MatchSheet>
where
    S: PageSession + ?Sized,
{
    let lineup = layout.lineup_options();
    let history = TableOptions::raw();

    Ok(MatchSheet {
        home_team: TeamSheet {
            lineup: extract_table(session, &layout.home_lineup, &lineup).await?,
            bench: extract_table(session, &layout.home_bench, &lineup).await?,
        },
        away_team: TeamSheet {
            lineup: extract_table(session, &layout.away_lineup, &lineup).await?,
            bench: extract_table(session, &layout.away_bench, &lineup).await?,
        },
        statistics: Statistics {
            goals: extract_table(
                session,
                &layout.goals,
                &DetailLayout::event_options(&layout.goals_schema),
            )
            .await?,
            substitutions: extract_table(
                session,
                &layout.substitutions,
                &DetailLayout::event_options(&layout.substitutions_schema),
            )
            .await?,
            bookings: extract_table(
                session,
                &layout.bookings,
                &DetailLayout::event_options(&layout.bookings_schema),
            )
            .await?,
        },
        head2head: extract_table(session, &layout.head2head, &history).await?,
        encounters: extract_table(session, &layout.encounters, &history).await?,
    })
}
