use serde::Serialize;
use std::sync::Arc;

use crate::constants::DEFAULT_CREST;
use crate::data_fetcher::matchday::MatchdayState;
use crate::data_fetcher::models::{CompetitionInfo, StandingsSnapshot, TeamId, TeamMap};

/// Sidebar entry for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSummary {
    pub id: TeamId,
    pub name: String,
    pub crest: String,
}

/// Teams in table order, with crests from the team directory.
///
/// Teams the directory does not know, or knows without a crest, get
/// [`DEFAULT_CREST`].
pub fn team_summaries(standings: &StandingsSnapshot, teams: &TeamMap) -> Vec<TeamSummary> {
    standings
        .rows
        .iter()
        .map(|row| TeamSummary {
            id: row.team_id,
            name: row.team_name.clone(),
            crest: teams
                .get(&row.team_id)
                .and_then(|team| team.crest_url.clone())
                .unwrap_or_else(|| DEFAULT_CREST.to_string()),
        })
        .collect()
}

/// Data every rendered page shares: league header, table, sidebar and matchday.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub league: CompetitionInfo,
    pub standings: Option<Arc<StandingsSnapshot>>,
    pub teams: Vec<TeamSummary>,
    pub current_matchday: u32,
    pub matchday_is_fallback: bool,
    /// Set when standings or teams could not be loaded.
    pub degraded: bool,
}

impl PageContext {
    pub fn new(standings: Arc<StandingsSnapshot>, teams: &TeamMap, matchday: MatchdayState) -> Self {
        Self {
            league: standings.competition.clone(),
            teams: team_summaries(&standings, teams),
            standings: Some(standings),
            current_matchday: matchday.value,
            matchday_is_fallback: matchday.is_fallback(),
            degraded: false,
        }
    }

    /// Empty league header and sidebar, so a page can still render.
    pub fn degraded(matchday: MatchdayState) -> Self {
        Self {
            league: CompetitionInfo::default(),
            standings: None,
            teams: Vec::new(),
            current_matchday: matchday.value,
            matchday_is_fallback: matchday.is_fallback(),
            degraded: true,
        }
    }
}
