//! Startup warm-up of the league data core

use std::fmt;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, instrument, warn};

use super::api::Fetcher;
use super::league::LeagueData;
use super::matchday::MatchdayState;

/// Outcome of [`bootstrap`]. Each failed step has already been logged.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapReport {
    pub matchday: MatchdayState,
    /// Number of teams loaded, or `None` when the directory load failed.
    pub team_count: Option<usize>,
    /// Number of scorers loaded, or `None` when the scorer load failed.
    pub scorer_count: Option<usize>,
    pub elapsed: Duration,
}

impl BootstrapReport {
    pub fn teams_warmed(&self) -> bool {
        self.team_count.is_some()
    }

    pub fn scorers_warmed(&self) -> bool {
        self.scorer_count.is_some()
    }

    /// True when every step produced real upstream data.
    pub fn is_complete(&self) -> bool {
        !self.matchday.is_fallback() && self.teams_warmed() && self.scorers_warmed()
    }
}

impl fmt::Display for BootstrapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = |c: Option<usize>| c.map_or_else(|| "failed".to_string(), |n| n.to_string());
        write!(
            f,
            "matchday {}, teams {}, scorers {} in {:?}",
            self.matchday,
            count(self.team_count),
            count(self.scorer_count),
            self.elapsed
        )
    }
}

/// Resolves the matchday, then warms the team directory, then the scorer cache.
///
/// Steps run in that order and a failing step never stops the next one; the
/// component's own policy (fallback or load on next call) covers it.
#[instrument(skip(league), fields(competition = %league.competition()))]
pub async fn bootstrap<F: Fetcher>(league: &LeagueData<F>) -> BootstrapReport {
    let started = Instant::now();
    info!("Bootstrapping league data");

    let matchday = league.resolve_matchday().await;

    let team_count = match league.teams().await {
        Ok(teams) => Some(teams.len()),
        Err(e) => {
            warn!("Bootstrap: team directory not warmed: {}", e);
            None
        }
    };

    let scorer_count = match league.scorers().await {
        Ok(scorers) => Some(scorers.entries.len()),
        Err(e) => {
            warn!("Bootstrap: scorer cache not warmed: {}", e);
            None
        }
    };

    let report = BootstrapReport {
        matchday,
        team_count,
        scorer_count,
        elapsed: started.elapsed(),
    };
    info!("Bootstrap finished: {}", report);
    report
}
