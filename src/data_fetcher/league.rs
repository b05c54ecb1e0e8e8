//! The league data handle owning every cache

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{info, instrument, warn};

use super::api::{
    Fetcher, HttpFetcher, RetryingTransport, create_http_client, matches_path, teams_path,
};
use super::cache::{MatchIndex, ScorerCache, StandingsCache, TeamDirectory, loader};
use super::matchday::{MatchdayResolver, MatchdayState};
use super::models::{
    MatchId, MatchProjection, MatchdayListing, MatchesResponse, ScorerSnapshot, StandingsSnapshot,
    TeamMap, TeamsResponse,
};
use super::orchestrator::{self, BootstrapReport};
use super::processors::PageContext;
use crate::config::Config;
use crate::error::{AppError, UpstreamError};

/// Entry point for consumers of league data.
///
/// Built once at startup and shared by reference (usually behind an `Arc`);
/// all cache state lives inside it.
#[derive(Debug)]
pub struct LeagueData<F = HttpFetcher> {
    transport: Arc<RetryingTransport<F>>,
    resolver: MatchdayResolver<F>,
    matchday: OnceCell<MatchdayState>,
    teams: TeamDirectory,
    standings: StandingsCache,
    scorers: ScorerCache,
    matches: MatchIndex,
    competition: String,
    http_timeout: Duration,
    fallback_matchday: u32,
}

impl LeagueData<HttpFetcher> {
    /// Builds the handle with a reqwest-backed fetcher.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client(config)?;
        let fetcher = HttpFetcher::new(client, config.api_domain.clone());
        Ok(Self::with_fetcher(fetcher, config))
    }
}

impl<F: Fetcher> LeagueData<F> {
    pub fn with_fetcher(fetcher: F, config: &Config) -> Self {
        let transport = Arc::new(RetryingTransport::from_config(fetcher, config));
        let competition = config.competition.clone();
        let http_timeout = config.http_timeout();

        let teams = {
            let transport = Arc::clone(&transport);
            let path = teams_path(&competition);
            TeamDirectory::new(loader(move || {
                let transport = Arc::clone(&transport);
                let path = path.clone();
                async move {
                    let response: TeamsResponse = transport.fetch(&path, http_timeout).await?;
                    Ok(response.into_team_map())
                }
            }))
        };

        Self {
            resolver: MatchdayResolver::new(
                Arc::clone(&transport),
                &competition,
                http_timeout,
                config.fallback_matchday,
            ),
            matchday: OnceCell::new(),
            teams,
            standings: StandingsCache::new(
                Arc::clone(&transport),
                &competition,
                http_timeout,
                config.cache_ttl(),
            ),
            scorers: ScorerCache::new(
                Arc::clone(&transport),
                &competition,
                config.scorer_timeout(),
                config.cache_ttl(),
            ),
            matches: MatchIndex::new(),
            transport,
            competition,
            http_timeout,
            fallback_matchday: config.fallback_matchday,
        }
    }

    pub fn competition(&self) -> &str {
        &self.competition
    }

    pub fn transport(&self) -> &RetryingTransport<F> {
        &self.transport
    }

    pub fn team_directory(&self) -> &TeamDirectory {
        &self.teams
    }

    pub fn standings_cache(&self) -> &StandingsCache {
        &self.standings
    }

    pub fn scorer_cache(&self) -> &ScorerCache {
        &self.scorers
    }

    pub fn match_index(&self) -> &MatchIndex {
        &self.matches
    }

    pub async fn teams(&self) -> Result<Arc<TeamMap>, UpstreamError> {
        self.teams.get_teams().await
    }

    pub async fn standings(&self) -> Result<Arc<StandingsSnapshot>, UpstreamError> {
        self.standings.get().await
    }

    pub async fn scorers(&self) -> Result<Arc<ScorerSnapshot>, UpstreamError> {
        self.scorers.get().await
    }

    /// The process-wide matchday; the fallback until bootstrap has resolved it.
    pub fn current_matchday(&self) -> MatchdayState {
        self.matchday
            .get()
            .copied()
            .unwrap_or_else(|| MatchdayState::fallback(self.fallback_matchday))
    }

    /// Applies a request-scoped override without touching the process-wide value.
    pub fn effective_matchday(&self, override_matchday: Option<u32>) -> u32 {
        self.current_matchday().effective(override_matchday)
    }

    /// Resolves the current matchday on the first call only.
    pub(crate) async fn resolve_matchday(&self) -> MatchdayState {
        *self
            .matchday
            .get_or_init(|| self.resolver.resolve_once())
            .await
    }

    /// Fetches and projects one matchday's fixtures, then makes them the
    /// contents of the match index.
    ///
    /// A team directory failure only costs crests and venues; a fixture
    /// failure is returned and leaves the index as it was.
    #[instrument(skip(self))]
    pub async fn matchday_listing(
        &self,
        override_matchday: Option<u32>,
    ) -> Result<MatchdayListing, UpstreamError> {
        let matchday = self.effective_matchday(override_matchday);
        let path = matches_path(&self.competition, matchday);

        let (teams, response) = tokio::join!(
            self.teams.get_teams(),
            self.transport
                .fetch::<MatchesResponse>(&path, self.http_timeout)
        );
        let response = response?;
        let teams = teams.unwrap_or_else(|e| {
            warn!("Listing matchday {} without team directory: {}", matchday, e);
            Arc::new(TeamMap::new())
        });

        let matches: Vec<MatchProjection> = response
            .matches
            .iter()
            .map(|m| MatchProjection::project(m, &teams))
            .collect();
        self.matches.replace_all(matchday, matches.iter().cloned());

        info!("Listed {} matches for matchday {}", matches.len(), matchday);
        Ok(MatchdayListing {
            matchday,
            competition: response.competition,
            matches,
        })
    }

    /// Looks a match up in the most recent listing.
    pub fn match_by_id(&self, id: MatchId) -> Option<Arc<MatchProjection>> {
        self.matches.lookup(id)
    }

    /// Shared page data; degrades to an empty sidebar when standings or
    /// teams are unavailable.
    pub async fn page_context(&self) -> PageContext {
        let (teams, standings) = tokio::join!(self.teams(), self.standings());
        match (teams, standings) {
            (Ok(teams), Ok(standings)) => {
                PageContext::new(standings, &teams, self.current_matchday())
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("Page context degraded: {}", e);
                PageContext::degraded(self.current_matchday())
            }
        }
    }

    /// Warms the core once at startup. Never fails.
    pub async fn bootstrap(&self) -> BootstrapReport {
        orchestrator::bootstrap(self).await
    }
}
