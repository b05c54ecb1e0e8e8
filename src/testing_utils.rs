//! Test doubles and payload builders shared by unit and integration tests.

use crate::data_fetcher::api::Fetcher;
use crate::data_fetcher::models::{MatchProjection, TeamId};
use crate::error::UpstreamError;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// One scripted outcome of a [`ScriptedFetcher`] attempt.
#[derive(Debug, Clone)]
pub enum Step {
    Ok(String),
    Err(UpstreamError),
    /// Returns a timeout error immediately, without consuming time.
    Timeout,
    /// Sleeps for the given duration before producing the body.
    DelayedOk(Duration, String),
}

#[derive(Debug, Default)]
struct Script {
    steps: VecDeque<Step>,
    routes: HashMap<String, VecDeque<Step>>,
    calls: Vec<(String, Instant)>,
}

/// A [`Fetcher`] that replays scripted outcomes instead of touching the network.
///
/// Steps registered for an exact path via [`ScriptedFetcher::route`] are consumed
/// first; the last step of a route repeats once it is reached. Other paths
/// consume the shared queue, and an empty queue answers with `NoData`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFetcher {
    script: Arc<Mutex<Script>>,
    attempts: Arc<AtomicUsize>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, step: Step) {
        self.script().steps.push_back(step);
    }

    pub fn push_ok(&self, body: impl Into<String>) {
        self.push(Step::Ok(body.into()));
    }

    pub fn push_err(&self, error: UpstreamError) {
        self.push(Step::Err(error));
    }

    pub fn push_timeout(&self) {
        self.push(Step::Timeout);
    }

    pub fn push_delayed_ok(&self, delay: Duration, body: impl Into<String>) {
        self.push(Step::DelayedOk(delay, body.into()));
    }

    /// Appends a step for requests to exactly `path`.
    pub fn route(&self, path: impl Into<String>, step: Step) -> &Self {
        self.script()
            .routes
            .entry(path.into())
            .or_default()
            .push_back(step);
        self
    }

    /// Total attempts made across all paths.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Attempts made for exactly `path`.
    pub fn calls_to(&self, path: &str) -> usize {
        self.script().calls.iter().filter(|(p, _)| p == path).count()
    }

    /// Requested paths in attempt order.
    pub fn call_paths(&self) -> Vec<String> {
        self.script().calls.iter().map(|(p, _)| p.clone()).collect()
    }

    /// Start time of every attempt, relative to `origin`.
    pub fn attempt_offsets(&self, origin: Instant) -> Vec<Duration> {
        self.script()
            .calls
            .iter()
            .map(|(_, at)| at.duration_since(origin))
            .collect()
    }

    fn next_step(&self, path: &str) -> Option<Step> {
        let mut script = self.script();
        script.calls.push((path.to_string(), Instant::now()));
        if let Some(route) = script.routes.get_mut(path) {
            return if route.len() > 1 {
                route.pop_front()
            } else {
                route.front().cloned()
            };
        }
        script.steps.pop_front()
    }
}

impl Fetcher for ScriptedFetcher {
    async fn fetch_once(&self, path: &str, deadline: Duration) -> Result<String, UpstreamError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        match self.next_step(path) {
            Some(Step::Ok(body)) => Ok(body),
            Some(Step::Err(error)) => Err(error),
            Some(Step::Timeout) => Err(UpstreamError::timeout(path, deadline)),
            Some(Step::DelayedOk(delay, body)) => {
                tokio::time::sleep(delay).await;
                Ok(body)
            }
            None => Err(UpstreamError::no_data("script exhausted", path)),
        }
    }
}

/// Builders for upstream JSON payloads and projections.
pub struct TestDataBuilder;

impl TestDataBuilder {
    pub fn competition_json(current_matchday: Option<u32>) -> String {
        let matchday = current_matchday
            .map(|m| m.to_string())
            .unwrap_or_else(|| "null".to_string());
        format!(
            r#"{{
                "id": 2021,
                "name": "Premier League",
                "code": "PL",
                "emblem": "https://crests.example/PL.png",
                "currentSeason": {{"id": 2287, "currentMatchday": {matchday}}}
            }}"#
        )
    }

    /// Roster payload; every team with an even id has no crest.
    pub fn teams_json(teams: &[(TeamId, &str)]) -> String {
        let entries: Vec<String> = teams
            .iter()
            .map(|(id, name)| {
                let crest = if id % 2 == 0 {
                    "null".to_string()
                } else {
                    format!(r#""https://crests.example/{id}.png""#)
                };
                format!(
                    r#"{{"id": {id}, "name": "{name}", "shortName": "{name}", "tla": "T{id}", "crest": {crest}, "venue": "{name} Ground"}}"#
                )
            })
            .collect();
        format!(
            r#"{{"count": {}, "teams": [{}]}}"#,
            teams.len(),
            entries.join(",")
        )
    }

    /// Standings payload with one TOTAL table, teams in the given order.
    pub fn standings_json(team_ids: &[TeamId]) -> String {
        let rows: Vec<String> = team_ids
            .iter()
            .zip(1u32..)
            .map(|(id, position)| {
                let points = 60u32.saturating_sub(position * 3);
                format!(
                    r#"{{
                        "position": {position},
                        "team": {{"id": {id}, "name": "Team {id}", "shortName": "T{id}"}},
                        "playedGames": 25, "won": 15, "draw": 5, "lost": 5,
                        "points": {points}, "goalsFor": 40, "goalsAgainst": 20, "goalDifference": 20
                    }}"#
                )
            })
            .collect();
        format!(
            r#"{{
                "competition": {{"name": "Premier League", "code": "PL", "emblem": "pl.png"}},
                "standings": [{{"stage": "REGULAR_SEASON", "type": "TOTAL", "table": [{}]}}]
            }}"#,
            rows.join(",")
        )
    }

    /// Scorer payload; `(player_id, team_id, goals, assists)` in upstream order.
    pub fn scorers_json(scorers: &[(u64, TeamId, u32, u32)]) -> String {
        let entries: Vec<String> = scorers
            .iter()
            .map(|(player, team, goals, assists)| {
                format!(
                    r#"{{
                        "player": {{"id": {player}, "name": "Player {player}"}},
                        "team": {{"id": {team}, "name": "Team {team}"}},
                        "playedMatches": 20, "goals": {goals}, "assists": {assists}, "penalties": null
                    }}"#
                )
            })
            .collect();
        format!(
            r#"{{"competition": {{"name": "Premier League"}}, "scorers": [{}]}}"#,
            entries.join(",")
        )
    }

    /// Fixture payload; `(match_id, home_id, away_id)`, all finished 2-1.
    pub fn matches_json(matchday: u32, fixtures: &[(u64, TeamId, TeamId)]) -> String {
        let entries: Vec<String> = fixtures
            .iter()
            .map(|(id, home, away)| {
                format!(
                    r#"{{
                        "id": {id}, "utcDate": "2025-02-22T15:00:00Z", "status": "FINISHED",
                        "matchday": {matchday},
                        "homeTeam": {{"id": {home}, "name": "Team {home}"}},
                        "awayTeam": {{"id": {away}, "name": "Team {away}"}},
                        "score": {{"fullTime": {{"home": 2, "away": 1}}}}
                    }}"#
                )
            })
            .collect();
        format!(
            r#"{{"competition": {{"name": "Premier League", "emblem": "pl.png"}}, "matches": [{}]}}"#,
            entries.join(",")
        )
    }

    pub fn projection(id: u64) -> MatchProjection {
        MatchProjection {
            id,
            matchday: Some(1),
            home_team_id: 1,
            away_team_id: 2,
            home_team: "Home".to_string(),
            away_team: "Away".to_string(),
            home_crest: None,
            away_crest: None,
            venue: "Unknown".to_string(),
            score_home: None,
            score_away: None,
            status: "TIMED".to_string(),
            date: "2025-02-22".to_string(),
            kickoff_utc: "2025-02-22T15:00:00Z".to_string(),
        }
    }
}
