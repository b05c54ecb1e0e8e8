use super::competition::CompetitionInfo;
use super::teams::{TeamId, TeamMap, TeamRef};
use crate::constants::UNKNOWN_VENUE;
use serde::{Deserialize, Serialize};

pub type MatchId = u64;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreLine {
    #[serde(default)]
    pub home: Option<u32>,
    #[serde(default)]
    pub away: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Score {
    #[serde(rename = "fullTime", default)]
    pub full_time: ScoreLine,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMatch {
    pub id: MatchId,
    #[serde(rename = "utcDate")]
    pub utc_date: String,
    pub status: String,
    #[serde(default)]
    pub matchday: Option<u32>,
    #[serde(rename = "homeTeam")]
    pub home_team: TeamRef,
    #[serde(rename = "awayTeam")]
    pub away_team: TeamRef,
    #[serde(default)]
    pub score: Score,
}

/// Response of `/competitions/{code}/matches?matchday={n}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesResponse {
    #[serde(default)]
    pub competition: CompetitionInfo,
    pub matches: Vec<ApiMatch>,
}

/// Render-ready view of one fixture, as stored in the match index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchProjection {
    pub id: MatchId,
    pub matchday: Option<u32>,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub home_team: String,
    pub away_team: String,
    pub home_crest: Option<String>,
    pub away_crest: Option<String>,
    pub venue: String,
    pub score_home: Option<u32>,
    pub score_away: Option<u32>,
    pub status: String,
    /// Kickoff date as `YYYY-MM-DD`, or the raw upstream value if unparsable.
    pub date: String,
    pub kickoff_utc: String,
}

impl MatchProjection {
    /// Projects an upstream fixture, taking crests and venue from the team directory.
    pub fn project(api_match: &ApiMatch, teams: &TeamMap) -> Self {
        let home = teams.get(&api_match.home_team.id);
        let away = teams.get(&api_match.away_team.id);

        Self {
            id: api_match.id,
            matchday: api_match.matchday,
            home_team_id: api_match.home_team.id,
            away_team_id: api_match.away_team.id,
            home_team: api_match.home_team.display_name().to_string(),
            away_team: api_match.away_team.display_name().to_string(),
            home_crest: home.and_then(|t| t.crest_url.clone()),
            away_crest: away.and_then(|t| t.crest_url.clone()),
            venue: home
                .and_then(|t| t.venue.clone())
                .unwrap_or_else(|| UNKNOWN_VENUE.to_string()),
            score_home: api_match.score.full_time.home,
            score_away: api_match.score.full_time.away,
            status: api_match.status.clone(),
            date: format_match_date(&api_match.utc_date),
            kickoff_utc: api_match.utc_date.clone(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == "FINISHED"
    }

    /// `"2 - 1"` once a score exists, `"-"` before kickoff.
    pub fn score_display(&self) -> String {
        match (self.score_home, self.score_away) {
            (Some(home), Some(away)) => format!("{home} - {away}"),
            _ => "-".to_string(),
        }
    }
}

fn format_match_date(utc_date: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(utc_date)
        .map(|dt| dt.with_timezone(&chrono::Utc).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| utc_date.to_string())
}

/// One computed fixture listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchdayListing {
    pub matchday: u32,
    pub competition: CompetitionInfo,
    pub matches: Vec<MatchProjection>,
}
