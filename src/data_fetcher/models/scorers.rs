use super::competition::CompetitionInfo;
use super::teams::{TeamId, TeamRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type PlayerId = u64;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPlayer {
    pub id: PlayerId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiScorer {
    pub player: ApiPlayer,
    pub team: TeamRef,
    #[serde(rename = "playedMatches", default)]
    pub played_matches: u32,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: Option<u32>,
    #[serde(default)]
    pub penalties: Option<u32>,
}

/// Response of `/competitions/{code}/scorers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorersResponse {
    #[serde(default)]
    pub competition: CompetitionInfo,
    pub scorers: Vec<ApiScorer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorerEntry {
    pub player_id: PlayerId,
    /// 1-based position in the upstream ordering.
    pub rank: u32,
    pub player_name: String,
    pub team_id: TeamId,
    pub team_name: String,
    pub team_crest: Option<String>,
    pub matches_played: u32,
    pub goals: u32,
    pub assists: u32,
    pub penalties: u32,
}

impl ScorerEntry {
    pub fn stat(&self, stat: LeaderStat) -> u32 {
        match stat {
            LeaderStat::Goals => self.goals,
            LeaderStat::Assists => self.assists,
            LeaderStat::Penalties => self.penalties,
            LeaderStat::Matches => self.matches_played,
        }
    }
}

/// Scorer leaderboard as held by the scorer cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorerSnapshot {
    pub competition: CompetitionInfo,
    pub entries: Vec<ScorerEntry>,
}

impl From<ScorersResponse> for ScorerSnapshot {
    fn from(response: ScorersResponse) -> Self {
        let entries = response
            .scorers
            .into_iter()
            .zip(1u32..)
            .map(|(scorer, rank)| ScorerEntry {
                player_id: scorer.player.id,
                rank,
                player_name: scorer.player.name,
                team_id: scorer.team.id,
                team_name: scorer.team.display_name().to_string(),
                team_crest: scorer.team.crest,
                matches_played: scorer.played_matches,
                goals: scorer.goals,
                assists: scorer.assists.unwrap_or(0),
                penalties: scorer.penalties.unwrap_or(0),
            })
            .collect();

        Self {
            competition: response.competition,
            entries,
        }
    }
}

impl ScorerSnapshot {
    /// Entries sorted by `stat`, highest first. Ties keep upstream order.
    pub fn leaders(&self, stat: LeaderStat) -> Vec<ScorerEntry> {
        let mut leaders = self.entries.clone();
        leaders.sort_by(|a, b| b.stat(stat).cmp(&a.stat(stat)));
        leaders
    }
}

/// Statistic a leaderboard can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeaderStat {
    #[default]
    Goals,
    Assists,
    Penalties,
    Matches,
}

impl LeaderStat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goals => "goals",
            Self::Assists => "assists",
            Self::Penalties => "penalties",
            Self::Matches => "matches",
        }
    }

    /// Parses a query value, falling back to goals for anything unknown.
    pub fn from_query(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for LeaderStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaderStat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "goals" => Ok(Self::Goals),
            "assists" => Ok(Self::Assists),
            "penalties" => Ok(Self::Penalties),
            "matches" => Ok(Self::Matches),
            other => Err(format!("unknown leaderboard stat: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> ScorersResponse {
        let json = r#"{
            "count": 3,
            "competition": {"name": "Premier League", "emblem": "pl.png"},
            "scorers": [
                {
                    "player": {"id": 1, "name": "Mohamed Salah"},
                    "team": {"id": 64, "name": "Liverpool FC", "crest": "64.png"},
                    "playedMatches": 26, "goals": 23, "assists": 13, "penalties": 6
                },
                {
                    "player": {"id": 2, "name": "Erling Haaland"},
                    "team": {"id": 65, "name": "Manchester City FC"},
                    "playedMatches": 25, "goals": 19, "assists": null, "penalties": 3
                },
                {
                    "player": {"id": 3, "name": "Bryan Mbeumo"},
                    "team": {"id": 402, "name": "Brentford FC"},
                    "playedMatches": 26, "goals": 15, "assists": 4
                }
            ]
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_rank_is_derived_from_order() {
        let snapshot = ScorerSnapshot::from(sample_response());
        let ranks: Vec<u32> = snapshot.entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(snapshot.entries[1].assists, 0);
        assert_eq!(snapshot.entries[2].penalties, 0);
        assert_eq!(snapshot.competition.name, "Premier League");
    }

    #[test]
    fn test_leaders_sorted_by_stat() {
        let snapshot = ScorerSnapshot::from(sample_response());

        let by_assists: Vec<PlayerId> = snapshot
            .leaders(LeaderStat::Assists)
            .iter()
            .map(|e| e.player_id)
            .collect();
        assert_eq!(by_assists, vec![1, 3, 2]);

        // Ties on matches played keep upstream order
        let by_matches: Vec<PlayerId> = snapshot
            .leaders(LeaderStat::Matches)
            .iter()
            .map(|e| e.player_id)
            .collect();
        assert_eq!(by_matches, vec![1, 3, 2]);
    }

    #[test]
    fn test_leader_stat_from_query() {
        assert_eq!(LeaderStat::from_query(None), LeaderStat::Goals);
        assert_eq!(LeaderStat::from_query(Some("Assists")), LeaderStat::Assists);
        assert_eq!(LeaderStat::from_query(Some("bogus")), LeaderStat::Goals);
        assert_eq!(LeaderStat::Penalties.to_string(), "penalties");
    }
}
