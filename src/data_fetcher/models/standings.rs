use super::competition::CompetitionInfo;
use super::teams::{TeamId, TeamRef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    pub position: u32,
    pub team: TeamRef,
    #[serde(rename = "playedGames")]
    pub played_games: u32,
    pub won: u32,
    #[serde(default)]
    pub draw: u32,
    pub lost: u32,
    pub points: u32,
    #[serde(rename = "goalsFor")]
    pub goals_for: u32,
    #[serde(rename = "goalsAgainst")]
    pub goals_against: u32,
    #[serde(rename = "goalDifference", default)]
    pub goal_difference: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingGroup {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub table: Vec<TableRow>,
}

/// Response of `/competitions/{code}/standings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsResponse {
    #[serde(default)]
    pub competition: CompetitionInfo,
    pub standings: Vec<StandingGroup>,
}

impl StandingsResponse {
    /// The overall table: the `TOTAL` group when present, otherwise the first one.
    pub fn total_table(&self) -> Option<&StandingGroup> {
        self.standings
            .iter()
            .find(|group| group.kind.as_deref() == Some("TOTAL"))
            .or_else(|| self.standings.first())
    }
}

/// One row of the league table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingRow {
    pub position: u32,
    pub team_id: TeamId,
    pub team_name: String,
    pub crest: Option<String>,
    pub played: u32,
    pub won: u32,
    pub draw: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
}

impl From<&TableRow> for StandingRow {
    fn from(row: &TableRow) -> Self {
        Self {
            position: row.position,
            team_id: row.team.id,
            team_name: row.team.display_name().to_string(),
            crest: row.team.crest.clone(),
            played: row.played_games,
            won: row.won,
            draw: row.draw,
            lost: row.lost,
            goals_for: row.goals_for,
            goals_against: row.goals_against,
            goal_difference: row
                .goal_difference
                .unwrap_or(row.goals_for as i32 - row.goals_against as i32),
            points: row.points,
        }
    }
}

/// Standings as held by the standings cache, in table order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingsSnapshot {
    pub competition: CompetitionInfo,
    pub rows: Vec<StandingRow>,
}

impl StandingsSnapshot {
    /// Maps the upstream payload; `None` when the payload has no table or
    /// the table has no rows.
    pub fn from_response(response: &StandingsResponse) -> Option<Self> {
        let table = response
            .total_table()
            .filter(|group| !group.table.is_empty())?;
        Some(Self {
            competition: response.competition.clone(),
            rows: table.table.iter().map(StandingRow::from).collect(),
        })
    }

    pub fn team_ids(&self) -> impl Iterator<Item = TeamId> + '_ {
        self.rows.iter().map(|row| row.team_id)
    }
}
