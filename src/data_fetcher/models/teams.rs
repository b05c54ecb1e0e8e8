use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type TeamId = u64;

/// Team lookup keyed by upstream team id.
pub type TeamMap = HashMap<TeamId, TeamRecord>;

/// Short team reference embedded in standings, scorer and match payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: TeamId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "shortName", default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub crest: Option<String>,
}

impl TeamRef {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("TBD")
    }
}

/// Team entry of `/competitions/{code}/teams`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTeam {
    pub id: TeamId,
    pub name: String,
    #[serde(rename = "shortName", default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub crest: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamsResponse {
    pub teams: Vec<ApiTeam>,
}

/// Team metadata served by the team directory. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRecord {
    pub id: TeamId,
    pub name: String,
    pub short_name: String,
    pub crest_url: Option<String>,
    pub venue: Option<String>,
}

impl From<ApiTeam> for TeamRecord {
    fn from(team: ApiTeam) -> Self {
        let short_name = team.short_name.unwrap_or_else(|| team.name.clone());
        Self {
            id: team.id,
            name: team.name,
            short_name,
            crest_url: team.crest,
            venue: team.venue,
        }
    }
}

impl TeamsResponse {
    /// Builds the id-keyed directory; a repeated id keeps the last entry.
    pub fn into_team_map(self) -> TeamMap {
        self.teams
            .into_iter()
            .map(|team| (team.id, TeamRecord::from(team)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teams_response_into_map() {
        let json = r#"{
            "count": 2,
            "teams": [
                {
                    "id": 57,
                    "name": "Arsenal FC",
                    "shortName": "Arsenal",
                    "tla": "ARS",
                    "crest": "https://crests.football-data.org/57.png",
                    "venue": "Emirates Stadium"
                },
                {
                    "id": 1044,
                    "name": "AFC Bournemouth",
                    "crest": null,
                    "venue": null
                }
            ]
        }"#;
        let response: TeamsResponse = serde_json::from_str(json).unwrap();
        let map = response.into_team_map();

        assert_eq!(map.len(), 2);
        let arsenal = &map[&57];
        assert_eq!(arsenal.short_name, "Arsenal");
        assert_eq!(arsenal.venue.as_deref(), Some("Emirates Stadium"));

        let bournemouth = &map[&1044];
        assert_eq!(bournemouth.short_name, "AFC Bournemouth");
        assert_eq!(bournemouth.crest_url, None);
        assert_eq!(bournemouth.venue, None);
    }

    #[test]
    fn test_team_ref_display_name() {
        let team = TeamRef {
            id: 1,
            name: None,
            short_name: None,
            crest: None,
        };
        assert_eq!(team.display_name(), "TBD");
    }
}
