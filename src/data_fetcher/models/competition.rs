use serde::{Deserialize, Serialize};

/// Competition header included in standings, scorer and match payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitionInfo {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub emblem: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentSeason {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", default)]
    pub end_date: Option<String>,
    #[serde(rename = "currentMatchday", default)]
    pub current_matchday: Option<u32>,
}

/// Response of `/competitions/{code}`; only the current season matters here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionResponse {
    #[serde(flatten)]
    pub competition: CompetitionInfo,
    #[serde(rename = "currentSeason", default)]
    pub current_season: Option<CurrentSeason>,
}

impl CompetitionResponse {
    pub fn current_matchday(&self) -> Option<u32> {
        self.current_season
            .as_ref()
            .and_then(|season| season.current_matchday)
    }
}
