pub mod competition;
pub mod matches;
pub mod scorers;
pub mod standings;
pub mod teams;

pub use competition::{CompetitionInfo, CompetitionResponse, CurrentSeason};
pub use matches::{ApiMatch, MatchId, MatchProjection, MatchdayListing, MatchesResponse, Score, ScoreLine};
pub use scorers::{ApiPlayer, ApiScorer, LeaderStat, PlayerId, ScorerEntry, ScorerSnapshot, ScorersResponse};
pub use standings::{StandingGroup, StandingRow, StandingsResponse, StandingsSnapshot, TableRow};
pub use teams::{ApiTeam, TeamId, TeamMap, TeamRecord, TeamRef, TeamsResponse};
