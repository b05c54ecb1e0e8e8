pub mod api;
pub mod cache;
pub mod league;
pub mod matchday;
pub mod models;
pub mod orchestrator;
pub mod processors;

pub use league::LeagueData;
pub use matchday::{MatchdaySource, MatchdayState, parse_matchday_override};
pub use orchestrator::BootstrapReport;
