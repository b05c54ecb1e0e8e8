//! KickOff Corner league data core
//!
//! Fetches standings, team metadata, scorer leaderboards and per-matchday
//! fixtures from a football-data.org style API and keeps them in explicit,
//! concurrency-safe caches so many page renders can share them.
//!
//! - [`data_fetcher::api::RetryingTransport`] retries timed-out attempts with linear backoff
//! - [`data_fetcher::cache::TeamDirectory`] loads the roster once per process
//! - [`data_fetcher::cache::StandingsCache`] and [`data_fetcher::cache::ScorerCache`]
//!   hold one-hour snapshots and coalesce concurrent misses
//! - [`data_fetcher::matchday`] resolves the current matchday with a fallback
//! - [`data_fetcher::cache::MatchIndex`] holds the most recent fixture listing
//! - [`LeagueData`] owns all of the above and runs the startup bootstrap
//!
//! # Examples
//!
//! ```rust,no_run
//! use kickoff_corner::{AppError, Config, LeagueData};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let league = LeagueData::from_config(&config)?;
//!
//!     let report = league.bootstrap().await;
//!     println!("Bootstrap: {report}");
//!
//!     let listing = league.matchday_listing(None).await?;
//!     for m in &listing.matches {
//!         println!("{} {} {} {}", m.date, m.home_team, m.score_display(), m.away_team);
//!     }
//!
//!     if let Some(first) = listing.matches.first() {
//!         let detail = league.match_by_id(first.id);
//!         assert!(detail.is_some());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::models::{MatchProjection, MatchdayListing, ScorerSnapshot, StandingsSnapshot};
pub use data_fetcher::{BootstrapReport, LeagueData, MatchdayState};
pub use error::{AppError, UpstreamError};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
