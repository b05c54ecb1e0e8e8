pub mod match_index;
pub mod scorer_cache;
pub mod standings_cache;
pub mod team_directory;
pub mod ttl_cache;
pub mod types;

pub use match_index::MatchIndex;
pub use scorer_cache::ScorerCache;
pub use standings_cache::StandingsCache;
pub use team_directory::TeamDirectory;
pub use ttl_cache::{Loader, TtlCache, loader};
pub use types::{CacheInfo, CachedSnapshot};
