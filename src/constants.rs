//! Application-wide constants and configuration defaults
//!
//! Every tunable the config file can override has its default here.

/// Base URL of the upstream football data API
pub const DEFAULT_API_DOMAIN: &str = "https://api.football-data.org/v4";

/// Competition code used for every upstream request (Premier League)
pub const DEFAULT_COMPETITION: &str = "PL";

/// Header carrying the upstream API token
pub const AUTH_HEADER: &str = "x-auth-token";

/// Per-attempt deadline for ordinary upstream requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;

/// Per-attempt deadline for the scorer leaderboard, which is slow upstream
pub const SCORER_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 16;

/// Matchday used when the current one cannot be resolved at startup
pub const FALLBACK_MATCHDAY: u32 = 25;

/// Crest shown for teams missing from the team directory
pub const DEFAULT_CREST: &str = "/img/default-crest.png";

/// Venue shown when the home team has no known ground
pub const UNKNOWN_VENUE: &str = "Unknown";

/// TTL for the standings and scorer snapshots in seconds (1 hour)
pub const CACHE_TTL_SECONDS: u64 = 3600;

/// Retry configuration
pub mod retry {
    /// Maximum number of attempts for one logical upstream request
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Linear backoff step; attempt `n` waits `n * BACKOFF_STEP_SECONDS`
    pub const BACKOFF_STEP_SECONDS: u64 = 2;
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for API domain override
    pub const API_DOMAIN: &str = "KICKOFF_API_DOMAIN";

    /// Environment variable for the upstream API token
    pub const API_TOKEN: &str = "KICKOFF_API_TOKEN";

    /// Legacy token variable, read when `KICKOFF_API_TOKEN` is unset
    pub const LEGACY_API_KEY: &str = "API_KEY";

    /// Environment variable for competition code override
    pub const COMPETITION: &str = "KICKOFF_COMPETITION";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "KICKOFF_LOG_FILE";

    /// Environment variable for the default per-attempt timeout in seconds
    pub const HTTP_TIMEOUT: &str = "KICKOFF_HTTP_TIMEOUT";

    /// Environment variable for the scorer endpoint timeout in seconds
    pub const SCORER_TIMEOUT: &str = "KICKOFF_SCORER_TIMEOUT";
}

/// Name of the log file inside the log directory
pub const LOG_FILE_NAME: &str = "kickoff_corner.log";
