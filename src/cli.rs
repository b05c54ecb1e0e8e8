use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use kickoff_corner::data_fetcher::models::LeaderStat;

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Config-only invocations never touch the upstream API.
pub fn is_config_command(args: &Args) -> bool {
    args.list_config
        || args.new_api_domain.is_some()
        || args.new_api_token.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
}

/// KickOff Corner league data
///
/// Fetches Premier League data from football-data.org through a retrying,
/// caching client and prints it. Without any view flag, the fixtures of the
/// current matchday are listed.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Matchday to list instead of the current one. Invalid values are ignored.
    #[arg(long, short = 'm', help_heading = "Views")]
    pub matchday: Option<String>,

    /// Print the league table.
    #[arg(long, short = 's', help_heading = "Views")]
    pub standings: bool,

    /// Print the scorer leaderboard.
    #[arg(long, help_heading = "Views")]
    pub scorers: bool,

    /// Statistic the leaderboard is ordered by: goals, assists, penalties or matches.
    #[arg(long, default_value_t = LeaderStat::Goals, help_heading = "Views")]
    pub stat: LeaderStat,

    /// Show one match of the listed matchday by id.
    #[arg(long = "match-id", help_heading = "Views")]
    pub match_id: Option<u64>,

    /// Print cache state after the run.
    #[arg(long = "cache-stats", help_heading = "Views")]
    pub cache_stats: bool,

    /// Update the API base URL in config.
    #[arg(long = "set-api-domain", value_name = "URL", help_heading = "Configuration")]
    pub new_api_domain: Option<String>,

    /// Update the API token in config.
    #[arg(long = "set-api-token", value_name = "TOKEN", help_heading = "Configuration")]
    pub new_api_token: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,

    /// Log only to the log file, not to the terminal.
    #[arg(long, short = 'q', help_heading = "Debug")]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_views() {
        let args = Args::parse_from(["kickoff_corner", "--scorers", "--stat", "assists", "-q"]);
        assert!(args.scorers);
        assert_eq!(args.stat, LeaderStat::Assists);
        assert!(args.quiet);
        assert!(!is_config_command(&args));
    }

    #[test]
    fn test_matchday_is_kept_raw() {
        let args = Args::parse_from(["kickoff_corner", "--matchday", "abc"]);
        assert_eq!(args.matchday.as_deref(), Some("abc"));
        assert_eq!(args.stat, LeaderStat::Goals);
    }

    #[test]
    fn test_config_commands() {
        let args = Args::parse_from(["kickoff_corner", "--set-api-token", "secret"]);
        assert!(is_config_command(&args));
        let args = Args::parse_from(["kickoff_corner", "--clear-log-file"]);
        assert!(is_config_command(&args));
    }
}
