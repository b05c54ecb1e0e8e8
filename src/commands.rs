use crate::cli::Args;
use kickoff_corner::config::Config;
use kickoff_corner::data_fetcher::models::{
    LeaderStat, MatchProjection, MatchdayListing, ScorerSnapshot, StandingsSnapshot,
};
use kickoff_corner::data_fetcher::{LeagueData, parse_matchday_override};
use kickoff_corner::error::AppError;
use std::path::Path;
use tracing::{info, warn};

const RULE: &str = "────────────────────────────────────────────────────────────";

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await
}

/// Handles configuration update commands (--set-api-domain, --set-api-token,
/// --set-log-file, --clear-log-file).
///
/// Starts from the saved file, not the environment, so env overrides are
/// never written back.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let config_path = Config::get_config_path();
    let mut config = if Path::new(&config_path).exists() {
        Config::load_from_path(&config_path).await?
    } else {
        Config::default()
    };

    if let Some(new_domain) = &args.new_api_domain {
        config.api_domain = new_domain.clone();
    }

    if let Some(new_token) = &args.new_api_token {
        config.api_token = new_token.trim().to_string();
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");

    Ok(())
}

/// Bootstraps the core and prints the requested view.
pub async fn handle_view_command(args: &Args, league: &LeagueData) -> Result<(), AppError> {
    let report = league.bootstrap().await;
    if !report.is_complete() {
        warn!("Running with partial data: {}", report);
    }

    if args.standings {
        let standings = league.standings().await?;
        print!("{}", format_standings(&standings));
    }

    if args.scorers {
        let scorers = league.scorers().await?;
        print!("{}", format_leaderboard(&scorers, args.stat));
    }

    let wants_listing = args.match_id.is_some() || !(args.standings || args.scorers);
    if wants_listing {
        let override_matchday = parse_matchday_override(args.matchday.as_deref());
        let listing = league.matchday_listing(override_matchday).await?;

        match args.match_id {
            Some(match_id) => {
                let found = league
                    .match_by_id(match_id)
                    .ok_or_else(|| AppError::match_not_found(match_id))?;
                print!("{}", format_match_detail(&found));
            }
            None => print!("{}", format_listing(&listing)),
        }
    }

    if args.cache_stats {
        print_cache_stats(league).await;
    }

    info!("Done");
    Ok(())
}

async fn print_cache_stats(league: &LeagueData) {
    println!("{RULE}");
    for cache in [
        league.standings_cache().info().await,
        league.scorer_cache().info().await,
    ] {
        println!(
            "{:<10} held={} fresh={} age={:?} ttl={:?}",
            cache.name, cache.has_value, cache.is_fresh, cache.age, cache.ttl
        );
    }
    println!(
        "{:<10} loaded={}",
        "teams",
        league.team_directory().is_loaded()
    );
    println!(
        "{:<10} generation={} matchday={:?} matches={}",
        "matches",
        league.match_index().generation(),
        league.match_index().matchday(),
        league.match_index().len()
    );
}

pub fn format_standings(standings: &StandingsSnapshot) -> String {
    let mut out = format!("{}\n{RULE}\n", standings.competition.name);
    out.push_str(&format!(
        "{:>3} {:<28} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4}\n",
        "#", "Team", "P", "W", "D", "L", "GD", "Pts"
    ));
    for row in &standings.rows {
        out.push_str(&format!(
            "{:>3} {:<28} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4}\n",
            row.position,
            row.team_name,
            row.played,
            row.won,
            row.draw,
            row.lost,
            row.goal_difference,
            row.points
        ));
    }
    out
}

pub fn format_leaderboard(scorers: &ScorerSnapshot, stat: LeaderStat) -> String {
    let mut out = format!("{} - top {}\n{RULE}\n", scorers.competition.name, stat);
    for entry in scorers.leaders(stat) {
        out.push_str(&format!(
            "{:>3} {:<24} {:<24} {:>4}\n",
            entry.rank,
            entry.player_name,
            entry.team_name,
            entry.stat(stat)
        ));
    }
    out
}

pub fn format_listing(listing: &MatchdayListing) -> String {
    let mut out = format!(
        "{} - matchday {}\n{RULE}\n",
        listing.competition.name, listing.matchday
    );
    if listing.matches.is_empty() {
        out.push_str("No matches\n");
    }
    for m in &listing.matches {
        out.push_str(&format!(
            "{:>8} {} {:>22} {:^7} {:<22} {}\n",
            m.id,
            m.date,
            m.home_team,
            m.score_display(),
            m.away_team,
            m.status
        ));
    }
    out
}

pub fn format_match_detail(m: &MatchProjection) -> String {
    format!(
        "{} vs {}\n{RULE}\nScore:   {}\nStatus:  {}\nDate:    {}\nVenue:   {}\n",
        m.home_team,
        m.away_team,
        m.score_display(),
        m.status,
        m.date,
        m.venue
    )
}
