// src/main.rs
mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Args, is_config_command};
use kickoff_corner::config::Config;
use kickoff_corner::data_fetcher::LeagueData;
use kickoff_corner::error::AppError;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    if args.list_config {
        return commands::handle_list_config_command().await;
    }

    if is_config_command(&args) {
        return commands::handle_config_update_command(&args).await;
    }

    let config = Config::load().await?;

    // Keep the guard alive until main returns
    let (log_file_path, _guard) = logging::setup_logging(&args, &config).await?;
    info!(
        "Logging to {}; upstream {} competition {}",
        log_file_path, config.api_domain, config.competition
    );

    if config.api_token.is_empty() {
        warn!("No API token configured; the upstream will likely reject requests");
    }

    let league = LeagueData::from_config(&config)?;
    commands::handle_view_command(&args, &league).await
}
