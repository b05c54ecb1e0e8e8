use crate::constants::{self, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the league data core.
/// Handles loading, saving, and managing settings for the upstream client and caches.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the upstream API, including the version prefix.
    #[serde(default = "default_api_domain")]
    pub api_domain: String,
    /// Token sent in the `X-Auth-Token` header.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_token: String,
    /// Competition code used in every upstream path.
    #[serde(default = "default_competition")]
    pub competition: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// Per-attempt deadline in seconds for ordinary requests.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Per-attempt deadline in seconds for the scorer leaderboard.
    #[serde(default = "default_scorer_timeout")]
    pub scorer_timeout_seconds: u64,
    /// Maximum attempts per logical upstream request.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Linear backoff step in seconds between timed-out attempts.
    #[serde(default = "default_backoff_step")]
    pub backoff_step_seconds: u64,
    /// TTL in seconds for the standings and scorer snapshots.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,
    /// Matchday used when the current one cannot be resolved.
    #[serde(default = "default_fallback_matchday")]
    pub fallback_matchday: u32,
}

fn default_api_domain() -> String {
    constants::DEFAULT_API_DOMAIN.to_string()
}

fn default_competition() -> String {
    constants::DEFAULT_COMPETITION.to_string()
}

fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_scorer_timeout() -> u64 {
    constants::SCORER_HTTP_TIMEOUT_SECONDS
}

fn default_max_retries() -> u32 {
    constants::retry::MAX_ATTEMPTS
}

fn default_backoff_step() -> u64 {
    constants::retry::BACKOFF_STEP_SECONDS
}

fn default_cache_ttl() -> u64 {
    constants::CACHE_TTL_SECONDS
}

fn default_fallback_matchday() -> u32 {
    constants::FALLBACK_MATCHDAY
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_domain: default_api_domain(),
            api_token: String::new(),
            competition: default_competition(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            scorer_timeout_seconds: default_scorer_timeout(),
            max_retries: default_max_retries(),
            backoff_step_seconds: default_backoff_step(),
            cache_ttl_seconds: default_cache_ttl(),
            fallback_matchday: default_fallback_matchday(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// Missing files are not an error: defaults apply and environment
    /// variables fill in the rest.
    ///
    /// # Environment Variables
    /// - `KICKOFF_API_DOMAIN` - Override API domain
    /// - `KICKOFF_API_TOKEN` (or legacy `API_KEY`) - Upstream API token
    /// - `KICKOFF_COMPETITION` - Override competition code
    /// - `KICKOFF_LOG_FILE` - Override log file path
    /// - `KICKOFF_HTTP_TIMEOUT` - Default per-attempt timeout in seconds (default: 10)
    /// - `KICKOFF_SCORER_TIMEOUT` - Scorer endpoint timeout in seconds (default: 30)
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded and validated configuration
    /// * `Err(AppError)` - Unreadable file, invalid TOML, or failed validation
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides on top of file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_domain) = std::env::var(env_vars::API_DOMAIN) {
            self.api_domain = api_domain;
        }

        if let Ok(token) = std::env::var(env_vars::API_TOKEN)
            .or_else(|_| std::env::var(env_vars::LEGACY_API_KEY))
        {
            self.api_token = token;
        }

        if let Ok(competition) = std::env::var(env_vars::COMPETITION) {
            self.competition = competition;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }

        if let Some(timeout) = std::env::var(env_vars::SCORER_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.scorer_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    pub fn scorer_timeout(&self) -> Duration {
        Duration::from_secs(self.scorer_timeout_seconds)
    }

    pub fn backoff_step(&self) -> Duration {
        Duration::from_secs(self.backoff_step_seconds)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Token with everything but the last four characters hidden.
    pub fn masked_token(&self) -> String {
        let chars: Vec<char> = self.api_token.chars().collect();
        if chars.is_empty() {
            return "(not set)".to_string();
        }
        let visible = chars.len().min(4);
        let hidden = chars.len() - visible;
        let tail: String = chars[hidden..].iter().collect();
        format!("{}{tail}", "*".repeat(hidden))
    }

    /// Displays current configuration settings to stdout.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if !Path::new(&config_path).exists() {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
            println!("(Defaults and environment variables are in effect)");
        }

        let config = Config::load().await?;
        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        println!("────────────────────────────────────");
        println!("API Domain:");
        println!("{}", config.api_domain);
        println!("API Token:");
        println!("{}", config.masked_token());
        println!("Competition:");
        println!("{}", config.competition);
        println!("────────────────────────────────────");
        println!("Timeouts:");
        println!(
            "{} seconds (scorers: {} seconds), {} attempts",
            config.http_timeout_seconds, config.scorer_timeout_seconds, config.max_retries
        );
        println!("Cache TTL:");
        println!("{} seconds", config.cache_ttl_seconds);
        println!("Fallback Matchday:");
        println!("{}", config.fallback_matchday);
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/{}", constants::LOG_FILE_NAME);
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if needed and normalizes the API domain
    /// to an `https://` URL without a trailing slash.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let to_save = Config {
            api_domain: normalize_api_domain(&self.api_domain),
            ..self.clone()
        };
        let content = toml::to_string_pretty(&to_save)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without env overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Ensures an `https://` prefix and strips trailing slashes.
fn normalize_api_domain(api_domain: &str) -> String {
    let trimmed = api_domain.trim().trim_end_matches('/');
    if trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed.trim_start_matches("http://"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_matches_constants() {
        let config = Config::default();
        assert_eq!(config.api_domain, "https://api.football-data.org/v4");
        assert_eq!(config.competition, "PL");
        assert_eq!(config.http_timeout(), Duration::from_secs(10));
        assert_eq!(config.scorer_timeout(), Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.backoff_step(), Duration::from_secs(2));
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.fallback_matchday, 25);
    }

    #[tokio::test]
    async fn test_config_load_minimal_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
api_token = "abc123"
"#;
        tokio::fs::write(&config_path, config_content)
            .await
            .unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.api_token, "abc123");
        assert_eq!(config.api_domain, "https://api.football-data.org/v4");
        assert_eq!(config.cache_ttl_seconds, 3600);
        assert_eq!(config.log_file_path, None);
    }

    #[tokio::test]
    async fn test_config_load_full_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
api_domain = "https://api.example.com/v4"
api_token = "secret"
competition = "BL1"
log_file_path = "/custom/log/path"
http_timeout_seconds = 5
scorer_timeout_seconds = 20
max_retries = 4
backoff_step_seconds = 1
cache_ttl_seconds = 600
fallback_matchday = 12
"#;
        tokio::fs::write(&config_path, config_content)
            .await
            .unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.api_domain, "https://api.example.com/v4");
        assert_eq!(config.competition, "BL1");
        assert_eq!(config.log_file_path, Some("/custom/log/path".to_string()));
        assert_eq!(config.http_timeout_seconds, 5);
        assert_eq!(config.scorer_timeout_seconds, 20);
        assert_eq!(config.max_retries, 4);
        assert_eq!(config.backoff_step_seconds, 1);
        assert_eq!(config.cache_ttl_seconds, 600);
        assert_eq!(config.fallback_matchday, 12);
    }

    #[tokio::test]
    async fn test_config_load_invalid_toml() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "api_domain = [unclosed")
            .await
            .unwrap();

        let result = Config::load_from_path(&config_path.to_string_lossy()).await;
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[tokio::test]
    async fn test_config_load_from_nonexistent_path() {
        let result = Config::load_from_path("/definitely/not/here/config.toml").await;
        assert!(matches!(result.unwrap_err(), AppError::Io(_)));
    }

    #[tokio::test]
    async fn test_config_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let original = Config {
            api_domain: "http://api.example.com/v4/".to_string(),
            api_token: "token".to_string(),
            log_file_path: Some("/custom/log/path".to_string()),
            ..Config::default()
        };
        original.save_to_path(&config_path_str).await.unwrap();
        assert!(config_path.exists());

        let loaded = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded.api_domain, "https://api.example.com/v4");
        assert_eq!(loaded.api_token, "token");
        assert_eq!(loaded.log_file_path, original.log_file_path);
        assert_eq!(loaded.cache_ttl_seconds, original.cache_ttl_seconds);
    }

    #[tokio::test]
    async fn test_config_without_token_omits_field() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config = Config::default();
        config
            .save_to_path(&config_path.to_string_lossy())
            .await
            .unwrap();
        let content = tokio::fs::read_to_string(&config_path).await.unwrap();
        assert!(!content.contains("api_token"), "Content: {content}");
        assert!(!content.contains("log_file_path"), "Content: {content}");
    }

    #[test]
    fn test_masked_token() {
        let mut config = Config::default();
        assert_eq!(config.masked_token(), "(not set)");
        config.api_token = "abcdef123456".to_string();
        assert_eq!(config.masked_token(), "********3456");
        config.api_token = "abc".to_string();
        assert_eq!(config.masked_token(), "abc");
    }

    #[test]
    fn test_normalize_api_domain() {
        assert_eq!(
            normalize_api_domain("api.example.com/v4"),
            "https://api.example.com/v4"
        );
        assert_eq!(
            normalize_api_domain("https://api.example.com/v4/"),
            "https://api.example.com/v4"
        );
    }

    #[test]
    #[serial]
    fn test_environment_variable_override() {
        unsafe {
            std::env::set_var("KICKOFF_API_DOMAIN", "https://env.example.com");
            std::env::remove_var("KICKOFF_API_TOKEN");
            std::env::set_var("API_KEY", "legacy-token");
            std::env::set_var("KICKOFF_HTTP_TIMEOUT", "7");
            std::env::set_var("KICKOFF_SCORER_TIMEOUT", "not-a-number");
        }

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.api_domain, "https://env.example.com");
        assert_eq!(config.api_token, "legacy-token");
        assert_eq!(config.http_timeout_seconds, 7);
        assert_eq!(config.scorer_timeout_seconds, 30);

        unsafe {
            std::env::set_var("KICKOFF_API_TOKEN", "primary-token");
        }
        config.apply_env_overrides();
        assert_eq!(config.api_token, "primary-token");

        unsafe {
            std::env::remove_var("KICKOFF_API_DOMAIN");
            std::env::remove_var("KICKOFF_API_TOKEN");
            std::env::remove_var("API_KEY");
            std::env::remove_var("KICKOFF_HTTP_TIMEOUT");
            std::env::remove_var("KICKOFF_SCORER_TIMEOUT");
        }
    }
}
