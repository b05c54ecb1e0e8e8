//! HTTP client creation and configuration utilities

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::config::Config;
use crate::constants::{AUTH_HEADER, HTTP_POOL_MAX_IDLE_PER_HOST};
use crate::error::AppError;

/// Creates the upstream HTTP client with connection pooling, the auth header
/// and a client-level timeout.
///
/// The client timeout is the larger of the two configured deadlines; each
/// request also sets its own per-attempt timeout, which takes precedence.
///
/// # Errors
/// * `AppError::Config` - The API token is not a valid header value
/// * `AppError::HttpClient` - The TLS backend could not be initialized
pub fn create_http_client(config: &Config) -> Result<Client, AppError> {
    let mut headers = HeaderMap::new();
    if !config.api_token.is_empty() {
        let mut token = HeaderValue::from_str(&config.api_token)
            .map_err(|e| AppError::config_error(format!("Invalid API token: {e}")))?;
        token.set_sensitive(true);
        headers.insert(AUTH_HEADER, token);
    }

    let client = Client::builder()
        .default_headers(headers)
        .timeout(config.http_timeout().max(config.scorer_timeout()))
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE_PER_HOST)
        .build()?;
    Ok(client)
}
