//! Retrying upstream transport with per-attempt deadlines and linear backoff

use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

use super::fetch_utils::{Fetcher, HttpFetcher, parse_payload};
use crate::config::Config;
use crate::error::UpstreamError;

/// Issues one logical upstream request, retrying timed-out attempts.
///
/// Policy:
/// - at most `max_attempts` attempts
/// - only [`UpstreamErrorKind::Timeout`](crate::error::UpstreamErrorKind) is retried;
///   any other error is returned after the attempt that produced it
/// - after timed-out attempt `n` (1-indexed) the transport waits `n * backoff_step`
/// - every attempt gets its own deadline, measured from that attempt's start
#[derive(Debug)]
pub struct RetryingTransport<F = HttpFetcher> {
    fetcher: F,
    max_attempts: u32,
    backoff_step: Duration,
}

impl<F: Fetcher> RetryingTransport<F> {
    pub fn new(fetcher: F, max_attempts: u32, backoff_step: Duration) -> Self {
        Self {
            fetcher,
            max_attempts: max_attempts.max(1),
            backoff_step,
        }
    }

    /// Builds a transport using the retry settings from `config`.
    pub fn from_config(fetcher: F, config: &Config) -> Self {
        Self::new(fetcher, config.max_retries, config.backoff_step())
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Fetches `path` and returns the raw body of the first successful attempt.
    #[instrument(skip(self))]
    pub async fn fetch_raw(&self, path: &str, deadline: Duration) -> Result<String, UpstreamError> {
        let mut attempt = 1u32;
        loop {
            info!("Attempt {}/{} for {}", attempt, self.max_attempts, path);

            let result = match tokio::time::timeout(deadline, self.fetcher.fetch_once(path, deadline))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(UpstreamError::timeout(path, deadline)),
            };

            match result {
                Ok(body) => return Ok(body),
                Err(e) if e.is_timeout() && attempt < self.max_attempts => {
                    let wait = self.backoff_step * attempt;
                    warn!(
                        "Timeout for {}. Retrying in {:?} (attempt {}/{})",
                        path, wait, attempt, self.max_attempts
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!(
                        "Giving up on {} after attempt {}/{}: {}",
                        path, attempt, self.max_attempts, e
                    );
                    return Err(e);
                }
            }
        }
    }

    /// Fetches `path` and decodes the body as `T`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        deadline: Duration,
    ) -> Result<T, UpstreamError> {
        let body = self.fetch_raw(path, deadline).await?;
        parse_payload(&body, path)
    }
}
