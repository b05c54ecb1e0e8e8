//! Current-matchday resolution with a constant fallback

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::data_fetcher::api::{Fetcher, RetryingTransport, competition_path};
use crate::data_fetcher::models::CompetitionResponse;

/// Where the process-wide matchday came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchdaySource {
    /// Read from the competition's current season.
    Resolved,
    /// The configured constant, used because resolution failed.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchdayState {
    pub value: u32,
    pub source: MatchdaySource,
}

impl MatchdayState {
    pub fn resolved(value: u32) -> Self {
        Self {
            value,
            source: MatchdaySource::Resolved,
        }
    }

    pub fn fallback(value: u32) -> Self {
        Self {
            value,
            source: MatchdaySource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == MatchdaySource::Fallback
    }

    /// The matchday to use for one request: the override when given and
    /// non-zero, else this state.
    pub fn effective(&self, override_matchday: Option<u32>) -> u32 {
        override_matchday
            .filter(|&matchday| matchday > 0)
            .unwrap_or(self.value)
    }
}

impl fmt::Display for MatchdayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            MatchdaySource::Resolved => write!(f, "{}", self.value),
            MatchdaySource::Fallback => write!(f, "{} (fallback)", self.value),
        }
    }
}

/// Resolves the competition's current matchday.
#[derive(Debug)]
pub struct MatchdayResolver<F> {
    transport: Arc<RetryingTransport<F>>,
    path: String,
    deadline: Duration,
    fallback: u32,
}

impl<F: Fetcher> MatchdayResolver<F> {
    pub fn new(
        transport: Arc<RetryingTransport<F>>,
        competition: &str,
        deadline: Duration,
        fallback: u32,
    ) -> Self {
        Self {
            transport,
            path: competition_path(competition),
            deadline,
            fallback,
        }
    }

    /// Never fails: any upstream error, or a payload without a current
    /// matchday, yields the fallback and a warning.
    #[instrument(skip(self), fields(path = %self.path))]
    pub async fn resolve_once(&self) -> MatchdayState {
        match self
            .transport
            .fetch::<CompetitionResponse>(&self.path, self.deadline)
            .await
        {
            Ok(response) => match response.current_matchday().filter(|m| *m > 0) {
                Some(matchday) => {
                    info!("Resolved current matchday: {}", matchday);
                    MatchdayState::resolved(matchday)
                }
                None => {
                    warn!(
                        "Competition payload has no current matchday, using fallback {}",
                        self.fallback
                    );
                    MatchdayState::fallback(self.fallback)
                }
            },
            Err(e) => {
                warn!(
                    "Failed to resolve current matchday, using fallback {}: {}",
                    self.fallback, e
                );
                MatchdayState::fallback(self.fallback)
            }
        }
    }
}

/// Parses a request-scoped matchday such as a `?matchday=` query value.
///
/// Blank, non-numeric and zero values are ignored so the request falls back
/// to the process-wide matchday.
pub fn parse_matchday_override(raw: Option<&str>) -> Option<u32> {
    let raw = raw?.trim();
    match raw.parse::<u32>() {
        Ok(0) | Err(_) => {
            if !raw.is_empty() {
                debug!("Ignoring invalid matchday override: {:?}", raw);
            }
            None
        }
        Ok(matchday) => Some(matchday),
    }
}
