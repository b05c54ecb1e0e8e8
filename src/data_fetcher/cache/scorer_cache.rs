//! Scorer leaderboard cache

use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use super::ttl_cache::{TtlCache, loader};
use super::types::{CacheInfo, CachedSnapshot};
use crate::data_fetcher::api::{Fetcher, RetryingTransport, scorers_path};
use crate::data_fetcher::models::{ScorerSnapshot, ScorersResponse};
use crate::error::UpstreamError;

/// Scorer leaderboard held for one TTL period.
///
/// The upstream scorer endpoint is slow, so its attempts get their own,
/// longer deadline.
#[derive(Debug, Clone)]
pub struct ScorerCache {
    inner: TtlCache<ScorerSnapshot>,
}

impl ScorerCache {
    pub fn new<F: Fetcher>(
        transport: Arc<RetryingTransport<F>>,
        competition: &str,
        deadline: Duration,
        ttl: Duration,
    ) -> Self {
        let path = scorers_path(competition);
        let load = loader(move || {
            let transport = Arc::clone(&transport);
            let path = path.clone();
            async move {
                let response: ScorersResponse = transport.fetch(&path, deadline).await?;
                Ok(ScorerSnapshot::from(response))
            }
        });
        Self {
            inner: TtlCache::new("scorers", ttl, load),
        }
    }

    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<Arc<ScorerSnapshot>, UpstreamError> {
        self.inner.get().await
    }

    pub async fn refresh(&self) -> Result<Arc<ScorerSnapshot>, UpstreamError> {
        self.inner.refresh().await
    }

    pub async fn last_known(&self) -> Option<CachedSnapshot<Arc<ScorerSnapshot>>> {
        self.inner.last_known().await
    }

    pub async fn invalidate(&self) {
        self.inner.invalidate().await
    }

    pub async fn info(&self) -> CacheInfo {
        self.inner.info().await
    }
}
