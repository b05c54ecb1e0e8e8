//! Standings snapshot cache

use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use super::ttl_cache::{TtlCache, loader};
use super::types::{CacheInfo, CachedSnapshot};
use crate::data_fetcher::api::{Fetcher, RetryingTransport, standings_path};
use crate::data_fetcher::models::{StandingsResponse, StandingsSnapshot};
use crate::error::UpstreamError;

/// League table held for one TTL period.
#[derive(Debug, Clone)]
pub struct StandingsCache {
    inner: TtlCache<StandingsSnapshot>,
}

impl StandingsCache {
    pub fn new<F: Fetcher>(
        transport: Arc<RetryingTransport<F>>,
        competition: &str,
        deadline: Duration,
        ttl: Duration,
    ) -> Self {
        let path = standings_path(competition);
        let load = loader(move || {
            let transport = Arc::clone(&transport);
            let path = path.clone();
            async move {
                let response: StandingsResponse = transport.fetch(&path, deadline).await?;
                StandingsSnapshot::from_response(&response)
                    .ok_or_else(|| UpstreamError::no_data("Standings payload has no table", path))
            }
        });
        Self {
            inner: TtlCache::new("standings", ttl, load),
        }
    }

    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<Arc<StandingsSnapshot>, UpstreamError> {
        self.inner.get().await
    }

    pub async fn refresh(&self) -> Result<Arc<StandingsSnapshot>, UpstreamError> {
        self.inner.refresh().await
    }

    pub async fn last_known(&self) -> Option<CachedSnapshot<Arc<StandingsSnapshot>>> {
        self.inner.last_known().await
    }

    pub async fn invalidate(&self) {
        self.inner.invalidate().await
    }

    pub async fn info(&self) -> CacheInfo {
        self.inner.info().await
    }
}
