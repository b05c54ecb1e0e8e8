//! Load-once team directory

use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, instrument, warn};

use super::ttl_cache::Loader;
use crate::data_fetcher::models::TeamMap;
use crate::error::UpstreamError;

/// Team roster keyed by team id, loaded on first use and kept for the life
/// of the process.
///
/// The directory never refreshes and has no TTL: rosters only change between
/// seasons, and a restart picks up a new one. Concurrent first callers share
/// a single load. A failed load leaves the directory empty, so the next
/// caller tries again.
#[derive(Clone)]
pub struct TeamDirectory {
    cell: Arc<OnceCell<Arc<TeamMap>>>,
    loader: Loader<TeamMap>,
}

impl fmt::Debug for TeamDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeamDirectory")
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}

impl TeamDirectory {
    pub fn new(loader: Loader<TeamMap>) -> Self {
        Self {
            cell: Arc::new(OnceCell::new()),
            loader,
        }
    }

    #[instrument(skip(self))]
    pub async fn get_teams(&self) -> Result<Arc<TeamMap>, UpstreamError> {
        let teams = self
            .cell
            .get_or_try_init(|| async {
                match (self.loader)().await {
                    Ok(teams) => {
                        info!("Team directory loaded with {} teams", teams.len());
                        Ok(Arc::new(teams))
                    }
                    Err(e) => {
                        warn!("Team directory load failed: {}", e);
                        Err(e)
                    }
                }
            })
            .await?;
        Ok(Arc::clone(teams))
    }

    /// The loaded directory, if any, without triggering a load.
    pub fn loaded(&self) -> Option<Arc<TeamMap>> {
        self.cell.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::cache::ttl_cache::loader;
    use crate::data_fetcher::models::TeamRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn roster() -> TeamMap {
        let mut teams = TeamMap::new();
        teams.insert(
            57,
            TeamRecord {
                id: 57,
                name: "Arsenal FC".to_string(),
                short_name: "Arsenal".to_string(),
                crest_url: None,
                venue: Some("Emirates Stadium".to_string()),
            },
        );
        teams
    }

    /// Fails the first `failures` loads, then succeeds.
    fn counting_directory(failures: usize) -> (TeamDirectory, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let directory = TeamDirectory::new(loader(move || {
            let call = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                tokio::time::sleep(Duration::from_millis(100)).await;
                if call < failures {
                    Err(UpstreamError::timeout("/competitions/PL/teams", Duration::from_secs(10)))
                } else {
                    Ok(roster())
                }
            }
        }));
        (directory, calls)
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_calls_load_once_regardless_of_time() {
        let (directory, calls) = counting_directory(0);

        let first = directory.get_teams().await.unwrap();
        tokio::time::advance(Duration::from_secs(60 * 60 * 24 * 30)).await;
        let second = directory.get_teams().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_first_calls_share_one_load() {
        let (directory, calls) = counting_directory(0);

        let results = futures::future::join_all((0..10).map(|_| directory.get_teams())).await;

        assert!(results.iter().all(|r| r.as_ref().is_ok_and(|t| t.len() == 1)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_load_is_retried_on_next_call() {
        let (directory, calls) = counting_directory(1);

        let err = directory.get_teams().await.unwrap_err();
        assert!(err.is_timeout());
        assert!(!directory.is_loaded());
        assert!(directory.loaded().is_none());

        let teams = directory.get_teams().await.unwrap();
        assert_eq!(teams[&57].short_name, "Arsenal");
        assert!(directory.is_loaded());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
