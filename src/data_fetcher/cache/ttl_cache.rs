//! Single-snapshot TTL cache with request coalescing

use futures::future::{BoxFuture, FutureExt, Shared};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::types::{CacheInfo, CachedSnapshot};
use crate::error::UpstreamError;

/// Type-erased upstream load used by the caches.
pub type Loader<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, UpstreamError>> + Send + Sync>;

/// Wraps a loader closure into a [`Loader`].
pub fn loader<T, F, Fut>(load: F) -> Loader<T>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, UpstreamError>> + Send + 'static,
{
    Arc::new(move || load().boxed())
}

type Flight<T> = Shared<BoxFuture<'static, Result<Arc<T>, UpstreamError>>>;

struct State<T> {
    snapshot: Option<CachedSnapshot<Arc<T>>>,
    in_flight: Option<Flight<T>>,
}

/// Holds one snapshot that is served while younger than `ttl`.
///
/// A stale or missing snapshot triggers a load. Concurrent callers that miss
/// at the same time share a single in-flight load. A successful load replaces
/// the snapshot and its timestamp together; a failed load leaves the previous
/// snapshot untouched and hands the error to every waiting caller. Failures
/// are not cached, so the next call loads again.
///
/// Each load runs on a spawned task, so it finishes and stores its result
/// even when every caller waiting on it has given up. The state lock is only
/// held to inspect or update the slots, never across the upstream call.
pub struct TtlCache<T> {
    name: &'static str,
    ttl: Duration,
    loader: Loader<T>,
    state: Arc<Mutex<State<T>>>,
}

impl<T> Clone for TtlCache<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            ttl: self.ttl,
            loader: Arc::clone(&self.loader),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> fmt::Debug for TtlCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("name", &self.name)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl<T: Send + Sync + 'static> TtlCache<T> {
    pub fn new(name: &'static str, ttl: Duration, loader: Loader<T>) -> Self {
        Self {
            name,
            ttl,
            loader,
            state: Arc::new(Mutex::new(State {
                snapshot: None,
                in_flight: None,
            })),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the held value while fresh, otherwise loads (or joins a load).
    pub async fn get(&self) -> Result<Arc<T>, UpstreamError> {
        let flight = {
            let mut state = self.state.lock().await;
            if let Some(snapshot) = &state.snapshot
                && snapshot.is_fresh(self.ttl)
            {
                debug!(
                    "Cache hit for {} (age {:?}, ttl {:?})",
                    self.name,
                    snapshot.age(),
                    self.ttl
                );
                return Ok(Arc::clone(&snapshot.value));
            }
            debug!("Cache miss for {}", self.name);
            self.join_or_start(&mut state)
        };
        flight.await
    }

    /// Loads regardless of freshness. Joins a load that is already running.
    pub async fn refresh(&self) -> Result<Arc<T>, UpstreamError> {
        let flight = {
            let mut state = self.state.lock().await;
            self.join_or_start(&mut state)
        };
        flight.await
    }

    /// The held snapshot, fresh or stale, without any upstream call.
    pub async fn last_known(&self) -> Option<CachedSnapshot<Arc<T>>> {
        self.state.lock().await.snapshot.clone()
    }

    /// Drops the held snapshot so the next `get` loads.
    pub async fn invalidate(&self) {
        let mut state = self.state.lock().await;
        if state.snapshot.take().is_some() {
            info!("Invalidated {} cache", self.name);
        }
    }

    pub async fn info(&self) -> CacheInfo {
        let state = self.state.lock().await;
        CacheInfo {
            name: self.name,
            has_value: state.snapshot.is_some(),
            is_fresh: state
                .snapshot
                .as_ref()
                .is_some_and(|s| s.is_fresh(self.ttl)),
            age: state.snapshot.as_ref().map(CachedSnapshot::age),
            ttl: self.ttl,
            fetch_in_flight: state.in_flight.is_some(),
        }
    }

    fn join_or_start(&self, state: &mut State<T>) -> Flight<T> {
        if let Some(flight) = &state.in_flight {
            debug!("Joining in-flight load for {}", self.name);
            return flight.clone();
        }

        let load = (self.loader)();
        let shared_state = Arc::clone(&self.state);
        let name = self.name;

        // The load runs on its own task so it completes even if every waiter
        // is dropped.
        let task = tokio::spawn(async move {
            let result = load.await.map(Arc::new);
            let mut state = shared_state.lock().await;
            state.in_flight = None;
            match &result {
                Ok(value) => {
                    state.snapshot = Some(CachedSnapshot::new(Arc::clone(value)));
                    info!("Stored fresh {} snapshot", name);
                }
                Err(e) => {
                    warn!(
                        "Load for {} failed, keeping previous snapshot (held: {}): {}",
                        name,
                        state.snapshot.is_some(),
                        e
                    );
                }
            }
            result
        });

        let task_state = Arc::clone(&self.state);
        let flight = async move {
            match task.await {
                Ok(result) => result,
                Err(join_error) => {
                    error!("Load task for {} did not complete: {}", name, join_error);
                    task_state.lock().await.in_flight = None;
                    Err(UpstreamError::request(
                        format!("{name} load task failed: {join_error}"),
                        name,
                    ))
                }
            }
        }
        .boxed()
        .shared();

        state.in_flight = Some(flight.clone());
        flight
    }
}
