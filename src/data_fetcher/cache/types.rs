//! Cache data structures with TTL support

use std::time::Duration;
use tokio::time::Instant;

/// A value together with the instant it was fetched.
///
/// Only constructed after a successful fetch, so `fetched_at` never moves
/// on a failed refresh.
#[derive(Debug, Clone)]
pub struct CachedSnapshot<T> {
    pub value: T,
    pub fetched_at: Instant,
}

impl<T> CachedSnapshot<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
        }
    }

    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }

    /// Fresh while strictly younger than `ttl`.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }

    /// Gets the remaining time until the snapshot goes stale
    pub fn time_until_expiry(&self, ttl: Duration) -> Duration {
        ttl.saturating_sub(self.age())
    }
}

/// Point-in-time view of a TTL cache, for logging and `--cache-stats`.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheInfo {
    pub name: &'static str,
    pub has_value: bool,
    pub is_fresh: bool,
    pub age: Option<Duration>,
    pub ttl: Duration,
    pub fetch_in_flight: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_freshness_boundary() {
        let ttl = Duration::from_secs(3600);
        let snapshot = CachedSnapshot::new(42);
        assert!(snapshot.is_fresh(ttl));

        tokio::time::advance(Duration::from_secs(3599)).await;
        assert!(snapshot.is_fresh(ttl));
        assert_eq!(snapshot.time_until_expiry(ttl), Duration::from_secs(1));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(!snapshot.is_fresh(ttl));
        assert_eq!(snapshot.time_until_expiry(ttl), Duration::ZERO);
        assert_eq!(snapshot.age(), ttl);
    }
}
