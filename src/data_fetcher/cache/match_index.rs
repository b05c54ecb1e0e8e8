//! Full-replace index of the most recently computed fixture listing

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

use crate::data_fetcher::models::{MatchId, MatchProjection};

#[derive(Debug, Default)]
struct Generation {
    matches: HashMap<MatchId, Arc<MatchProjection>>,
    matchday: Option<u32>,
    number: u64,
}

/// Maps match id to projection for the listing currently on screen.
///
/// Each [`MatchIndex::replace_all`] discards every previous entry; there is no
/// TTL and no merging across listings.
#[derive(Debug, Clone, Default)]
pub struct MatchIndex {
    current: Arc<RwLock<Generation>>,
}

impl MatchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole index with `matches`.
    ///
    /// # Arguments
    /// * `matchday` - The matchday the listing was computed for
    /// * `matches` - Projections of that listing; a repeated id keeps the last one
    ///
    /// # Returns
    /// * `u64` - The generation number now being served
    ///
    /// # Example
    /// ```
    /// use kickoff_corner::data_fetcher::cache::MatchIndex;
    ///
    /// let index = MatchIndex::new();
    /// assert_eq!(index.replace_all(26, Vec::new()), 1);
    /// assert!(index.is_empty());
    /// ```
    pub fn replace_all(&self, matchday: u32, matches: impl IntoIterator<Item = MatchProjection>) -> u64 {
        let matches: HashMap<MatchId, Arc<MatchProjection>> = matches
            .into_iter()
            .map(|projection| (projection.id, Arc::new(projection)))
            .collect();
        let count = matches.len();

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let number = current.number + 1;
        *current = Generation {
            matches,
            matchday: Some(matchday),
            number,
        };

        info!(
            "Match index replaced: generation={}, matchday={}, matches={}",
            number, matchday, count
        );
        number
    }

    /// Looks up `id` in the current generation only.
    pub fn lookup(&self, id: MatchId) -> Option<Arc<MatchProjection>> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        let found = current.matches.get(&id).cloned();
        if found.is_none() {
            debug!(
                "Match {} not in index generation {}",
                id, current.number
            );
        }
        found
    }

    pub fn len(&self) -> usize {
        self.read().matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().matches.is_empty()
    }

    /// Number of listings installed so far; 0 before the first one.
    pub fn generation(&self) -> u64 {
        self.read().number
    }

    /// Matchday of the current listing.
    pub fn matchday(&self) -> Option<u32> {
        self.read().matchday
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Generation> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }
}
