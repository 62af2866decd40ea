//! Keyed cache of list results with a staleness window.
//!
//! Each key remembers its last good data, when it arrived, the last error
//! and whether a fetch is in flight. Expiry never clears data: stale rows stay
//! visible while the next fetch runs. Every fetch is issued a [`Ticket`]; only
//! the newest ticket for a key may write its result.

use crate::{
    errors::Result,
    query::{QueryKey, QueryState, QueryStatus},
};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

/// How long fetched rows count as fresh unless configured otherwise.
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(30);

type Rows = Arc<dyn Any + Send + Sync>;

#[derive(Default)]
struct Entry {
    data: Option<Rows>,
    updated_at: Option<Instant>,
    error: Option<String>,
    is_fetching: bool,
    /// Newest ticket issued when the key was last invalidated
    invalidated_at: Option<u64>,
    issued: u64,
}

/// Proof that a fetch was started, and in which order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    key: QueryKey,
    generation: u64,
}

pub struct QueryCache {
    entries: RwLock<HashMap<QueryKey, Entry>>,
    stale_time: Duration,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("stale_time", &self.stale_time)
            .finish_non_exhaustive()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_TIME)
    }
}

impl QueryCache {
    #[must_use]
    pub fn new(stale_time: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stale_time,
        }
    }

    #[must_use]
    pub const fn stale_time(&self) -> Duration {
        self.stale_time
    }

    /// Fresh means: data present, not invalidated, and younger than the
    /// staleness window.
    pub async fn is_fresh(&self, key: QueryKey) -> bool {
        let entries = self.entries.read().await;
        entries.get(&key).is_some_and(|entry| {
            entry.data.is_some()
                && entry.invalidated_at.is_none()
                && entry
                    .updated_at
                    .is_some_and(|at| at.elapsed() < self.stale_time)
        })
    }

    /// Marks a fetch as started and hands out its ticket.
    pub async fn begin_fetch(&self, key: QueryKey) -> Ticket {
        let mut entries = self.entries.write().await;
        let entry = entries.entry(key).or_default();
        entry.issued += 1;
        entry.is_fetching = true;
        trace!("Issued ticket {} for {}", entry.issued, key.as_str());
        Ticket {
            key,
            generation: entry.issued,
        }
    }

    /// Applies a fetch result if `ticket` is still the newest for its key.
    ///
    /// Returns whether the result was applied. A failed fetch records the
    /// error and keeps the previous data.
    pub async fn complete<T>(&self, ticket: Ticket, result: Result<Vec<T>>) -> bool
    where
        T: Send + Sync + 'static,
    {
        let mut entries = self.entries.write().await;
        let entry = entries.entry(ticket.key).or_default();
        if entry.issued != ticket.generation {
            debug!(
                "Discarding superseded result for {} (ticket {}, newest {})",
                ticket.key.as_str(),
                ticket.generation,
                entry.issued
            );
            return false;
        }

        entry.is_fetching = false;
        match result {
            Ok(rows) => {
                debug!("Cached {} rows for {}", rows.len(), ticket.key.as_str());
                entry.data = Some(Arc::new(rows));
                entry.updated_at = Some(Instant::now());
                entry.error = None;
                // A fetch issued before the invalidation may predate the write
                if entry.invalidated_at.is_some_and(|at| ticket.generation > at) {
                    entry.invalidated_at = None;
                }
            }
            Err(e) => {
                warn!("Fetch of {} failed: {}", ticket.key.as_str(), e);
                entry.error = Some(e.to_string());
            }
        }
        true
    }

    /// Marks `key` stale so the next read refetches. Data stays visible, and
    /// only a fetch issued after this call makes the key fresh again.
    pub async fn invalidate(&self, key: QueryKey) {
        let mut entries = self.entries.write().await;
        let entry = entries.entry(key).or_default();
        entry.invalidated_at = Some(entry.issued);
        debug!("Invalidated {}", key.as_str());
    }

    /// Current state of `key` without touching the store.
    pub async fn snapshot<T>(&self, key: QueryKey) -> QueryState<T>
    where
        T: Send + Sync + 'static,
    {
        let entries = self.entries.read().await;
        let Some(entry) = entries.get(&key) else {
            return QueryState::default();
        };

        let data = entry
            .data
            .clone()
            .and_then(|rows| match rows.downcast::<Vec<T>>() {
                Ok(rows) => Some(rows),
                Err(_) => {
                    warn!("Cached rows for {} have an unexpected type", key.as_str());
                    None
                }
            });
        let status = match (&entry.error, &data) {
            (Some(message), _) => QueryStatus::Error(message.clone()),
            (None, Some(_)) => QueryStatus::Success,
            (None, None) => QueryStatus::Loading,
        };
        QueryState {
            status,
            data,
            is_fetching: entry.is_fetching,
            updated_at: entry.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;

    fn offline() -> Error {
        Error::Transport("connection refused".to_string())
    }

    #[tokio::test]
    async fn test_unknown_key_is_loading() {
        let cache = QueryCache::default();
        let state: QueryState<i32> = cache.snapshot(QueryKey::Products).await;
        assert_eq!(state.status, QueryStatus::Loading);
        assert!(state.data.is_none());
        assert!(!cache.is_fresh(QueryKey::Products).await);
    }

    #[tokio::test]
    async fn test_completed_fetch_is_fresh() {
        let cache = QueryCache::default();
        let ticket = cache.begin_fetch(QueryKey::Customers).await;
        assert!(cache.snapshot::<i32>(QueryKey::Customers).await.is_fetching);

        assert!(cache.complete(ticket, Ok(vec![1, 2, 3])).await);
        let state: QueryState<i32> = cache.snapshot(QueryKey::Customers).await;
        assert_eq!(state.status, QueryStatus::Success);
        assert_eq!(state.rows(), &[1, 2, 3]);
        assert!(!state.is_fetching);
        assert!(cache.is_fresh(QueryKey::Customers).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_data_goes_stale_but_is_kept() {
        let cache = QueryCache::new(Duration::from_secs(30));
        let ticket = cache.begin_fetch(QueryKey::Products).await;
        cache.complete(ticket, Ok(vec![1])).await;

        tokio::time::advance(Duration::from_secs(29)).await;
        assert!(cache.is_fresh(QueryKey::Products).await);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(!cache.is_fresh(QueryKey::Products).await);
        let state: QueryState<i32> = cache.snapshot(QueryKey::Products).await;
        assert_eq!(state.rows(), &[1]);
    }

    #[tokio::test]
    async fn test_invalidation_clears_freshness_not_data() {
        let cache = QueryCache::default();
        let ticket = cache.begin_fetch(QueryKey::SalesOrders).await;
        cache.complete(ticket, Ok(vec!["order"])).await;

        cache.invalidate(QueryKey::SalesOrders).await;
        assert!(!cache.is_fresh(QueryKey::SalesOrders).await);
        let state: QueryState<&str> = cache.snapshot(QueryKey::SalesOrders).await;
        assert_eq!(state.status, QueryStatus::Success);
        assert_eq!(state.rows(), &["order"]);
    }

    #[tokio::test]
    async fn test_fetch_in_flight_during_invalidation_stays_stale() {
        let cache = QueryCache::default();
        let in_flight = cache.begin_fetch(QueryKey::Products).await;
        cache.invalidate(QueryKey::Products).await;

        assert!(cache.complete(in_flight, Ok(vec![1])).await);
        assert!(!cache.is_fresh(QueryKey::Products).await);
        let state: QueryState<i32> = cache.snapshot(QueryKey::Products).await;
        assert_eq!(state.rows(), &[1]);

        let next = cache.begin_fetch(QueryKey::Products).await;
        cache.complete(next, Ok(vec![1, 2])).await;
        assert!(cache.is_fresh(QueryKey::Products).await);
    }

    #[tokio::test]
    async fn test_superseded_result_is_discarded() {
        let cache = QueryCache::default();
        let older = cache.begin_fetch(QueryKey::Products).await;
        let newer = cache.begin_fetch(QueryKey::Products).await;

        assert!(cache.complete(newer, Ok(vec![2])).await);
        assert!(!cache.complete(older, Ok(vec![1])).await);

        let state: QueryState<i32> = cache.snapshot(QueryKey::Products).await;
        assert_eq!(state.rows(), &[2]);
    }

    #[tokio::test]
    async fn test_older_result_waits_for_newest() {
        let cache = QueryCache::default();
        let older = cache.begin_fetch(QueryKey::Products).await;
        let newer = cache.begin_fetch(QueryKey::Products).await;

        assert!(!cache.complete(older, Ok(vec![1])).await);
        let state: QueryState<i32> = cache.snapshot(QueryKey::Products).await;
        assert!(state.is_fetching);
        assert!(state.data.is_none());

        cache.complete(newer, Ok(vec![2])).await;
        assert!(!cache.snapshot::<i32>(QueryKey::Products).await.is_fetching);
    }

    #[tokio::test]
    async fn test_error_keeps_previous_data() {
        let cache = QueryCache::default();
        let ticket = cache.begin_fetch(QueryKey::FinancialTransactions).await;
        cache.complete(ticket, Ok(vec![10])).await;

        let ticket = cache.begin_fetch(QueryKey::FinancialTransactions).await;
        cache.complete::<i32>(ticket, Err(offline())).await;

        let state: QueryState<i32> = cache.snapshot(QueryKey::FinancialTransactions).await;
        assert!(matches!(state.status, QueryStatus::Error(ref m) if m.contains("connection refused")));
        assert_eq!(state.rows(), &[10]);
    }

    #[tokio::test]
    async fn test_success_after_error_clears_it() {
        let cache = QueryCache::default();
        let ticket = cache.begin_fetch(QueryKey::Customers).await;
        cache.complete::<i32>(ticket, Err(offline())).await;
        assert!(matches!(
            cache.snapshot::<i32>(QueryKey::Customers).await.status,
            QueryStatus::Error(_)
        ));

        let ticket = cache.begin_fetch(QueryKey::Customers).await;
        cache.complete(ticket, Ok(vec![5])).await;
        assert_eq!(
            cache.snapshot::<i32>(QueryKey::Customers).await.status,
            QueryStatus::Success
        );
    }
}
