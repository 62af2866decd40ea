//! Query layer - cached list reads and the mutations that invalidate them.
//!
//! [`QueryClient`] is what pages talk to. A read serves fresh cached rows
//! without a store round-trip; otherwise it fetches, records the result in
//! the [`QueryCache`] and returns the resulting [`QueryState`].

use crate::{
    core::{
        customer::Customer, finance::FinancialTransaction, product::Product, sale::SalesOrder,
    },
    errors::Result,
    notify::Notifier,
    store::RemoteStore,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, instrument};

/// Keyed cache with tickets and a staleness window
pub mod cache;
/// Validated inserts with invalidation and notifications
pub mod mutations;

pub use cache::{DEFAULT_STALE_TIME, QueryCache, Ticket};

/// One cached list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Products,
    Customers,
    SalesOrders,
    FinancialTransactions,
}

impl QueryKey {
    pub const ALL: [Self; 4] = [
        Self::Products,
        Self::Customers,
        Self::SalesOrders,
        Self::FinancialTransactions,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Customers => "customers",
            Self::SalesOrders => "sales_orders",
            Self::FinancialTransactions => "financial_transactions",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStatus {
    /// No data and no error yet
    Loading,
    /// The last fetch failed with this message
    Error(String),
    Success,
}

/// What a page sees of one list.
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    pub status: QueryStatus,
    /// Last good rows; survive errors and expiry
    pub data: Option<Arc<Vec<T>>>,
    /// A fetch is in flight (possibly while stale data is shown)
    pub is_fetching: bool,
    pub updated_at: Option<Instant>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            status: QueryStatus::Loading,
            data: None,
            is_fetching: false,
            updated_at: None,
        }
    }
}

impl<T> QueryState<T> {
    /// The cached rows, empty while nothing has arrived.
    #[must_use]
    pub fn rows(&self) -> &[T] {
        self.data.as_deref().map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.status, QueryStatus::Loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            QueryStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Cached access to a [`RemoteStore`].
pub struct QueryClient<S> {
    store: Arc<S>,
    cache: QueryCache,
    notifier: Arc<dyn Notifier>,
}

impl<S: std::fmt::Debug> std::fmt::Debug for QueryClient<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("store", &self.store)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl<S: RemoteStore> QueryClient<S> {
    pub fn new(store: Arc<S>, stale_time: Duration, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            cache: QueryCache::new(stale_time),
            notifier,
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub async fn products(&self) -> QueryState<Product> {
        self.read(QueryKey::Products, || self.store.list_products())
            .await
    }

    pub async fn customers(&self) -> QueryState<Customer> {
        self.read(QueryKey::Customers, || self.store.list_customers())
            .await
    }

    pub async fn sales_orders(&self) -> QueryState<SalesOrder> {
        self.read(QueryKey::SalesOrders, || self.store.list_sales_orders())
            .await
    }

    pub async fn financial_transactions(&self) -> QueryState<FinancialTransaction> {
        self.read(QueryKey::FinancialTransactions, || {
            self.store.list_financial_transactions()
        })
        .await
    }

    /// Fetches `key` now, fresh or not. This is the retry behind an error
    /// section.
    #[instrument(skip(self), fields(key = key.as_str()))]
    pub async fn refetch(&self, key: QueryKey) {
        match key {
            QueryKey::Products => self.fetch(key, self.store.list_products()).await,
            QueryKey::Customers => self.fetch(key, self.store.list_customers()).await,
            QueryKey::SalesOrders => self.fetch(key, self.store.list_sales_orders()).await,
            QueryKey::FinancialTransactions => {
                self.fetch(key, self.store.list_financial_transactions())
                    .await;
            }
        }
    }

    /// Cached state of `key` without touching the store.
    pub async fn snapshot<T: Send + Sync + 'static>(&self, key: QueryKey) -> QueryState<T> {
        self.cache.snapshot(key).await
    }

    async fn read<T, F, Fut>(&self, key: QueryKey, list: F) -> QueryState<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        if self.cache.is_fresh(key).await {
            debug!("Serving {} from cache", key.as_str());
        } else {
            self.fetch(key, list()).await;
        }
        self.cache.snapshot(key).await
    }

    async fn fetch<T, Fut>(&self, key: QueryKey, request: Fut)
    where
        T: Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        let ticket = self.cache.begin_fetch(key).await;
        let result = request.await;
        self.cache.complete(ticket, result).await;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::seed;
    use crate::notify::NotificationLog;
    use crate::store::MemoryStore;

    fn client(store: Arc<MemoryStore>) -> QueryClient<MemoryStore> {
        QueryClient::new(store, DEFAULT_STALE_TIME, Arc::new(NotificationLog::new()))
    }

    #[tokio::test]
    async fn test_fresh_hit_does_not_call_store() {
        let store = Arc::new(MemoryStore::seeded());
        let client = client(Arc::clone(&store));

        let first = client.products().await;
        let second = client.products().await;
        assert_eq!(store.read_count(), 1);
        assert_eq!(first.rows(), second.rows());
        assert_eq!(second.rows(), seed::products().as_slice());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_read_refetches() {
        let store = Arc::new(MemoryStore::seeded());
        let client = client(Arc::clone(&store));

        client.customers().await;
        tokio::time::advance(DEFAULT_STALE_TIME + Duration::from_secs(1)).await;
        client.customers().await;
        assert_eq!(store.read_count(), 2);
    }

    #[tokio::test]
    async fn test_invalidation_forces_refetch() {
        let store = Arc::new(MemoryStore::seeded());
        let client = client(Arc::clone(&store));

        client.sales_orders().await;
        client.cache().invalidate(QueryKey::SalesOrders).await;
        client.sales_orders().await;
        assert_eq!(store.read_count(), 2);
    }

    #[tokio::test]
    async fn test_read_failure_is_error_state() {
        let store = Arc::new(MemoryStore::seeded());
        store.set_fail_reads(true);
        let client = client(Arc::clone(&store));

        let state = client.financial_transactions().await;
        assert!(state.error().is_some());
        assert!(state.rows().is_empty());
        assert!(!state.is_fetching);
    }

    #[tokio::test]
    async fn test_refetch_after_error_keeps_old_rows() {
        let store = Arc::new(MemoryStore::seeded());
        let client = client(Arc::clone(&store));
        client.products().await;

        store.set_fail_reads(true);
        client.refetch(QueryKey::Products).await;
        let state: QueryState<Product> = client.snapshot(QueryKey::Products).await;
        assert!(state.error().is_some());
        assert_eq!(state.rows().len(), 6);

        store.set_fail_reads(false);
        client.refetch(QueryKey::Products).await;
        let state: QueryState<Product> = client.snapshot(QueryKey::Products).await;
        assert_eq!(state.status, QueryStatus::Success);
    }

    #[tokio::test]
    async fn test_snapshot_does_not_touch_store() {
        let store = Arc::new(MemoryStore::seeded());
        let client = client(Arc::clone(&store));
        let state: QueryState<Customer> = client.snapshot(QueryKey::Customers).await;
        assert!(state.is_loading());
        assert_eq!(store.read_count(), 0);
    }
}
