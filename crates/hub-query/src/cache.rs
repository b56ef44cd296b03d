//! Deduplicating query cache using moka
//!
//! Provides keyed caching of fetched values with:
//! - At most one in-flight fetch per key (concurrent callers share it)
//! - Per-key observation channels for subscribers
//! - Invalidation by key or by scope
//! - Optional time-based expiration (TTL)
//!
//! A key's channel lives while it has observers, a cached value or a fetch
//! in flight. Channels of unobserved keys are dropped when their fetch
//! fails, when they are invalidated and when moka evicts their value, so
//! distinct keys never accumulate.

use crate::error::FetchError;
use crate::key::QueryKey;
use crate::options::{FetchOptions, RetryPolicy};
use crate::status::{QueryResult, QueryStatus};
use dashmap::DashMap;
use moka::future::Cache;
use moka::notification::RemovalCause;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

type Snapshot<V> = QueryResult<V, FetchError>;
type Channels<V> = Arc<DashMap<QueryKey, Arc<watch::Sender<Snapshot<V>>>>>;

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached values
    pub entry_count: u64,
    /// Fetches actually started
    pub fetch_count: u64,
    /// Calls answered from the cache
    pub hit_count: u64,
    /// Keys with an observation channel
    pub observed_keys: usize,
}

#[derive(Debug, Default)]
struct Counters {
    fetches: AtomicU64,
    hits: AtomicU64,
}

/// Keyed query cache
///
/// Cloning is cheap; clones share the same entries and channels.
#[derive(Clone)]
pub struct QueryCache<V> {
    inner: Cache<QueryKey, V>,
    channels: Channels<V>,
    counters: Arc<Counters>,
}

impl<V> QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create new cache with max capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self::build(max_capacity, None)
    }

    /// Create cache with time-based expiration
    #[inline]
    #[must_use]
    pub fn with_ttl(max_capacity: u64, ttl: Duration) -> Self {
        Self::build(max_capacity, Some(ttl))
    }

    fn build(max_capacity: u64, ttl: Option<Duration>) -> Self {
        let channels: Channels<V> = Arc::new(DashMap::new());
        let evicted = Arc::clone(&channels);
        let mut builder = Cache::builder()
            .max_capacity(max_capacity)
            .eviction_listener(move |key: Arc<QueryKey>, _value: V, cause: RemovalCause| {
                // Explicit removals are handled by `invalidate` and `refetch`.
                if cause.was_evicted() {
                    evicted.remove_if(&*key, |_, sender| sender.receiver_count() == 0);
                }
            });
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            inner: builder.build(),
            channels,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Return the cached value for `key`, or fetch it.
    ///
    /// Concurrent calls for the same key while a fetch is pending wait on
    /// that fetch instead of starting another. Errors are returned to every
    /// waiting caller and are not cached, so the next call fetches again.
    /// Disabled queries return `Idle` without calling `fetch`.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: QueryKey,
        options: &FetchOptions<V>,
        fetch: F,
    ) -> QueryResult<V, FetchError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<V, FetchError>>,
    {
        if !options.enabled {
            tracing::trace!(%key, "query disabled");
            return QueryResult::idle();
        }

        if let Some(value) = self.inner.get(&key).await {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            return QueryResult::success(value);
        }

        let publisher = self.publisher(&key);
        let init = async {
            self.counters.fetches.fetch_add(1, Ordering::Relaxed);
            publisher.send_modify(|snapshot| {
                *snapshot = std::mem::take(snapshot).into_loading();
            });
            tracing::debug!(%key, "fetching");
            fetch_with_retry(&key, options.retry, &fetch).await
        };

        let outcome = self.inner.try_get_with(key.clone(), init).await;

        // Only the first waiter to settle moves the channel out of Loading.
        match outcome {
            Ok(value) => {
                let published = value.clone();
                publisher.send_if_modified(move |snapshot| {
                    if snapshot.status() != QueryStatus::Loading {
                        return false;
                    }
                    *snapshot = QueryResult::success(published);
                    true
                });
                QueryResult::success(value)
            }
            Err(error) => {
                let error = FetchError::clone(&error);
                tracing::debug!(%key, %error, "fetch failed");
                let published = error.clone();
                publisher.send_if_modified(move |snapshot| {
                    if snapshot.status() != QueryStatus::Loading {
                        return false;
                    }
                    *snapshot = QueryResult::failed(published);
                    true
                });
                // Nothing is cached, so an unobserved failure leaves no trace.
                self.channels.remove_if(&key, |_, sender| {
                    Arc::ptr_eq(sender, &publisher) && sender.receiver_count() == 0
                });
                QueryResult::failed(error)
            }
        }
    }

    /// Drop the cached value and fetch again, keeping the previous data
    /// visible to observers while the new request is in flight.
    pub async fn refetch<F, Fut>(
        &self,
        key: QueryKey,
        options: &FetchOptions<V>,
        fetch: F,
    ) -> QueryResult<V, FetchError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<V, FetchError>>,
    {
        self.inner.invalidate(&key).await;
        self.get_or_fetch(key, options, fetch).await
    }

    /// Cached value, if any
    #[inline]
    #[must_use]
    pub async fn get(&self, key: &QueryKey) -> Option<V> {
        self.inner.get(key).await
    }

    /// Latest published snapshot for `key`
    ///
    /// `Idle` if the key was never fetched, or if nobody observes it and it
    /// has no cached value.
    #[must_use]
    pub fn snapshot(&self, key: &QueryKey) -> QueryResult<V, FetchError> {
        self.channels
            .get(key)
            .map(|sender| sender.borrow().clone())
            .unwrap_or_default()
    }

    /// Subscribe to status changes of `key`
    #[must_use]
    pub fn subscribe(&self, key: &QueryKey) -> QueryObserver<V> {
        QueryObserver {
            key: key.clone(),
            receiver: self.publisher(key).subscribe(),
        }
    }

    /// Invalidate one key; observers go back to `Idle`.
    pub async fn invalidate(&self, key: &QueryKey) {
        self.inner.invalidate(key).await;
        if let Some(sender) = self.channels.get(key).map(|s| Arc::clone(s.value())) {
            sender.send_replace(QueryResult::idle());
        }
        self.channels
            .remove_if(key, |_, sender| sender.receiver_count() == 0);
        tracing::debug!(%key, "invalidated");
    }

    /// Invalidate every key in `scope`
    pub async fn invalidate_scope(&self, scope: &str) {
        for key in self.keys_in_scope(scope) {
            self.invalidate(&key).await;
        }
    }

    /// Forget keys in `scope` that nobody observes any more
    pub async fn prune_inactive(&self, scope: &str) -> usize {
        let inactive: Vec<QueryKey> = self
            .channels
            .iter()
            .filter(|entry| entry.key().in_scope(scope) && entry.value().receiver_count() == 0)
            .map(|entry| entry.key().clone())
            .collect();

        for key in &inactive {
            self.inner.invalidate(key).await;
            self.channels.remove(key);
        }
        inactive.len()
    }

    /// Invalidate all entries
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
        self.channels.retain(|_, sender| {
            sender.send_replace(QueryResult::idle());
            sender.receiver_count() > 0
        });
    }

    /// Get cache statistics
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.inner.entry_count(),
            fetch_count: self.counters.fetches.load(Ordering::Relaxed),
            hit_count: self.counters.hits.load(Ordering::Relaxed),
            observed_keys: self.channels.len(),
        }
    }

    fn publisher(&self, key: &QueryKey) -> Arc<watch::Sender<Snapshot<V>>> {
        let entry = self
            .channels
            .entry(key.clone())
            .or_insert_with(|| Arc::new(watch::channel(QueryResult::idle()).0));
        Arc::clone(entry.value())
    }

    fn keys_in_scope(&self, scope: &str) -> Vec<QueryKey> {
        self.channels
            .iter()
            .filter(|entry| entry.key().in_scope(scope))
            .map(|entry| entry.key().clone())
            .collect()
    }
}

impl<V> Default for QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create cache with default capacity (1,000 entries)
    fn default() -> Self {
        Self::new(1_000)
    }
}

impl<V> std::fmt::Debug for QueryCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("observed_keys", &self.channels.len())
            .finish_non_exhaustive()
    }
}

async fn fetch_with_retry<V, F, Fut>(
    key: &QueryKey,
    retry: RetryPolicy,
    fetch: &F,
) -> Result<V, FetchError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<V, FetchError>>,
{
    let mut attempt = 0;
    loop {
        match fetch().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < retry.max_retries && error.is_retryable() => {
                let delay = retry.delay_for(attempt);
                tracing::warn!(%key, attempt, %error, "fetch failed, retrying");
                attempt += 1;
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            Err(error) => return Err(error),
        }
    }
}

/// Subscription to one key's snapshots
///
/// Dropping the observer (or calling [`QueryObserver::unmount`]) ends the
/// subscription; a pending fetch completing afterwards is never delivered
/// to it.
#[derive(Debug)]
pub struct QueryObserver<V> {
    key: QueryKey,
    receiver: watch::Receiver<Snapshot<V>>,
}

impl<V: Clone> QueryObserver<V> {
    /// Observed key
    #[inline]
    #[must_use]
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Latest snapshot
    #[must_use]
    pub fn current(&self) -> QueryResult<V, FetchError> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next snapshot. `None` once the cache forgot the key.
    pub async fn changed(&mut self) -> Option<QueryResult<V, FetchError>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Wait until the snapshot settles (`Success` or `Error`)
    pub async fn settled(&mut self) -> Option<QueryResult<V, FetchError>> {
        let snapshot = self
            .receiver
            .wait_for(|snapshot| snapshot.status().is_settled())
            .await
            .ok()?;
        Some(snapshot.clone())
    }

    /// Stop observing
    pub fn unmount(self) {
        tracing::trace!(key = %self.key, "observer unmounted");
    }
}
