//! Background refetching of one query key
//!
//! The poller fetches once, asks the key's [`RefetchPolicy`] how long to
//! wait given the last value fetched successfully, and refetches after that
//! interval. A failed refetch does not reset that value, so a transient
//! error never ends polling. It stops when the policy returns no interval
//! or when it is dropped.
//!
//! [`RefetchPolicy`]: crate::options::RefetchPolicy

use crate::cache::QueryCache;
use crate::error::FetchError;
use crate::key::QueryKey;
use crate::options::FetchOptions;
use std::future::Future;
use tokio::task::JoinHandle;

/// Handle to a running poll loop; aborts the loop on drop
#[derive(Debug)]
pub struct Poller {
    key: QueryKey,
    handle: JoinHandle<()>,
}

impl Poller {
    /// Start polling `key` on the current tokio runtime
    pub fn spawn<V, F, Fut>(
        cache: QueryCache<V>,
        key: QueryKey,
        options: FetchOptions<V>,
        fetch: F,
    ) -> Self
    where
        V: Clone + Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, FetchError>> + Send + 'static,
    {
        let loop_key = key.clone();
        let handle = tokio::spawn(async move {
            let mut last_good = cache
                .get_or_fetch(loop_key.clone(), &options, &fetch)
                .await
                .into_data();
            while let Some(interval) = options.refetch.next_interval(last_good.as_ref()) {
                tokio::time::sleep(interval).await;
                tracing::trace!(key = %loop_key, ?interval, "polling");
                let result = cache.refetch(loop_key.clone(), &options, &fetch).await;
                if let Some(error) = result.error() {
                    tracing::debug!(key = %loop_key, %error, "poll failed, keeping last data");
                }
                if let Some(value) = result.into_data() {
                    last_good = Some(value);
                }
            }
            tracing::debug!(key = %loop_key, "polling stopped");
        });
        Self { key, handle }
    }

    /// Polled key
    #[inline]
    #[must_use]
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Whether the loop has stopped on its own
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop polling
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{RefetchPolicy, RetryPolicy};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn polls_until_policy_stops() {
        let cache = QueryCache::<usize>::new(10);
        let key = QueryKey::new("documents").with_part("ns-1");
        let calls = Arc::new(AtomicUsize::new(0));

        // Keep polling while fewer than three documents are "in progress".
        let options = FetchOptions::new()
            .with_retry(RetryPolicy::none())
            .with_refetch(RefetchPolicy::dynamic(|last: Option<&usize>| {
                last.filter(|n| **n < 3).map(|_| Duration::from_secs(3))
            }));

        let counter = Arc::clone(&calls);
        let poller = Poller::spawn(cache.clone(), key.clone(), options, move || {
            let counter = Arc::clone(&counter);
            async move { Ok(counter.fetch_add(1, Ordering::SeqCst) + 1) }
        });

        let mut observer = cache.subscribe(&key);
        while observer.current().data() != Some(&3) {
            observer.changed().await;
        }

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(poller.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn transient_error_does_not_stop_polling() {
        let cache = QueryCache::<usize>::new(10);
        let key = QueryKey::new("documents").with_part("ns-1");
        let calls = Arc::new(AtomicUsize::new(0));

        // Always "in progress"; the second fetch fails with a 503.
        let options = FetchOptions::new()
            .with_retry(RetryPolicy::none())
            .with_refetch(RefetchPolicy::dynamic(|last: Option<&usize>| {
                last.map(|_| Duration::from_secs(3))
            }));

        let counter = Arc::clone(&calls);
        let poller = Poller::spawn(cache.clone(), key.clone(), options, move || {
            let counter = Arc::clone(&counter);
            async move {
                match counter.fetch_add(1, Ordering::SeqCst) + 1 {
                    2 => Err(FetchError::transport(Some(503), "unavailable")),
                    n => Ok(n),
                }
            }
        });
        let observer = cache.subscribe(&key);

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(observer.current().is_error());

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(calls.load(Ordering::SeqCst) > 2);
        assert!(!poller.is_finished());
        assert!(observer.current().is_success());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_poller_stops_fetching() {
        let cache = QueryCache::<usize>::new(10);
        let key = QueryKey::new("server-info");
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let poller = Poller::spawn(
            cache.clone(),
            key.clone(),
            FetchOptions::new().with_refetch(RefetchPolicy::Fixed(Duration::from_secs(1))),
            move || {
                let counter = Arc::clone(&counter);
                async move { Ok(counter.fetch_add(1, Ordering::SeqCst)) }
            },
        );

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        poller.stop();
        let seen = calls.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(calls.load(Ordering::SeqCst), seen);
    }
}
