//! Per-call fetch options: enablement, retry and refetch

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Retry behaviour for one query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubled on each further retry
    pub base_delay: Duration,
    /// Upper bound for the delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Never retry
    #[inline]
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Retry `max_retries` times without waiting
    #[inline]
    #[must_use]
    pub const fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay before retry number `attempt` (zero-based)
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    /// Three retries, 1s doubling, capped at 30s
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

/// Decides the next refetch interval from the last loaded value
pub type IntervalFn<V> = Arc<dyn Fn(Option<&V>) -> Option<Duration> + Send + Sync>;

/// When a query should be fetched again
pub enum RefetchPolicy<V> {
    /// Fetch once
    Never,
    /// Fetch again after a fixed interval
    Fixed(Duration),
    /// Interval chosen from the last value; `None` stops refetching
    Dynamic(IntervalFn<V>),
}

impl<V> RefetchPolicy<V> {
    /// Build a dynamic policy
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(Option<&V>) -> Option<Duration> + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(f))
    }

    /// Interval to wait after observing `last`
    #[must_use]
    pub fn next_interval(&self, last: Option<&V>) -> Option<Duration> {
        match self {
            Self::Never => None,
            Self::Fixed(interval) => Some(*interval),
            Self::Dynamic(f) => f(last),
        }
    }
}

impl<V> Clone for RefetchPolicy<V> {
    fn clone(&self) -> Self {
        match self {
            Self::Never => Self::Never,
            Self::Fixed(interval) => Self::Fixed(*interval),
            Self::Dynamic(f) => Self::Dynamic(Arc::clone(f)),
        }
    }
}

impl<V> fmt::Debug for RefetchPolicy<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => f.write_str("Never"),
            Self::Fixed(interval) => f.debug_tuple("Fixed").field(interval).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl<V> Default for RefetchPolicy<V> {
    fn default() -> Self {
        Self::Never
    }
}

/// Options for one `get_or_fetch` call
#[derive(Debug, Clone)]
pub struct FetchOptions<V> {
    /// Disabled queries stay `Idle` and never touch the transport
    pub enabled: bool,
    /// Retry behaviour
    pub retry: RetryPolicy,
    /// Refetch behaviour (used by the poller)
    pub refetch: RefetchPolicy<V>,
}

impl<V> FetchOptions<V> {
    /// Enabled, default retry, no background refetch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the query
    #[inline]
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// With retry policy
    #[inline]
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// With refetch policy
    #[inline]
    #[must_use]
    pub fn with_refetch(mut self, refetch: RefetchPolicy<V>) -> Self {
        self.refetch = refetch;
        self
    }
}

impl<V> Default for FetchOptions<V> {
    fn default() -> Self {
        Self {
            enabled: true,
            retry: RetryPolicy::default(),
            refetch: RefetchPolicy::Never,
        }
    }
}
