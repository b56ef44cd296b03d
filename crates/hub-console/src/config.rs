//! Console configuration
//!
//! Loaded from TOML; every field has a default so an empty document is a
//! valid configuration.
//!
//! ```toml
//! cache_capacity = 500
//! in_progress_refetch_ms = 3000
//! refetch_interval_ms = 60000
//!
//! [retry]
//! max_retries = 2
//!
//! [log]
//! filter = "hub_query=debug,info"
//! format = "json"
//! ```

use crate::error::{ConsoleError, ConsoleResult};
use hub_query::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Entries per query cache
    pub cache_capacity: u64,
    /// Refetch interval while documents are being processed
    pub in_progress_refetch_ms: u64,
    /// Refetch interval otherwise; absent means no background refetch
    pub refetch_interval_ms: Option<u64>,
    /// Fetch retries
    pub retry: RetryConfig,
    /// Logging
    pub log: LogConfig,
}

impl ConsoleConfig {
    /// Default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate TOML
    ///
    /// # Errors
    /// - `ConsoleError::ConfigParse` for malformed TOML or unknown fields
    /// - `ConsoleError::InvalidConfig` for out-of-range values
    pub fn from_toml_str(text: &str) -> ConsoleResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// - `ConsoleError::InvalidConfig` naming the first bad field
    pub fn validate(&self) -> ConsoleResult<()> {
        if self.cache_capacity == 0 {
            return Err(ConsoleError::invalid_config("cache_capacity", "must be positive"));
        }
        if self.in_progress_refetch_ms == 0 {
            return Err(ConsoleError::invalid_config(
                "in_progress_refetch_ms",
                "must be positive",
            ));
        }
        if self.refetch_interval_ms == Some(0) {
            return Err(ConsoleError::invalid_config(
                "refetch_interval_ms",
                "must be positive; omit it to disable background refetch",
            ));
        }
        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            return Err(ConsoleError::invalid_config(
                "retry.base_delay_ms",
                format!("exceeds retry.max_delay_ms ({})", self.retry.max_delay_ms),
            ));
        }
        Ok(())
    }

    /// With cache capacity
    #[inline]
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// With background refetch interval
    #[inline]
    #[must_use]
    pub fn with_refetch_interval(mut self, interval: Option<Duration>) -> Self {
        self.refetch_interval_ms = interval.map(duration_ms);
        self
    }

    /// With in-progress refetch interval
    #[inline]
    #[must_use]
    pub fn with_in_progress_refetch(mut self, interval: Duration) -> Self {
        self.in_progress_refetch_ms = duration_ms(interval);
        self
    }

    /// With retry settings
    #[inline]
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Documents refetch interval while something is in progress
    #[must_use]
    pub fn in_progress_interval(&self) -> Duration {
        Duration::from_millis(self.in_progress_refetch_ms)
    }

    /// Background refetch interval; `None` disables it
    #[must_use]
    pub fn refetch_interval(&self) -> Option<Duration> {
        self.refetch_interval_ms.map(Duration::from_millis)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 1_000,
            in_progress_refetch_ms: 3_000,
            refetch_interval_ms: None,
            retry: RetryConfig::default(),
            log: LogConfig::default(),
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Retry settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryConfig {
    /// Retries after the first failure
    pub max_retries: u32,
    /// Delay before the first retry, doubled on each one
    pub base_delay_ms: u64,
    /// Upper bound on any retry delay
    pub max_delay_ms: u64,
}

impl RetryConfig {
    /// No retries
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: 0,
            max_delay_ms: 0,
        }
    }

    /// As a query-layer retry policy
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_retries: policy.max_retries,
            base_delay_ms: duration_ms(policy.base_delay),
            max_delay_ms: duration_ms(policy.max_delay),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset
    pub filter: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}
