//! Error types for the console session

use hub_routing::RoutingError;
use hub_store::StoreError;

/// Console errors
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Configuration text is not valid TOML for [`crate::ConsoleConfig`]
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration parsed but a value is out of range
    #[error("invalid config value for '{field}': {reason}")]
    InvalidConfig {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// Route definition error
    #[error("routing error: {0}")]
    Routing(#[from] RoutingError),

    /// Store rejected the input
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Tracing subscriber could not be installed
    #[error("telemetry error: {0}")]
    Telemetry(String),
}

impl ConsoleError {
    /// Create invalid config error
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type alias for console operations
pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ConsoleError::invalid_config("cache_capacity", "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid config value for 'cache_capacity': must be positive"
        );

        let err: ConsoleError = StoreError::InvalidNamespaceId(String::new()).into();
        assert_eq!(err.to_string(), "store error: invalid namespace id: ''");
    }
}
