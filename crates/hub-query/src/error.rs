//! Error types for the query layer
//!
//! - [`FetchError`]: why a single fetch failed; carried inside an errored
//!   `QueryResult` and never swallowed by the cache
//! - [`QueryError`]: misuse of the query state machine

use crate::status::QueryStatus;

/// Failure of one fetch attempt
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The transport failed or the server answered with an error status
    #[error("transport error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Transport {
        /// HTTP status, when a response was received
        status: Option<u16>,
        /// Human readable message
        message: String,
    },

    /// The response body could not be decoded
    #[error("decode error: {0}")]
    Decode(String),

    /// The fetch was abandoned before completing
    #[error("fetch cancelled")]
    Cancelled,
}

impl FetchError {
    /// Create transport error
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    /// Create decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Check if retrying could help
    ///
    /// Connection failures and 5xx responses are retryable; client errors
    /// and decode failures are not.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { status: None, .. } => true,
            Self::Transport {
                status: Some(code), ..
            } => *code >= 500 || *code == 429,
            Self::Decode(_) | Self::Cancelled => false,
        }
    }
}

/// Query state machine errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Status change not allowed within one observation cycle
    #[error("illegal query transition: {from} -> {to}")]
    IllegalTransition { from: QueryStatus, to: QueryStatus },
}

/// Result type alias for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;
