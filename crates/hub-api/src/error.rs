//! Error types for the hub API
//!
//! Transport failures surface per query as an errored `QueryResult`; the
//! conversion into [`FetchError`] keeps the HTTP status so the query layer
//! can decide whether a retry makes sense.

use hub_query::FetchError;

/// Errors talking to the hub server
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// No response (connection refused, timeout, ...)
    #[error("connection failed: {0}")]
    Connection(String),

    /// Server answered with a non-success status
    #[error("server returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Body is not what the endpoint promises
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl TransportError {
    /// Create status error
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// HTTP status, when a response was received
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Connection(_) | Self::Decode(_) => None,
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<TransportError> for FetchError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Connection(message) => FetchError::transport(None, message),
            TransportError::Status { status, message } => FetchError::transport(Some(status), message),
            TransportError::Decode(message) => FetchError::decode(message),
        }
    }
}

/// Result type alias for transport calls
pub type TransportResult<T> = Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_into_fetch_error() {
        let err: FetchError = TransportError::status(503, "unavailable").into();
        assert_eq!(err, FetchError::transport(Some(503), "unavailable"));
        assert!(err.is_retryable());

        let err: FetchError = TransportError::Decode("eof".into()).into();
        assert!(!err.is_retryable());
    }

    #[test]
    fn status_error_display() {
        assert_eq!(
            TransportError::status(404, "not found").to_string(),
            "server returned 404: not found"
        );
        assert_eq!(TransportError::status(404, "").status_code(), Some(404));
    }
}
