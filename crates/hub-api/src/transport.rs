//! Transport seam
//!
//! The console core never builds an HTTP client itself. Callers hand in an
//! implementation of [`Transport`] that performs `GET` requests against the
//! hub server.

use crate::error::{TransportError, TransportResult};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// `GET` request: path relative to the API root plus query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Request {
    /// Path starting with `/`
    pub path: String,
    /// Query parameters, in order
    pub query: Vec<(String, String)>,
}

impl Request {
    /// `GET path` without query parameters
    #[inline]
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Append query parameters
    #[must_use]
    pub fn with_query<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

/// Response as seen by the core
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Header names are stored lower-case
    headers: BTreeMap<String, String>,
    /// Raw body
    pub body: String,
}

impl Response {
    /// 200 response with `body`
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self::with_status(200, body)
    }

    /// Response with an arbitrary status code
    #[must_use]
    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Header value, looked up case-insensitively
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Whether the status is 2xx
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into an error
    ///
    /// # Errors
    /// - `TransportError::Status` for any non-2xx status
    pub fn error_for_status(self) -> TransportResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(TransportError::status(self.status, self.body))
        }
    }

    /// Decode the body as JSON
    ///
    /// # Errors
    /// - `TransportError::Decode` if the body does not deserialize into `T`
    pub fn json<T: DeserializeOwned>(&self) -> TransportResult<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Performs requests against the hub server
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Perform a `GET` request
    ///
    /// Non-2xx responses may be returned as `Ok`; callers check the status.
    async fn get(&self, request: &Request) -> TransportResult<Response>;
}
