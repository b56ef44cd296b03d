//! Query status snapshots
//!
//! A [`QueryResult`] is what one observer sees of one asynchronous data
//! source at one instant. Snapshots are immutable; a new observation produces
//! a new value.

use crate::error::QueryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a single query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    /// Not started (or disabled)
    Idle,
    /// Request in flight
    Loading,
    /// Completed with data
    Success,
    /// Completed with an error
    Error,
}

impl QueryStatus {
    /// Rank used when several statuses are combined; the highest rank wins.
    #[inline]
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Success => 1,
            Self::Loading => 2,
            Self::Error => 3,
        }
    }

    /// Whether the query has completed (successfully or not)
    #[inline]
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    /// Lowercase label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statuses reachable from `from` within one observation cycle.
///
/// A cycle is `Idle -> Loading -> {Success | Error}`. Starting a new cycle
/// (refetch or invalidation) is done by the cache, not by a transition.
#[must_use]
pub fn allowed_transitions(from: QueryStatus) -> &'static [QueryStatus] {
    use QueryStatus::{Error, Idle, Loading, Success};
    match from {
        Idle => &[Loading],
        Loading => &[Success, Error],
        Success | Error => &[],
    }
}

/// Validate a status change within one observation cycle
///
/// # Errors
/// - `QueryError::IllegalTransition` if `to` is not reachable from `from`
pub fn validate_transition(from: QueryStatus, to: QueryStatus) -> Result<(), QueryError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(QueryError::IllegalTransition { from, to })
    }
}

/// Snapshot of one asynchronous data source
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<T, E> {
    status: QueryStatus,
    data: Option<T>,
    error: Option<E>,
}

impl<T, E> QueryResult<T, E> {
    /// Not started
    #[inline]
    #[must_use]
    pub fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
        }
    }

    /// In flight, no previous data
    #[inline]
    #[must_use]
    pub fn loading() -> Self {
        Self {
            status: QueryStatus::Loading,
            data: None,
            error: None,
        }
    }

    /// Completed with data
    #[inline]
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            status: QueryStatus::Success,
            data: Some(data),
            error: None,
        }
    }

    /// Completed with an error
    #[inline]
    #[must_use]
    pub fn failed(error: E) -> Self {
        Self {
            status: QueryStatus::Error,
            data: None,
            error: Some(error),
        }
    }

    /// Start a new request, keeping previously loaded data visible.
    #[must_use]
    pub fn into_loading(self) -> Self {
        Self {
            status: QueryStatus::Loading,
            data: self.data,
            error: None,
        }
    }

    /// Current status
    #[inline]
    #[must_use]
    pub fn status(&self) -> QueryStatus {
        self.status
    }

    /// Payload, if any has been loaded
    #[inline]
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Error value when `status` is `Error`
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&E> {
        self.error.as_ref()
    }

    /// Take the payload
    #[inline]
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Whether a fetch is in flight
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    /// Whether the last fetch failed
    #[inline]
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }

    /// Whether data from the last fetch is available
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    /// Payload-erased view, so results of different types can be aggregated
    #[inline]
    #[must_use]
    pub fn view(&self) -> QueryView<'_, E> {
        QueryView {
            status: self.status,
            error: self.error.as_ref(),
        }
    }

    /// Transform the payload, keeping status and error
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryResult<U, E> {
        QueryResult {
            status: self.status,
            data: self.data.map(f),
            error: self.error,
        }
    }
}

impl<T, E> Default for QueryResult<T, E> {
    fn default() -> Self {
        Self::idle()
    }
}

impl<T, E> From<Result<T, E>> for QueryResult<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(error) => Self::failed(error),
        }
    }
}

/// Status and error of a [`QueryResult`], without its payload
#[derive(Debug)]
pub struct QueryView<'a, E> {
    status: QueryStatus,
    error: Option<&'a E>,
}

impl<'a, E> QueryView<'a, E> {
    /// Build a view directly (mostly useful in tests)
    #[inline]
    #[must_use]
    pub fn new(status: QueryStatus, error: Option<&'a E>) -> Self {
        Self { status, error }
    }

    /// Status of the viewed query
    #[inline]
    #[must_use]
    pub fn status(&self) -> QueryStatus {
        self.status
    }

    /// Error of the viewed query, if it failed
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&'a E> {
        self.error
    }
}

impl<E> Clone for QueryView<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for QueryView<'_, E> {}

impl<'a, T, E> From<&'a QueryResult<T, E>> for QueryView<'a, E> {
    fn from(result: &'a QueryResult<T, E>) -> Self {
        result.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_status() {
        assert_eq!(QueryResult::<u8, ()>::idle().status(), QueryStatus::Idle);
        assert_eq!(QueryResult::<u8, ()>::loading().status(), QueryStatus::Loading);
        assert_eq!(QueryResult::<u8, ()>::success(1).data(), Some(&1));
        assert_eq!(QueryResult::<u8, &str>::failed("boom").error(), Some(&"boom"));
    }

    #[test]
    fn into_loading_keeps_previous_data() {
        let refetching = QueryResult::<u8, ()>::success(7).into_loading();
        assert!(refetching.is_loading());
        assert_eq!(refetching.data(), Some(&7));
    }

    #[test]
    fn cycle_transitions() {
        assert!(validate_transition(QueryStatus::Idle, QueryStatus::Loading).is_ok());
        assert!(validate_transition(QueryStatus::Loading, QueryStatus::Error).is_ok());
        assert!(validate_transition(QueryStatus::Idle, QueryStatus::Success).is_err());
        assert!(validate_transition(QueryStatus::Success, QueryStatus::Loading).is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(QueryStatus::Loading.to_string(), "loading");
    }
}
