//! Status aggregation over independent queries
//!
//! Precedence, evaluated over the whole sequence:
//! 1. any `Error`   -> `Error`
//! 2. any `Loading` -> `Loading`
//! 3. all `Idle`    -> `Idle` (this includes the empty sequence)
//! 4. otherwise     -> `Success`

use crate::status::{QueryStatus, QueryView};

/// Combine raw statuses.
#[must_use]
pub fn aggregate_statuses<I>(statuses: I) -> QueryStatus
where
    I: IntoIterator<Item = QueryStatus>,
{
    statuses
        .into_iter()
        .max_by_key(|status| status.precedence())
        .unwrap_or(QueryStatus::Idle)
}

/// Combine the statuses of several query results into one.
///
/// `aggregate(&[])` is `Idle`.
#[must_use]
pub fn aggregate<E>(results: &[QueryView<'_, E>]) -> QueryStatus {
    aggregate_statuses(results.iter().map(QueryView::status))
}

/// Error of the first result (in input order) whose status is `Error`.
#[must_use]
pub fn first_error<'a, E>(results: &[QueryView<'a, E>]) -> Option<&'a E> {
    results
        .iter()
        .find(|result| result.status() == QueryStatus::Error)
        .and_then(QueryView::error)
}

/// Every errored result with its input position, in order.
///
/// Callers use the position to pair each error with its own title.
#[must_use]
pub fn errored<'a, E>(results: &[QueryView<'a, E>]) -> Vec<(usize, &'a E)> {
    results
        .iter()
        .enumerate()
        .filter(|(_, result)| result.status() == QueryStatus::Error)
        .filter_map(|(index, result)| result.error().map(|error| (index, error)))
        .collect()
}
