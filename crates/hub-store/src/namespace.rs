//! Namespace selection slice
//!
//! Holds at most one selected namespace. `SetSelectedNamespace` replaces
//! the selection outright; every other action hands back the same `Arc`
//! so downstream change detection can compare pointers.

use crate::action::{Action, DeleteDialogAction};
use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Namespace identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceId(String);

impl NamespaceId {
    /// Wrap an id without checking it
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse an id coming from outside (route, user input)
    ///
    /// # Errors
    /// - `StoreError::InvalidNamespaceId` if the id is empty or blank
    pub fn parse(id: &str) -> StoreResult<Self> {
        if id.trim().is_empty() {
            return Err(StoreError::InvalidNamespaceId(id.to_string()));
        }
        Ok(Self::new(id))
    }

    /// Id as text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NamespaceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NamespaceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Namespace selection state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceContext {
    selected: Option<NamespaceId>,
}

impl NamespaceContext {
    /// Nothing selected
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected namespace
    #[inline]
    #[must_use]
    pub fn selected(&self) -> Option<&NamespaceId> {
        self.selected.as_ref()
    }
}

/// Pure reduction of the namespace slice
#[must_use]
pub fn reduce(state: &Arc<NamespaceContext>, action: &Action) -> Arc<NamespaceContext> {
    match action {
        Action::SetSelectedNamespace(id) => Arc::new(NamespaceContext {
            selected: Some(id.clone()),
        }),
        Action::DeleteDialog(
            DeleteDialogAction::Open(_)
            | DeleteDialogAction::Close
            | DeleteDialogAction::Processing
            | DeleteDialogAction::Error,
        ) => Arc::clone(state),
    }
}

/// Selector: selected namespace id
#[inline]
#[must_use]
pub fn get_selected(state: &NamespaceContext) -> Option<&NamespaceId> {
    state.selected()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unselected() {
        assert_eq!(get_selected(&NamespaceContext::new()), None);
    }

    #[test]
    fn set_replaces_previous_selection() {
        let state = Arc::new(NamespaceContext::new());
        let state = reduce(&state, &Action::set_selected_namespace("ns-1"));
        assert_eq!(get_selected(&state).map(NamespaceId::as_str), Some("ns-1"));

        let state = reduce(&state, &Action::set_selected_namespace("ns-2"));
        assert_eq!(get_selected(&state).map(NamespaceId::as_str), Some("ns-2"));
    }

    #[test]
    fn unrelated_action_returns_same_state() {
        let state = reduce(
            &Arc::new(NamespaceContext::new()),
            &Action::set_selected_namespace("ns-1"),
        );
        let next = reduce(&state, &Action::close_delete_dialog());
        assert!(Arc::ptr_eq(&state, &next));
        assert_eq!(*next, *state);
    }

    #[test]
    fn blank_ids_are_rejected() {
        assert!(NamespaceId::parse("  ").is_err());
        assert_eq!(NamespaceId::parse("ns-1").map(|id| id.to_string()), Ok("ns-1".to_string()));
    }
}
