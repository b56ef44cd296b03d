//! Root console state and its reducer

use crate::action::Action;
use crate::delete_dialog::{self, DeleteDialogState};
use crate::namespace::{self, NamespaceContext};
use std::sync::Arc;

/// Whole store state; each slice is shared so untouched slices keep
/// their identity across dispatches
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsoleState {
    /// Namespace selection
    pub namespace_context: Arc<NamespaceContext>,
    /// Delete-confirmation dialog
    pub delete_dialog: Arc<DeleteDialogState>,
}

/// Root reducer; returns the same `Arc` when no slice changed
#[must_use]
pub fn reduce(state: &Arc<ConsoleState>, action: &Action) -> Arc<ConsoleState> {
    let namespace_context = namespace::reduce(&state.namespace_context, action);
    let delete_dialog = delete_dialog::reduce(&state.delete_dialog, action);

    if Arc::ptr_eq(&namespace_context, &state.namespace_context)
        && Arc::ptr_eq(&delete_dialog, &state.delete_dialog)
    {
        return Arc::clone(state);
    }

    Arc::new(ConsoleState {
        namespace_context,
        delete_dialog,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_slice_keeps_identity() {
        let state = Arc::new(ConsoleState::default());
        let next = reduce(&state, &Action::set_selected_namespace("ns-1"));

        assert!(!Arc::ptr_eq(&state, &next));
        assert!(Arc::ptr_eq(&state.delete_dialog, &next.delete_dialog));
        assert!(!Arc::ptr_eq(&state.namespace_context, &next.namespace_context));
    }

    #[test]
    fn no_op_keeps_root_identity() {
        let state = Arc::new(ConsoleState::default());
        let next = reduce(&state, &Action::close_delete_dialog());
        assert!(Arc::ptr_eq(&state, &next));
    }
}
