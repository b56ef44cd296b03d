//! Read-only projections of [`ConsoleState`]

use crate::delete_dialog::DeleteDialogState;
use crate::namespace::{self, NamespaceId};
use crate::state::ConsoleState;

/// Selected namespace id
#[inline]
#[must_use]
pub fn selected_namespace(state: &ConsoleState) -> Option<&NamespaceId> {
    namespace::get_selected(&state.namespace_context)
}

/// Delete dialog slice
#[inline]
#[must_use]
pub fn delete_dialog(state: &ConsoleState) -> &DeleteDialogState {
    &state.delete_dialog
}

/// Whether a deletion is waiting for confirmation or running
#[inline]
#[must_use]
pub fn is_delete_pending(state: &ConsoleState) -> bool {
    state.delete_dialog.is_open && !state.delete_dialog.is_error
}
