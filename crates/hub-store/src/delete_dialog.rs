//! Delete-confirmation dialog slice
//!
//! ```text
//! closed ──open──► open ──processing──► open+processing ──error──► open+error
//!   ▲                                                                  │
//!   └──────────────────────────── close ───────────────────────────────┘
//! ```

use crate::action::{Action, DeleteDialogAction};
use std::fmt;
use std::sync::Arc;

/// Callback run when the user confirms the deletion
#[derive(Clone)]
pub struct DeleteHandler(Arc<dyn Fn() + Send + Sync>);

impl DeleteHandler {
    /// Handler running `f`
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Run the deletion
    pub fn call(&self) {
        (self.0)();
    }
}

impl fmt::Debug for DeleteHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeleteHandler(..)")
    }
}

impl PartialEq for DeleteHandler {
    /// Handlers are equal when they are the same callback
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Optional texts overriding the dialog defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteDialogConfig {
    /// Dialog title
    pub title: String,
    /// Body text
    pub message: String,
    /// Label of the confirm button
    pub delete_btn_label: Option<String>,
    /// Label of the cancel button
    pub cancel_btn_label: Option<String>,
}

/// Payload of `dialog/delete/open`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteDialogRequest {
    /// Name of the resource to delete
    pub name: String,
    /// Resource type shown to the user ("namespace", "project", ...)
    pub resource_type: String,
    /// Confirmation callback
    pub on_delete: DeleteHandler,
    /// Text overrides
    pub config: Option<DeleteDialogConfig>,
}

impl DeleteDialogRequest {
    /// Request to delete `name` of kind `resource_type`
    pub fn new(
        name: impl Into<String>,
        resource_type: impl Into<String>,
        on_delete: DeleteHandler,
    ) -> Self {
        Self {
            name: name.into(),
            resource_type: resource_type.into(),
            on_delete,
            config: None,
        }
    }

    /// With text overrides
    #[must_use]
    pub fn with_config(mut self, config: DeleteDialogConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Dialog state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteDialogState {
    /// Dialog visible
    pub is_open: bool,
    /// Deletion running
    pub is_processing: bool,
    /// Last deletion failed
    pub is_error: bool,
    /// Name of the resource to delete
    pub name: Option<String>,
    /// Kind of resource, e.g. `project`
    pub resource_type: Option<String>,
    /// Runs on confirmation
    pub on_delete: Option<DeleteHandler>,
    /// Custom labels
    pub config: Option<DeleteDialogConfig>,
}

/// Pure reduction of the dialog slice
#[must_use]
pub fn reduce(state: &Arc<DeleteDialogState>, action: &Action) -> Arc<DeleteDialogState> {
    let next = match action {
        Action::SetSelectedNamespace(_) => return Arc::clone(state),
        Action::DeleteDialog(DeleteDialogAction::Open(request)) => DeleteDialogState {
            is_open: true,
            is_processing: false,
            is_error: false,
            name: Some(request.name.clone()),
            resource_type: Some(request.resource_type.clone()),
            on_delete: Some(request.on_delete.clone()),
            config: request.config.clone(),
        },
        Action::DeleteDialog(DeleteDialogAction::Close) => DeleteDialogState::default(),
        Action::DeleteDialog(DeleteDialogAction::Processing) => DeleteDialogState {
            is_processing: true,
            ..DeleteDialogState::clone(state)
        },
        Action::DeleteDialog(DeleteDialogAction::Error) => DeleteDialogState {
            is_processing: false,
            is_error: true,
            ..DeleteDialogState::clone(state)
        },
    };

    if next == **state {
        Arc::clone(state)
    } else {
        Arc::new(next)
    }
}
