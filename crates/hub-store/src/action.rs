//! Closed set of store actions
//!
//! Every write to the store goes through one of these variants. Reducers
//! match them exhaustively, so adding a variant forces every slice to decide
//! what it does with it.

use crate::delete_dialog::DeleteDialogRequest;
use crate::error::StoreError;
use crate::namespace::NamespaceId;
use std::fmt;
use std::str::FromStr;

/// Store action
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the selected namespace
    SetSelectedNamespace(NamespaceId),
    /// Delete-confirmation dialog lifecycle
    DeleteDialog(DeleteDialogAction),
}

/// Delete-confirmation dialog actions
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteDialogAction {
    /// Show the dialog for one resource
    Open(DeleteDialogRequest),
    /// Hide and reset the dialog
    Close,
    /// Deletion in progress
    Processing,
    /// Deletion failed
    Error,
}

impl Action {
    /// Select a namespace
    #[inline]
    #[must_use]
    pub fn set_selected_namespace(id: impl Into<NamespaceId>) -> Self {
        Self::SetSelectedNamespace(id.into())
    }

    /// Open the delete dialog
    #[inline]
    #[must_use]
    pub fn open_delete_dialog(request: DeleteDialogRequest) -> Self {
        Self::DeleteDialog(DeleteDialogAction::Open(request))
    }

    /// Close the delete dialog
    #[inline]
    #[must_use]
    pub fn close_delete_dialog() -> Self {
        Self::DeleteDialog(DeleteDialogAction::Close)
    }

    /// Mark the pending deletion as in progress
    #[inline]
    #[must_use]
    pub fn delete_dialog_processing() -> Self {
        Self::DeleteDialog(DeleteDialogAction::Processing)
    }

    /// Mark the pending deletion as failed
    #[inline]
    #[must_use]
    pub fn delete_dialog_error() -> Self {
        Self::DeleteDialog(DeleteDialogAction::Error)
    }

    /// Discriminator of this action
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::SetSelectedNamespace(_) => ActionKind::SetSelectedNamespace,
            Self::DeleteDialog(DeleteDialogAction::Open(_)) => ActionKind::DeleteDialogOpen,
            Self::DeleteDialog(DeleteDialogAction::Close) => ActionKind::DeleteDialogClose,
            Self::DeleteDialog(DeleteDialogAction::Processing) => ActionKind::DeleteDialogProcessing,
            Self::DeleteDialog(DeleteDialogAction::Error) => ActionKind::DeleteDialogError,
        }
    }
}

/// Action discriminator with its stable wire string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// `namespaceContext/setSelectedNamespace`
    SetSelectedNamespace,
    /// `dialog/delete/open`
    DeleteDialogOpen,
    /// `dialog/delete/close`
    DeleteDialogClose,
    /// `dialog/delete/processing`
    DeleteDialogProcessing,
    /// `dialog/delete/error`
    DeleteDialogError,
}

impl ActionKind {
    /// All kinds, in declaration order
    pub const ALL: [Self; 5] = [
        Self::SetSelectedNamespace,
        Self::DeleteDialogOpen,
        Self::DeleteDialogClose,
        Self::DeleteDialogProcessing,
        Self::DeleteDialogError,
    ];

    /// Wire string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SetSelectedNamespace => "namespaceContext/setSelectedNamespace",
            Self::DeleteDialogOpen => "dialog/delete/open",
            Self::DeleteDialogClose => "dialog/delete/close",
            Self::DeleteDialogProcessing => "dialog/delete/processing",
            Self::DeleteDialogError => "dialog/delete/error",
        }
    }

    /// Whether the action carries a payload
    #[must_use]
    pub const fn has_payload(self) -> bool {
        matches!(self, Self::SetSelectedNamespace | Self::DeleteDialogOpen)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| StoreError::UnknownActionKind(s.to_string()))
    }
}
