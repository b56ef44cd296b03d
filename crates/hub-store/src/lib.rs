//! Hub Console Store
//!
//! Process-wide UI state for the console, changed only through a closed
//! set of [`Action`]s reduced by pure functions.
//!
//! # Slices
//!
//! - **Namespace context**: the currently selected namespace
//! - **Delete dialog**: the confirmation dialog for destructive actions
//!
//! # Architecture
//!
//! ```text
//! dispatch(Action) ──► state::reduce ──┬─► namespace::reduce
//!                                     └─► delete_dialog::reduce
//!                          │
//!                          ▼
//!                watch channel ──► StoreSubscription
//! ```
//!
//! A slice that an action does not concern is returned as the same `Arc`,
//! and the store does not notify subscribers when nothing changed.
//!
//! # Example
//!
//! ```rust,ignore
//! use hub_store::prelude::*;
//!
//! let store = Store::new();
//! store.dispatch(&Action::set_selected_namespace("ns-1"));
//! let selected = store.select(|s| selectors::selected_namespace(s).cloned());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod action;
pub mod delete_dialog;
pub mod error;
pub mod namespace;
pub mod selectors;
pub mod state;
pub mod store;

pub use action::{Action, ActionKind, DeleteDialogAction};
pub use delete_dialog::{DeleteDialogConfig, DeleteDialogRequest, DeleteDialogState, DeleteHandler};
pub use error::{StoreError, StoreResult};
pub use namespace::{get_selected, NamespaceContext, NamespaceId};
pub use state::ConsoleState;
pub use store::{Store, StoreSubscription};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the store
    pub use crate::action::Action;
    pub use crate::namespace::{NamespaceContext, NamespaceId};
    pub use crate::selectors;
    pub use crate::state::ConsoleState;
    pub use crate::store::Store;
}
