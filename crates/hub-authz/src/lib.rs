//! Hub Authorization
//!
//! Permission-gated visibility for the console. A gate compares the current
//! user's permission set with the set an action requires:
//!
//! - allowed iff the two sets intersect
//! - an empty requirement is never allowed
//! - a user query that has not produced data counts as no permissions
//!
//! Denial is not an error; gated content simply does not render.
//!
//! # Example
//!
//! ```rust,ignore
//! use hub_authz::{PermissionGate, User, known};
//! use hub_query::QueryResult;
//!
//! let gate = PermissionGate::any_of([known::ADMIN, known::PROJECT_WRITE]);
//! let user: QueryResult<User, ()> = QueryResult::loading();
//! assert!(gate.render(&user, || "delete button").is_none());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod gate;
pub mod permission;
pub mod user;

pub use gate::{is_allowed, loaded_permissions, GateDecision, PermissionGate};
pub use permission::{known, Permission, PermissionSet};
pub use user::User;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
