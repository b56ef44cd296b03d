//! Permission gate
//!
//! Decides whether a gated action or section is visible. The gate is
//! default-deny: an empty requirement never allows, and a user whose
//! permissions have not loaded yet holds no permissions.

use crate::permission::PermissionSet;
use crate::user::User;
use hub_query::QueryResult;

static NO_PERMISSIONS: PermissionSet = PermissionSet::new();

/// `true` iff `user` holds at least one of `required`.
///
/// An empty `required` set yields `false`.
#[must_use]
pub fn is_allowed(user: &PermissionSet, required: &PermissionSet) -> bool {
    !required.is_empty() && user.intersects(required)
}

/// Permissions visible in the current-user query.
///
/// Until the query has produced a user (idle, first load, or failed) this is
/// the empty set.
#[must_use]
pub fn loaded_permissions<E>(user: &QueryResult<User, E>) -> &PermissionSet {
    user.data().map_or(&NO_PERMISSIONS, |u| &u.permissions)
}

/// Outcome of a gate check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the gated content
    Allow,
    /// Render nothing
    Deny,
}

impl GateDecision {
    /// Whether the gate lets the content through
    #[inline]
    #[must_use]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl From<bool> for GateDecision {
    fn from(allowed: bool) -> Self {
        if allowed {
            Self::Allow
        } else {
            Self::Deny
        }
    }
}

/// Visibility rule for one action or section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGate {
    required: PermissionSet,
}

impl PermissionGate {
    /// Gate satisfied by any permission in `required`
    #[inline]
    #[must_use]
    pub fn new(required: PermissionSet) -> Self {
        Self { required }
    }

    /// Gate satisfied by any of the listed tokens
    #[must_use]
    pub fn any_of<const N: usize>(tokens: [&str; N]) -> Self {
        Self::new(PermissionSet::from(tokens))
    }

    /// Permissions any one of which opens the gate
    #[inline]
    #[must_use]
    pub fn required(&self) -> &PermissionSet {
        &self.required
    }

    /// Decide against an already resolved permission set
    #[must_use]
    pub fn decide_for(&self, permissions: &PermissionSet) -> GateDecision {
        is_allowed(permissions, &self.required).into()
    }

    /// Decide against the current-user query, whatever its status
    #[must_use]
    pub fn decide<E>(&self, user: &QueryResult<User, E>) -> GateDecision {
        let decision = self.decide_for(loaded_permissions(user));
        if !decision.is_allowed() {
            tracing::trace!(status = %user.status(), required = ?self.required, "gate closed");
        }
        decision
    }

    /// Produce the gated content only when allowed
    pub fn render<E, R>(&self, user: &QueryResult<User, E>, content: impl FnOnce() -> R) -> Option<R> {
        self.decide(user).is_allowed().then(content)
    }
}
