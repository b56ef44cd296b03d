//! Current user as returned by the hub

use crate::permission::PermissionSet;
use serde::{Deserialize, Serialize};

/// Authenticated user and the permissions granted to them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name
    pub username: String,
    /// Granted permission tokens
    #[serde(default)]
    pub permissions: PermissionSet,
}

impl User {
    /// User with the given permissions
    #[inline]
    #[must_use]
    pub fn new(username: impl Into<String>, permissions: PermissionSet) -> Self {
        Self {
            username: username.into(),
            permissions,
        }
    }
}
