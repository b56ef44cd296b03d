//! Permission tokens and sets

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

/// Tokens the hub server grants today. The type itself is open: any string
/// the server sends is a valid [`Permission`].
pub mod known {
    /// Full administrative access
    pub const ADMIN: &str = "admin";
    /// Document search
    pub const SEARCH: &str = "search";
    /// Manage published versions
    pub const VERSION_WRITE: &str = "version:write";
    /// Manage users
    pub const USER_WRITE: &str = "user:write";
    /// Read projects and their companies
    pub const PROJECT_READ: &str = "project:read";
    /// Create, edit and delete projects
    pub const PROJECT_WRITE: &str = "project:write";
}

/// Opaque capability token
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    /// Permission from its token
    #[inline]
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Token
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Ordering and equality follow the token, so sets can be searched by `&str`.
impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Permission {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Permission {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Set of permission tokens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    /// Empty set
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Add a token
    #[inline]
    pub fn insert(&mut self, permission: impl Into<Permission>) -> bool {
        self.0.insert(permission.into())
    }

    /// Whether `permission` is in the set
    #[inline]
    #[must_use]
    pub fn contains(&self, permission: &str) -> bool {
        self.0.contains(permission)
    }

    /// Whether the two sets share at least one token
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.0.intersection(&other.0).next().is_some()
    }

    /// Whether the set holds no permission
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct permissions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate in token order
    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.0.iter()
    }
}

impl<P: Into<Permission>> FromIterator<P> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<const N: usize> From<[&str; N]> for PermissionSet {
    fn from(tokens: [&str; N]) -> Self {
        tokens.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_needs_shared_token() {
        let user = PermissionSet::from(["read", "write"]);
        assert!(user.intersects(&PermissionSet::from(["write"])));
        assert!(!user.intersects(&PermissionSet::from(["delete"])));
        assert!(!user.intersects(&PermissionSet::new()));
    }

    #[test]
    fn tokens_are_case_sensitive() {
        let set = PermissionSet::from([known::ADMIN]);
        assert!(set.contains("admin"));
        assert!(!set.contains("Admin"));
    }

    #[test]
    fn lookup_by_str_matches_owned_tokens() {
        let set: PermissionSet = ["project:read", "project:write", "namespace:read"]
            .into_iter()
            .collect();
        assert!(set.contains("project:write"));
        assert!(!set.contains("project:"));
        assert!(!set.contains("project:write "));

        let permission = Permission::new("x");
        let token: &str = permission.borrow();
        assert_eq!(token, permission.as_str());
    }

    #[test]
    fn duplicates_collapse() {
        let set = PermissionSet::from(["a", "a", "b"]);
        assert_eq!(set.len(), 2);
    }
}
