//! Stable, hashable query keys

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one cached query: a scope (resource kind) plus ordered parts.
///
/// Two keys with the same scope and parts always address the same cache
/// entry, which is what lets concurrent observers share one request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QueryKey {
    scope: String,
    parts: Vec<String>,
}

impl QueryKey {
    /// Create key for a scope with no parts
    #[inline]
    #[must_use]
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            parts: Vec::new(),
        }
    }

    /// Append a part
    #[inline]
    #[must_use]
    pub fn with_part(mut self, part: impl Into<String>) -> Self {
        self.parts.push(part.into());
        self
    }

    /// Endpoint family
    #[inline]
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Parameters after the scope
    #[inline]
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Whether this key belongs to `scope`
    #[inline]
    #[must_use]
    pub fn in_scope(&self, scope: &str) -> bool {
        self.scope == scope
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.scope)?;
        for part in &self.parts {
            write!(f, "/{part}")?;
        }
        Ok(())
    }
}
