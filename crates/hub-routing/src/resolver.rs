//! Route parameter to entity resolution
//!
//! A route carries an entity's name (`/projects/:projectName`) while the page
//! needs the entity itself. The entity collection is loaded separately, so
//! resolution has three outcomes: the collection is not there yet, the name
//! matches nothing, or it matches. [`resolve`] collapses the first two into
//! `None`; [`resolve_detailed`] keeps them apart. [`resolve_by`] matches on
//! another key, such as an optional server-assigned id.

use std::fmt;

/// Entity addressable by a unique, stable name
pub trait Named {
    /// Unique name
    fn name(&self) -> &str;
}

impl<T: Named + ?Sized> Named for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// First entity whose name equals `param` exactly
///
/// Returns `None` when `entities` is not loaded or nothing matches. The
/// comparison is case-sensitive and does no normalization.
#[must_use]
pub fn resolve<'a, T: Named>(param: &str, entities: Option<&'a [T]>) -> Option<&'a T> {
    entities?.iter().find(|entity| entity.name() == param)
}

/// Outcome of resolving a route parameter
pub enum Resolution<'a, T> {
    /// Collection not loaded yet
    Pending,
    /// Collection loaded, no entity with that name
    NotFound,
    /// Matching entity
    Found(&'a T),
}

impl<'a, T> Resolution<'a, T> {
    /// Whether the collection is still missing
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether an entity matched
    #[inline]
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Matched entity; `Pending` and `NotFound` both give `None`
    #[inline]
    #[must_use]
    pub fn into_option(self) -> Option<&'a T> {
        match self {
            Self::Found(entity) => Some(entity),
            Self::Pending | Self::NotFound => None,
        }
    }
}

impl<T> Clone for Resolution<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Resolution<'_, T> {}

impl<T: PartialEq> PartialEq for Resolution<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Pending, Self::Pending) | (Self::NotFound, Self::NotFound) => true,
            (Self::Found(a), Self::Found(b)) => a == b,
            _ => false,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Resolution<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("Pending"),
            Self::NotFound => f.write_str("NotFound"),
            Self::Found(entity) => f.debug_tuple("Found").field(entity).finish(),
        }
    }
}

/// Like [`resolve`], but tells a collection that is still loading apart
/// from a name that matches nothing
#[must_use]
pub fn resolve_detailed<'a, T: Named>(param: &str, entities: Option<&'a [T]>) -> Resolution<'a, T> {
    resolve_by(param, entities, |entity| Some(entity.name()))
}

/// Resolve against the key `key` extracts instead of the name
///
/// Entities whose key is `None` never match. Otherwise behaves like
/// [`resolve_detailed`]: exact, case-sensitive, first match wins.
#[must_use]
pub fn resolve_by<'a, T, F>(param: &str, entities: Option<&'a [T]>, key: F) -> Resolution<'a, T>
where
    F: Fn(&T) -> Option<&str>,
{
    let Some(entities) = entities else {
        return Resolution::Pending;
    };
    entities
        .iter()
        .find(|entity| key(entity) == Some(param))
        .map_or(Resolution::NotFound, Resolution::Found)
}
