//! Typed context handed down a route subtree
//!
//! Each [`RouteScope`] frame holds at most one value and points at its
//! parent. Lookups walk from the innermost frame outwards, so a nested route
//! shadows a value of the same type provided further up. Frames are shared
//! and immutable; providing a value creates a child, never mutates a parent.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

struct Frame {
    parent: Option<RouteScope>,
    type_id: TypeId,
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

/// Handle to a route scope
#[derive(Clone, Default)]
pub struct RouteScope {
    frame: Option<Arc<Frame>>,
}

impl RouteScope {
    /// Empty root scope
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Child scope that additionally provides `value`
    #[must_use]
    pub fn provide<T: Any + Send + Sync>(&self, value: T) -> Self {
        self.provide_shared(Arc::new(value))
    }

    /// Child scope providing an already shared value
    #[must_use]
    pub fn provide_shared<T: Any + Send + Sync>(&self, value: Arc<T>) -> Self {
        Self {
            frame: Some(Arc::new(Frame {
                parent: self.frame.is_some().then(|| self.clone()),
                type_id: TypeId::of::<T>(),
                type_name: std::any::type_name::<T>(),
                value,
            })),
        }
    }

    /// Nearest value of type `T`
    #[must_use]
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.find::<T>().and_then(|value| value.downcast_ref::<T>())
    }

    /// Nearest value of type `T`, shared
    #[must_use]
    pub fn get_shared<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.find::<T>()
            .and_then(|value| Arc::clone(value).downcast::<T>().ok())
    }

    /// Whether some enclosing frame provides a `T`
    #[must_use]
    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.find::<T>().is_some()
    }

    /// Number of frames from here to the root
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames().count()
    }

    fn find<T: Any>(&self) -> Option<&Arc<dyn Any + Send + Sync>> {
        let wanted = TypeId::of::<T>();
        self.frames()
            .find(|frame| frame.type_id == wanted)
            .map(|frame| &frame.value)
    }

    fn frames(&self) -> impl Iterator<Item = &Frame> {
        std::iter::successors(self.frame.as_deref(), |frame| {
            frame.parent.as_ref().and_then(|parent| parent.frame.as_deref())
        })
    }
}

impl fmt::Debug for RouteScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.frames().map(|frame| frame.type_name))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Project(&'static str);

    #[derive(Debug, PartialEq)]
    struct Company(&'static str);

    #[test]
    fn root_provides_nothing() {
        let root = RouteScope::root();
        assert_eq!(root.get::<Project>(), None);
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn descendants_see_ancestor_values() {
        let project = RouteScope::root().provide(Project("acme"));
        let company = project.provide(Company("20123456789"));

        assert_eq!(company.get::<Project>(), Some(&Project("acme")));
        assert_eq!(company.get::<Company>(), Some(&Company("20123456789")));
        assert_eq!(project.get::<Company>(), None);
        assert_eq!(company.depth(), 2);
    }

    #[test]
    fn inner_value_shadows_outer() {
        let outer = RouteScope::root().provide(Project("outer"));
        let inner = outer.provide(Project("inner"));

        assert_eq!(inner.get::<Project>(), Some(&Project("inner")));
        assert_eq!(outer.get::<Project>(), Some(&Project("outer")));
    }

    #[test]
    fn shared_lookup_returns_same_allocation() {
        let project = Arc::new(Project("acme"));
        let scope = RouteScope::root().provide_shared(Arc::clone(&project));
        let found = scope.get_shared::<Project>();
        assert!(found.is_some_and(|p| Arc::ptr_eq(&p, &project)));
    }
}
