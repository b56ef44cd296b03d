//! Entity routes: a path template whose parameter names an entity
//!
//! ```text
//! "/projects/acme/documents"
//!     │ PathTemplate::matches
//!     ▼
//! projectName = "acme" ──resolve against──► QueryResult<Vec<Project>>
//!                                               │
//!                                               ▼
//!                                 RouteScope::provide(project)
//! ```

use crate::error::{RoutingError, RoutingResult};
use crate::resolver::{resolve_detailed, Named, Resolution};
use crate::scope::RouteScope;
use crate::template::PathTemplate;
use hub_query::QueryResult;
use std::any::Any;

/// Template plus the parameter that carries the entity name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRoute {
    template: PathTemplate,
    param: String,
}

impl EntityRoute {
    /// Create route
    ///
    /// # Errors
    /// - `RoutingError::InvalidTemplate` if `template` does not parse
    /// - `RoutingError::MissingParam` if `template` does not declare `param`
    pub fn new(template: &str, param: &str) -> RoutingResult<Self> {
        let template = PathTemplate::parse(template)?;
        if !template.has_param(param) {
            return Err(RoutingError::MissingParam(param.to_string()));
        }
        Ok(Self {
            template,
            param: param.to_string(),
        })
    }

    /// Path template
    #[inline]
    #[must_use]
    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// Parameter carrying the entity name
    #[inline]
    #[must_use]
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Entity name carried by `path`, if the path belongs to this route
    #[must_use]
    pub fn entity_name(&self, path: &str) -> Option<String> {
        self.template
            .matches(path)
            .and_then(|params| params.get(&self.param).map(str::to_string))
    }

    /// Resolve the entity named by `path` against a loaded collection
    ///
    /// A path outside this route resolves to `NotFound`. A collection query
    /// without data, loading or failed, resolves to `Pending`.
    #[must_use]
    pub fn resolve<'a, T: Named, E>(
        &self,
        path: &str,
        entities: &'a QueryResult<Vec<T>, E>,
    ) -> Resolution<'a, T> {
        let Some(name) = self.entity_name(path) else {
            tracing::trace!(template = %self.template, path, "path outside route");
            return Resolution::NotFound;
        };
        resolve_detailed(&name, entities.data().map(Vec::as_slice))
    }

    /// Child of `parent` providing the resolved entity, if there is one
    #[must_use]
    pub fn scope<T, E>(
        &self,
        parent: &RouteScope,
        path: &str,
        entities: &QueryResult<Vec<T>, E>,
    ) -> Option<RouteScope>
    where
        T: Named + Clone + Any + Send + Sync,
    {
        self.resolve(path, entities)
            .into_option()
            .map(|entity| parent.provide(entity.clone()))
    }
}
