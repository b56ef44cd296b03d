//! Console session: one store, one set of query caches, shared by every page
//!
//! ```text
//!              ┌────────────── ConsoleSession ───────────────┐
//! page ──────► │ Store (namespace, delete dialog)            │
//!              │ HubQueries ──► dyn Transport                │
//!              │ EntityRoute("/projects/:projectName")       │
//!              │ EntityRoute("/documents/ns/:namespaceId")   │
//!              └─────────────────────────────────────────────┘
//! ```
//!
//! The namespace in effect for a page comes from its route when the route
//! carries one (and is then remembered in the store), otherwise from the
//! store.

use crate::config::ConsoleConfig;
use crate::error::ConsoleResult;
use hub_api::{DocumentsOwner, HubQueries, ListParams, Namespace, PageResult, Project, Transport, UblDocument};
use hub_authz::{GateDecision, PermissionGate};
use hub_query::{aggregate, FetchError, Poller, QueryResult, QueryStatus};
use hub_routing::{resolve_by, EntityRoute, RouteScope};
use hub_store::{selectors, Action, DeleteDialogRequest, NamespaceId, Store};
use std::sync::Arc;

/// Route carrying a project name
pub const PROJECT_ROUTE: &str = "/projects/:projectName";

/// Route carrying a namespace id
pub const NAMESPACE_ROUTE: &str = "/documents/ns/:namespaceId";

/// Loading/error state of a page built from several queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStatus {
    /// Aggregated status
    pub status: QueryStatus,
    /// First error, in query order
    pub error: Option<FetchError>,
}

/// Console session
#[derive(Debug, Clone)]
pub struct ConsoleSession {
    config: ConsoleConfig,
    store: Store,
    queries: HubQueries,
    project_route: EntityRoute,
    namespace_route: EntityRoute,
}

impl ConsoleSession {
    /// Create session over `transport`
    ///
    /// # Errors
    /// - `ConsoleError::InvalidConfig` if `config` does not validate
    pub fn new(config: ConsoleConfig, transport: Arc<dyn Transport>) -> ConsoleResult<Self> {
        config.validate()?;
        let queries = HubQueries::new(transport, config.cache_capacity)
            .with_retry(config.retry.policy());
        let project_route = EntityRoute::new(PROJECT_ROUTE, "projectName")?;
        let namespace_route = EntityRoute::new(NAMESPACE_ROUTE, "namespaceId")?;

        tracing::info!(capacity = config.cache_capacity, "console session started");
        Ok(Self {
            config,
            store: Store::new(),
            queries,
            project_route,
            namespace_route,
        })
    }

    /// Configuration the session was built with
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Console state store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Query caches
    #[inline]
    #[must_use]
    pub fn queries(&self) -> &HubQueries {
        &self.queries
    }

    /// Select a namespace; returns whether the selection changed
    ///
    /// Selecting the namespace already selected leaves the store untouched
    /// and returns `false`.
    ///
    /// # Errors
    /// - `ConsoleError::Store` if `id` is blank
    pub fn select_namespace(&self, id: &str) -> ConsoleResult<bool> {
        Ok(self.sync_selection(NamespaceId::parse(id)?))
    }

    fn sync_selection(&self, id: NamespaceId) -> bool {
        if self.selected_namespace().as_ref() == Some(&id) {
            return false;
        }
        tracing::info!(namespace = %id, "namespace selected");
        self.store.dispatch(&Action::set_selected_namespace(id))
    }

    /// Currently selected namespace
    #[must_use]
    pub fn selected_namespace(&self) -> Option<NamespaceId> {
        self.store.select(|state| selectors::selected_namespace(state).cloned())
    }

    /// Gate decision for the current user as loaded so far
    ///
    /// Does not fetch; until the user query has data the gate denies.
    #[must_use]
    pub fn decide(&self, gate: &PermissionGate) -> GateDecision {
        gate.decide(&self.queries.user_snapshot())
    }

    /// Load the current user, then decide
    pub async fn authorize(&self, gate: &PermissionGate) -> GateDecision {
        gate.decide(&self.queries.current_user().await)
    }

    /// Load the pieces every page header needs and report their combined
    /// status
    pub async fn overview_status(&self) -> PageStatus {
        let (server_info, user, projects) = tokio::join!(
            self.queries.server_info(),
            self.queries.current_user(),
            self.queries.projects(),
        );
        page_status(&[server_info.view(), user.view(), projects.view()])
    }

    /// Child of `parent` providing the project named by `path`
    ///
    /// `None` while projects load, when loading failed, or when no project
    /// has that name.
    pub async fn project_scope(&self, parent: &RouteScope, path: &str) -> Option<RouteScope> {
        let projects = self.queries.projects().await;
        let scope = self.project_route.scope::<Project, _>(parent, path, &projects);
        if scope.is_none() {
            tracing::debug!(path, status = %projects.status(), "no project for route");
        }
        scope
    }

    /// Child of `parent` providing the namespace in effect for `path`
    ///
    /// A namespace id in the route overrides the stored selection and is
    /// stored in its place; other paths fall back to the stored selection.
    /// Namespaces are matched by id. `None` when no namespace is in effect,
    /// while namespaces load, when loading failed, or when no namespace has
    /// that id.
    pub async fn namespace_scope(&self, parent: &RouteScope, path: &str) -> Option<RouteScope> {
        let from_route = self
            .namespace_route
            .entity_name(path)
            .and_then(|raw| NamespaceId::parse(&raw).ok());
        if let Some(id) = &from_route {
            self.sync_selection(id.clone());
        }
        let id = from_route.or_else(|| self.selected_namespace())?;

        let namespaces = self.queries.namespaces().await;
        let found = resolve_by(id.as_str(), namespaces.data().map(Vec::as_slice), Namespace::id).into_option();
        if found.is_none() {
            tracing::debug!(path, namespace = %id, status = %namespaces.status(), "no namespace for route");
        }
        found.map(|namespace| parent.provide(namespace.clone()))
    }

    /// Documents of the selected namespace; `Idle` until one is selected
    pub async fn documents(&self, params: &ListParams) -> QueryResult<PageResult<UblDocument>, FetchError> {
        let selected = self.selected_namespace();
        self.queries
            .documents(selected.as_ref().map(|id| DocumentsOwner::Namespace(id.as_str())), params)
            .await
    }

    /// Poll documents of the selected namespace with the configured
    /// intervals; `None` when nothing is selected
    #[must_use]
    pub fn poll_documents(&self, params: &ListParams) -> Option<Poller> {
        let selected = self.selected_namespace()?;
        Some(self.queries.poll_documents(
            DocumentsOwner::Namespace(selected.as_str()),
            params,
            self.config.in_progress_interval(),
            self.config.refetch_interval(),
        ))
    }

    /// Ask the user to confirm a deletion
    pub fn request_delete(&self, request: DeleteDialogRequest) {
        self.store.dispatch(&Action::open_delete_dialog(request));
    }

    /// Run the pending deletion's handler; returns `false` if no dialog is
    /// open
    pub fn confirm_delete(&self) -> bool {
        let dialog = self.store.select(|state| selectors::delete_dialog(state).clone());
        let Some(handler) = dialog.on_delete.filter(|_| dialog.is_open) else {
            return false;
        };
        self.store.dispatch(&Action::delete_dialog_processing());
        handler.call();
        true
    }

    /// Record that the pending deletion failed
    pub fn fail_delete(&self) {
        self.store.dispatch(&Action::delete_dialog_error());
    }

    /// Dismiss the dialog
    pub fn close_delete(&self) {
        self.store.dispatch(&Action::close_delete_dialog());
    }
}

/// Combine query views into a page status
#[must_use]
pub fn page_status(views: &[hub_query::QueryView<'_, FetchError>]) -> PageStatus {
    PageStatus {
        status: aggregate(views),
        error: hub_query::first_error(views).cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_status_reports_first_error() {
        let ok = QueryResult::<u8, FetchError>::success(1);
        let first = QueryResult::<(), FetchError>::failed(FetchError::decode("first"));
        let second = QueryResult::<(), FetchError>::failed(FetchError::decode("second"));

        let status = page_status(&[ok.view(), first.view(), second.view()]);
        assert_eq!(status.status, QueryStatus::Error);
        assert_eq!(status.error, Some(FetchError::decode("first")));
    }

    #[test]
    fn empty_page_is_idle() {
        assert_eq!(
            page_status(&[]),
            PageStatus {
                status: QueryStatus::Idle,
                error: None
            }
        );
    }
}
