//! Typed query caches over a [`Transport`]
//!
//! One [`QueryCache`] per endpoint family. Every read goes through
//! `get_or_fetch`, so pages asking for the same data at the same time share
//! one request.

use crate::endpoints::{self, DocumentsOwner};
use crate::model::{CompanyLogo, Namespace, PageResult, Project, ServerInfo, UblDocument};
use crate::params::ListParams;
use crate::transport::{Request, Transport};
use hub_authz::User;
use hub_query::{
    CacheStats, FetchError, FetchOptions, FetchResult, Poller, QueryCache, QueryKey, QueryObserver,
    QueryResult, RefetchPolicy, RetryPolicy,
};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Query key scopes
pub mod scope {
    /// Server information
    pub const SERVER_INFO: &str = "server-info";
    /// Authenticated user
    pub const WHOAMI: &str = "whoami";
    /// Project list
    pub const PROJECTS: &str = "projects";
    /// Namespace list
    pub const NAMESPACES: &str = "namespaces";
    /// Company logos, keyed by project and RUC
    pub const COMPANY_LOGO: &str = "company-logo";
    /// Documents pages of projects and namespaces
    pub const DOCUMENTS: &str = "documents";
}

type DocumentsPage = PageResult<UblDocument>;

/// Hub queries sharing one transport
#[derive(Clone)]
pub struct HubQueries {
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
    server_info: QueryCache<ServerInfo>,
    user: QueryCache<User>,
    projects: QueryCache<Vec<Project>>,
    namespaces: QueryCache<Vec<Namespace>>,
    logos: QueryCache<CompanyLogo>,
    documents: QueryCache<DocumentsPage>,
}

impl HubQueries {
    /// Create caches holding up to `capacity` entries each
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, capacity: u64) -> Self {
        Self {
            transport,
            retry: RetryPolicy::default(),
            server_info: QueryCache::new(capacity),
            user: QueryCache::new(capacity),
            projects: QueryCache::new(capacity),
            namespaces: QueryCache::new(capacity),
            logos: QueryCache::new(capacity),
            documents: QueryCache::new(capacity),
        }
    }

    /// With retry policy applied to every query
    #[inline]
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn options<V>(&self) -> FetchOptions<V> {
        FetchOptions::new().with_retry(self.retry)
    }

    /// `GET /server-info`
    pub async fn server_info(&self) -> QueryResult<ServerInfo, FetchError> {
        let transport = &*self.transport;
        self.server_info
            .get_or_fetch(QueryKey::new(scope::SERVER_INFO), &self.options(), || {
                fetch_json(transport, Request::get(endpoints::SERVER_INFO))
            })
            .await
    }

    /// `GET /whoami`
    pub async fn current_user(&self) -> QueryResult<User, FetchError> {
        let transport = &*self.transport;
        self.user
            .get_or_fetch(QueryKey::new(scope::WHOAMI), &self.options(), || {
                fetch_json(transport, Request::get(endpoints::WHOAMI))
            })
            .await
    }

    /// `GET /projects`, sorted by name
    pub async fn projects(&self) -> QueryResult<Vec<Project>, FetchError> {
        let transport = &*self.transport;
        self.projects
            .get_or_fetch(QueryKey::new(scope::PROJECTS), &self.options(), move || async move {
                let mut projects: Vec<Project> =
                    fetch_json(transport, Request::get(endpoints::PROJECTS)).await?;
                projects.sort_by(|a, b| a.name.cmp(&b.name));
                Ok(projects)
            })
            .await
    }

    /// `GET /namespaces`
    pub async fn namespaces(&self) -> QueryResult<Vec<Namespace>, FetchError> {
        let transport = &*self.transport;
        self.namespaces
            .get_or_fetch(QueryKey::new(scope::NAMESPACES), &self.options(), || {
                fetch_json(transport, Request::get(endpoints::NAMESPACES))
            })
            .await
    }

    /// `GET /projects/{project}/companies/{ruc}/logo`
    pub async fn company_logo(&self, project: &str, ruc: &str) -> QueryResult<CompanyLogo, FetchError> {
        let transport = &*self.transport;
        let key = QueryKey::new(scope::COMPANY_LOGO).with_part(project).with_part(ruc);
        self.logos
            .get_or_fetch(key, &self.options(), || {
                fetch_logo(transport, Request::get(endpoints::company_logo(project, ruc)))
            })
            .await
    }

    /// `GET /projects/{name}/documents` or `GET /namespaces/{id}/documents`
    ///
    /// Stays `Idle` until an owner is known.
    pub async fn documents(
        &self,
        owner: Option<DocumentsOwner<'_>>,
        params: &ListParams,
    ) -> QueryResult<DocumentsPage, FetchError> {
        let Some(owner) = owner else {
            tracing::trace!("documents query waiting for an owner");
            return QueryResult::idle();
        };
        let transport = &*self.transport;
        self.documents
            .get_or_fetch(documents_key(owner, params), &self.options(), || {
                fetch_page(transport, documents_request(owner, params))
            })
            .await
    }

    /// Keep a documents page fresh in the background
    ///
    /// Refetches every `in_progress` while some document on the page is still
    /// being processed, otherwise every `idle` (`None` stops polling).
    #[must_use]
    pub fn poll_documents(
        &self,
        owner: DocumentsOwner<'_>,
        params: &ListParams,
        in_progress: Duration,
        idle: Option<Duration>,
    ) -> Poller {
        let transport = Arc::clone(&self.transport);
        let request = documents_request(owner, params);
        let options = self
            .options()
            .with_refetch(documents_refetch_policy(in_progress, idle));

        Poller::spawn(
            self.documents.clone(),
            documents_key(owner, params),
            options,
            move || {
                let transport = Arc::clone(&transport);
                let request = request.clone();
                async move { fetch_page(&*transport, request).await }
            },
        )
    }

    /// Observe a documents page
    #[must_use]
    pub fn observe_documents(&self, owner: DocumentsOwner<'_>, params: &ListParams) -> QueryObserver<DocumentsPage> {
        self.documents.subscribe(&documents_key(owner, params))
    }

    /// Statistics of the documents cache
    #[must_use]
    pub fn documents_stats(&self) -> CacheStats {
        self.documents.stats()
    }

    /// Observe the current user
    #[must_use]
    pub fn observe_user(&self) -> QueryObserver<User> {
        self.user.subscribe(&QueryKey::new(scope::WHOAMI))
    }

    /// Latest current-user snapshot without fetching
    #[must_use]
    pub fn user_snapshot(&self) -> QueryResult<User, FetchError> {
        self.user.snapshot(&QueryKey::new(scope::WHOAMI))
    }

    /// Drop the cached user; observers start a new cycle
    pub async fn invalidate_user(&self) {
        self.user.invalidate(&QueryKey::new(scope::WHOAMI)).await;
    }

    /// Drop cached documents of every project
    pub async fn invalidate_documents(&self) {
        self.documents.invalidate_scope(scope::DOCUMENTS).await;
    }

    /// Drop the cached project list
    pub async fn invalidate_projects(&self) {
        self.projects.invalidate(&QueryKey::new(scope::PROJECTS)).await;
    }

    /// Drop the cached namespace list
    pub async fn invalidate_namespaces(&self) {
        self.namespaces.invalidate(&QueryKey::new(scope::NAMESPACES)).await;
    }

    /// Forget document pages nobody observes
    pub async fn prune_documents(&self) -> usize {
        self.documents.prune_inactive(scope::DOCUMENTS).await
    }
}

impl fmt::Debug for HubQueries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubQueries")
            .field("retry", &self.retry)
            .field("documents", &self.documents.stats())
            .finish_non_exhaustive()
    }
}

/// Refetch policy for documents pages
#[must_use]
pub fn documents_refetch_policy(in_progress: Duration, idle: Option<Duration>) -> RefetchPolicy<DocumentsPage> {
    RefetchPolicy::dynamic(move |last: Option<&DocumentsPage>| {
        if last.is_some_and(PageResult::has_in_progress) {
            Some(in_progress)
        } else {
            idle
        }
    })
}

fn documents_key(owner: DocumentsOwner<'_>, params: &ListParams) -> QueryKey {
    QueryKey::new(scope::DOCUMENTS)
        .with_part(owner.kind())
        .with_part(owner.id())
        .with_part(params.to_string())
}

fn documents_request(owner: DocumentsOwner<'_>, params: &ListParams) -> Request {
    Request::get(owner.path()).with_query(params.to_query())
}

async fn fetch_json<V: DeserializeOwned>(transport: &dyn Transport, request: Request) -> FetchResult<V> {
    let response = transport.get(&request).await?.error_for_status()?;
    Ok(response.json()?)
}

async fn fetch_logo(transport: &dyn Transport, request: Request) -> FetchResult<CompanyLogo> {
    let response = transport.get(&request).await?.error_for_status()?;
    Ok(CompanyLogo::from_body(&response.body))
}

async fn fetch_page(transport: &dyn Transport, request: Request) -> FetchResult<DocumentsPage> {
    let response = transport.get(&request).await?.error_for_status()?;
    let data: Vec<UblDocument> = response.json()?;
    let total = match response.header(endpoints::TOTAL_HEADER) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| FetchError::decode(format!("invalid {} header: '{raw}'", endpoints::TOTAL_HEADER)))?,
        None => data.len() as u64,
    };
    Ok(PageResult { data, total })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(in_progress: bool) -> UblDocument {
        UblDocument {
            id: None,
            created_on: 0,
            in_progress,
            error: None,
            retry_count: 0,
            file_content: None,
            sunat: None,
        }
    }

    #[test]
    fn refetch_fast_while_documents_in_progress() {
        let policy = documents_refetch_policy(Duration::from_secs(3), Some(Duration::from_secs(60)));
        let busy = PageResult {
            data: vec![document(false), document(true)],
            total: 2,
        };
        let done = PageResult {
            data: vec![document(false)],
            total: 1,
        };
        assert_eq!(policy.next_interval(Some(&busy)), Some(Duration::from_secs(3)));
        assert_eq!(policy.next_interval(Some(&done)), Some(Duration::from_secs(60)));
        assert_eq!(policy.next_interval(None), Some(Duration::from_secs(60)));
    }

    #[test]
    fn documents_key_includes_params() {
        let acme = DocumentsOwner::Project("acme");
        let a = documents_key(acme, &ListParams::new().with_filter_text("x"));
        let b = documents_key(acme, &ListParams::new());
        assert_ne!(a, b);
        assert!(a.in_scope(scope::DOCUMENTS));
    }

    #[test]
    fn documents_key_separates_projects_from_namespaces() {
        let params = ListParams::new();
        assert_ne!(
            documents_key(DocumentsOwner::Project("1"), &params),
            documents_key(DocumentsOwner::Namespace("1"), &params)
        );
    }
}
