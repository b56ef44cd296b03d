//! Endpoint paths of the hub server

/// `GET` server information
pub const SERVER_INFO: &str = "/server-info";

/// `GET` the authenticated user
pub const WHOAMI: &str = "/whoami";

/// `GET` all projects
pub const PROJECTS: &str = "/projects";

/// `GET` all namespaces
pub const NAMESPACES: &str = "/namespaces";

/// Response header carrying the total item count of a listing
pub const TOTAL_HEADER: &str = "x-total";

/// `GET` a company's logo
#[must_use]
pub fn company_logo(project: &str, ruc: &str) -> String {
    format!("/projects/{project}/companies/{ruc}/logo")
}

/// `GET` a project's documents
#[must_use]
pub fn documents(project: &str) -> String {
    format!("/projects/{project}/documents")
}

/// `GET` a namespace's documents
#[must_use]
pub fn namespace_documents(namespace: &str) -> String {
    format!("/namespaces/{namespace}/documents")
}

/// Resource a documents listing belongs to
///
/// Project names and namespace ids live in different id spaces, so a
/// listing always says which one it is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentsOwner<'a> {
    /// Project, by name
    Project(&'a str),
    /// Namespace, by id
    Namespace(&'a str),
}

impl DocumentsOwner<'_> {
    /// Listing path on the server
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Project(name) => documents(name),
            Self::Namespace(id) => namespace_documents(id),
        }
    }

    /// Resource kind, as used in query keys
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Project(_) => "project",
            Self::Namespace(_) => "namespace",
        }
    }

    /// Project name or namespace id
    #[inline]
    #[must_use]
    pub const fn id(&self) -> &str {
        match self {
            Self::Project(id) | Self::Namespace(id) => *id,
        }
    }
}
