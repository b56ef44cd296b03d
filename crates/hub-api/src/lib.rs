//! Hub API
//!
//! The read side of the hub server as seen by the console core.
//!
//! # Core Operations
//!
//! - **Transport**: [`Transport`] is the seam to the HTTP client; the core
//!   never constructs one
//! - **Models**: [`ServerInfo`], [`Project`], [`Namespace`], [`CompanyLogo`],
//!   [`UblDocument`] pages
//! - **Queries**: [`HubQueries`] wraps every endpoint in a deduplicating
//!   [`hub_query::QueryCache`]
//!
//! # Architecture
//!
//! ```text
//! HubQueries ──get_or_fetch──► QueryCache ──fetch──► dyn Transport ──► server
//!      │                                                  │
//!      └──────── QueryResult<_, FetchError> ◄─TransportError
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use hub_api::HubQueries;
//! use std::sync::Arc;
//!
//! let queries = HubQueries::new(Arc::new(my_transport), 1_000);
//! let projects = queries.projects().await;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod endpoints;
pub mod error;
pub mod model;
pub mod params;
pub mod queries;
pub mod transport;

pub use endpoints::DocumentsOwner;
pub use error::{TransportError, TransportResult};
pub use model::{CompanyLogo, FileContent, Namespace, PageResult, Project, ServerInfo, SunatStatus, UblDocument};
pub use params::{ListParams, Pagination, SortDirection};
pub use queries::{documents_refetch_policy, HubQueries};
pub use transport::{Request, Response, Transport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
