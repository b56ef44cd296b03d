//! Hub Console
//!
//! Headless session layer of the hub administration console: it loads data
//! from the hub server, decides which actions a user may see, keeps the
//! selected namespace, and resolves route parameters into entities.
//!
//! # Core Operations
//!
//! - **Configure**: [`ConsoleConfig::from_toml_str`]
//! - **Observe**: [`telemetry::init`] installs a `tracing` subscriber
//! - **Run**: [`ConsoleSession`] wires the store, the query caches, the
//!   permission gates and the project and namespace routes together
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────── hub-console ────────────────────────┐
//! │ ConsoleConfig ──► ConsoleSession                            │
//! └───────┬──────────────┬──────────────┬──────────────┬────────┘
//!         ▼              ▼              ▼              ▼
//!     hub-store      hub-api        hub-authz      hub-routing
//!                        │
//!                        ▼
//!                    hub-query
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use hub_console::prelude::*;
//!
//! let config = ConsoleConfig::from_toml_str(&std::fs::read_to_string("console.toml")?)?;
//! telemetry::init(&config.log)?;
//!
//! let session = ConsoleSession::new(config, transport)?;
//! session.select_namespace("ns-1")?;
//! let gate = PermissionGate::any_of([known::PROJECT_WRITE]);
//! if session.authorize(&gate).await.is_allowed() {
//!     // show the delete button
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod session;
pub mod telemetry;

pub use config::{ConsoleConfig, LogConfig, LogFormat, RetryConfig};
pub use error::{ConsoleError, ConsoleResult};
pub use session::{page_status, ConsoleSession, PageStatus, NAMESPACE_ROUTE, PROJECT_ROUTE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building on the console session
    pub use crate::config::ConsoleConfig;
    pub use crate::error::{ConsoleError, ConsoleResult};
    pub use crate::session::{ConsoleSession, PageStatus};
    pub use crate::telemetry;
    pub use hub_authz::{known, GateDecision, PermissionGate};
    pub use hub_query::{QueryResult, QueryStatus};
    pub use hub_routing::RouteScope;
    pub use hub_store::{Action, NamespaceId};
}
