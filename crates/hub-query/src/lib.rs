//! Hub Query Layer
//!
//! Snapshots of independent asynchronous data sources and the pieces that
//! combine and share them.
//!
//! # Core Operations
//!
//! - **Aggregate**: reduce many [`QueryResult`]s to one [`QueryStatus`]
//!   (`Error` > `Loading` > `Success` > `Idle`) and find the first error
//! - **Cache**: [`QueryCache::get_or_fetch`] with at most one in-flight fetch
//!   per [`QueryKey`], `invalidate`, and per-key subscriptions
//! - **Poll**: [`Poller`] refetches a key on its [`RefetchPolicy`]
//!
//! # Architecture
//!
//! ```text
//! page ──get_or_fetch──► QueryCache ──fetch──► transport
//!   ▲                        │
//!   └──── QueryObserver ◄────┘ (Idle → Loading → Success | Error)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use hub_query::prelude::*;
//!
//! # async fn example() {
//! let cache = QueryCache::<Vec<String>>::new(100);
//! let key = QueryKey::new("namespaces");
//!
//! let namespaces = cache
//!     .get_or_fetch(key, &FetchOptions::new(), || async { Ok(vec!["ns-1".into()]) })
//!     .await;
//! let user = QueryResult::<(), FetchError>::loading();
//!
//! assert_eq!(aggregate(&[namespaces.view(), user.view()]), QueryStatus::Loading);
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod aggregate;
pub mod cache;
pub mod error;
pub mod key;
pub mod options;
pub mod poller;
pub mod status;

// Re-exports for convenience
pub use aggregate::{aggregate, aggregate_statuses, errored, first_error};
pub use cache::{CacheStats, QueryCache, QueryObserver};
pub use error::{FetchError, FetchResult, QueryError};
pub use key::QueryKey;
pub use options::{FetchOptions, RefetchPolicy, RetryPolicy};
pub use poller::Poller;
pub use status::{allowed_transitions, validate_transition, QueryResult, QueryStatus, QueryView};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the query layer
    pub use crate::aggregate::{aggregate, first_error};
    pub use crate::cache::{QueryCache, QueryObserver};
    pub use crate::error::FetchError;
    pub use crate::key::QueryKey;
    pub use crate::options::{FetchOptions, RefetchPolicy, RetryPolicy};
    pub use crate::status::{QueryResult, QueryStatus, QueryView};
}
