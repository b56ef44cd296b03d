//! Hub Routing
//!
//! Turns the entity name carried by a route into the entity a page needs,
//! and hands it to the pages below that route.
//!
//! # Core Operations
//!
//! - **Resolve**: [`resolve`] / [`resolve_detailed`] match a route parameter
//!   against a separately loaded collection of [`Named`] entities
//! - **Match/Format**: [`PathTemplate`] turns `/projects/:projectName` into
//!   [`RouteParams`] and back
//! - **Scope**: [`RouteScope`] carries resolved entities down a route subtree
//!
//! # Example
//!
//! ```rust,ignore
//! use hub_routing::{EntityRoute, RouteScope};
//!
//! let route = EntityRoute::new("/projects/:projectName", "projectName")?;
//! if let Some(scope) = route.scope(&RouteScope::root(), "/projects/acme", &projects) {
//!     let project = scope.get::<Project>();
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod resolver;
pub mod route;
pub mod scope;
pub mod template;

pub use error::{RoutingError, RoutingResult};
pub use resolver::{resolve, resolve_by, resolve_detailed, Named, Resolution};
pub use route::EntityRoute;
pub use scope::RouteScope;
pub use template::{PathTemplate, RouteParams};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
