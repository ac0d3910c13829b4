//! Hypermedia links: which next operations a client may take on a resource.
//!
//! # Main Components
//!
//! - [`RouteTable`] / [`RouteDescriptor`] - declarative description of the operations
//! - [`LinkDeriver`] - turns a resource plus a route table into a [`LinkSet`]
//! - [`Linkable`] - the field lookup a resource offers to route templates
//!
//! None of these know how the final response is serialized or dispatched.

mod deriver;
mod link_set;
pub mod route;

pub use deriver::*;
pub use link_set::*;
pub use route::{rel, HttpMethod, PathTemplate, RouteDescriptor, RouteTable, Scope};
