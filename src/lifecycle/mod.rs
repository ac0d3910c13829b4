//! Process lifecycle: starting and stopping the catalog, and logging setup.
//!
//! # Main Components
//!
//! - [`CatalogSystem`] - wires store, service, route table and assembler together
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod catalog_system;
pub mod tracing;

pub use self::catalog_system::CatalogSystem;
pub use self::tracing::setup_tracing;
