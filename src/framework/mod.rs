//! Generic single-owner storage for resources.
//!
//! This module provides the building blocks for keeping any resource type in a
//! keyed store with a secondary index, where every mutation is serialized through
//! one owning task.
//!
//! # Main Components
//!
//! - [`Resource`] - Trait that stored types implement
//! - [`ResourceActor`] - The task that owns records and index
//! - [`StoreClient`] - Cloneable handle implementing [`ResourceStore`]
//! - [`StoreError`] - The store could not be reached
//!
//! # Testing
//!
//! See [`mock`] module for a scripted store that needs no actor.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use core::*;
