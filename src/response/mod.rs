//! The externally visible payloads: course representations with links, wrapped in
//! a [`Reply`] envelope.

pub mod assembler;
pub mod reply;

pub use assembler::*;
pub use reply::*;
