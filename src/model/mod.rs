//! Pure data structures kept in the catalog.

pub mod course;

pub use course::*;
