//! Error types for the course service.

use thiserror::Error;

use crate::framework::StoreError;

/// Errors that can occur during course operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CourseError {
    /// The supplied course violates a field invariant.
    #[error("Course validation error: {0}")]
    Validation(String),

    /// An update referenced an id that is not stored.
    #[error("Course not found: {0}")]
    NotFound(u64),

    /// The backing store could not be reached.
    #[error("Course storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<StoreError> for CourseError {
    fn from(e: StoreError) -> Self {
        CourseError::StorageUnavailable(e.to_string())
    }
}
