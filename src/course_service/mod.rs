//! Course-specific orchestration: validation in front of the store.

pub mod entity;
pub mod error;

pub use error::*;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::framework::{ResourceActor, ResourceStore, StoreClient};
use crate::model::{category_key, Course};

/// Creates a new Course store actor and its client.
///
/// Ids are handed out as `1, 2, 3, …`.
pub fn new_store(buffer_size: usize) -> (ResourceActor<Course>, StoreClient<Course>) {
    let course_id_counter = Arc::new(AtomicU64::new(1));
    let next_course_id = move || course_id_counter.fetch_add(1, Ordering::SeqCst);

    ResourceActor::new(buffer_size, next_course_id)
}

/// Checks the field invariants every stored course satisfies.
pub fn validate(course: &Course) -> Result<(), CourseError> {
    if course.title.trim().is_empty() {
        return Err(CourseError::Validation("title must not be empty".into()));
    }
    if course.category.trim().is_empty() {
        return Err(CourseError::Validation("category must not be empty".into()));
    }
    if course.rating > Course::MAX_RATING {
        return Err(CourseError::Validation(format!(
            "rating must be between 0 and {}, got {}",
            Course::MAX_RATING,
            course.rating
        )));
    }
    Ok(())
}

/// The course operations offered to the transport layer.
///
/// Read paths report absence as a value (`None` or an empty `Vec`); only
/// validation, a missing update target and an unreachable store are errors.
pub struct CourseService<S = StoreClient<Course>> {
    store: S,
}

impl<S: ResourceStore<Course>> CourseService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn get_courses(&self) -> Result<Vec<Course>, CourseError> {
        self.store.find_all().await.map_err(storage_failure)
    }

    #[instrument(skip(self))]
    pub async fn get_course_by_id(&self, id: u64) -> Result<Option<Course>, CourseError> {
        self.store.find_by_id(id).await.map_err(storage_failure)
    }

    /// Courses whose category matches `category` ignoring case and surrounding space.
    #[instrument(skip(self))]
    pub async fn get_courses_by_category(&self, category: &str) -> Result<Vec<Course>, CourseError> {
        let key = category_key(category);
        if key.is_empty() {
            return Ok(Vec::new());
        }
        self.store.find_by_index(key).await.map_err(storage_failure)
    }

    /// Stores a new course under a freshly assigned id; any id on the input is ignored.
    #[instrument(skip(self, course), fields(title = %course.title))]
    pub async fn create_course(&self, course: Course) -> Result<Course, CourseError> {
        debug!(?course, "create_course called");
        validate(&course).inspect_err(|e| debug!(error = %e, "Rejected"))?;

        let created = self
            .store
            .save(Course { id: None, ..course })
            .await
            .map_err(storage_failure)?;
        info!(id = ?created.id, "Course created");
        Ok(created)
    }

    /// Overwrites every non-identity field of the course stored under `id`.
    #[instrument(skip(self, course))]
    pub async fn update_course(&self, id: u64, course: Course) -> Result<Course, CourseError> {
        debug!(?course, "update_course called");
        validate(&course).inspect_err(|e| debug!(error = %e, "Rejected"))?;

        match self
            .store
            .replace(Course { id: Some(id), ..course })
            .await
            .map_err(storage_failure)?
        {
            Some(updated) => {
                info!("Course updated");
                Ok(updated)
            }
            None => {
                warn!("Course not found");
                Err(CourseError::NotFound(id))
            }
        }
    }

    /// Removes the course; deleting an id that is not stored also succeeds.
    #[instrument(skip(self))]
    pub async fn delete_course_by_id(&self, id: u64) -> Result<(), CourseError> {
        let removed = self.store.delete_by_id(id).await.map_err(storage_failure)?;
        info!(removed, "Course deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_courses(&self) -> Result<(), CourseError> {
        let removed = self.store.delete_all().await.map_err(storage_failure)?;
        info!(removed, "All courses deleted");
        Ok(())
    }
}

fn storage_failure(e: crate::framework::StoreError) -> CourseError {
    error!(error = %e, "Store unreachable");
    CourseError::from(e)
}
