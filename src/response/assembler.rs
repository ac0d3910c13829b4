use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::course_service::{CourseError, CourseService};
use crate::framework::{ResourceStore, StoreClient};
use crate::links::{LinkDeriver, LinkSet, RouteTable};
use crate::model::Course;

use super::reply::Reply;

/// A course as sent to clients: its fields plus the links for what to do next.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseRepresentation {
    #[serde(flatten)]
    pub course: Course,
    pub links: LinkSet,
}

/// A list of courses with per-course links and collection-level links.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseCollection {
    pub courses: Vec<CourseRepresentation>,
    pub links: LinkSet,
}

/// Answer for operations that do not return a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Acknowledgement {
    pub message: String,
}

/// Combines [`CourseService`] results with [`LinkDeriver`] output.
///
/// This is the only place that knows the envelope shape; the deriver and the
/// service stay unaware of how results reach the client.
pub struct ResponseAssembler<S = StoreClient<Course>> {
    service: Arc<CourseService<S>>,
    routes: Arc<RouteTable>,
}

impl<S> Clone for ResponseAssembler<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            routes: self.routes.clone(),
        }
    }
}

impl<S: ResourceStore<Course>> ResponseAssembler<S> {
    pub fn new(service: Arc<CourseService<S>>, routes: Arc<RouteTable>) -> Self {
        Self { service, routes }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn represent(&self, course: Course) -> CourseRepresentation {
        let links = LinkDeriver::derive(&course, &self.routes);
        CourseRepresentation { course, links }
    }

    pub fn represent_all(&self, courses: Vec<Course>) -> CourseCollection {
        let courses = courses
            .into_iter()
            .map(|course| self.represent(course))
            .collect();
        CourseCollection {
            courses,
            links: LinkDeriver::collection_links(&self.routes),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_courses(&self) -> Reply<CourseCollection> {
        match self.service.get_courses().await {
            Ok(courses) => Reply::Ok(self.represent_all(courses)),
            Err(e) => failure(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_course_by_id(&self, id: u64) -> Reply<CourseRepresentation> {
        match self.service.get_course_by_id(id).await {
            Ok(Some(course)) => Reply::Ok(self.represent(course)),
            Ok(None) => {
                debug!("No such course");
                Reply::NotFound {
                    message: CourseError::NotFound(id).to_string(),
                }
            }
            Err(e) => failure(e),
        }
    }

    /// An empty match is an empty collection, not a failure.
    #[instrument(skip(self))]
    pub async fn get_courses_by_category(&self, category: &str) -> Reply<CourseCollection> {
        match self.service.get_courses_by_category(category).await {
            Ok(courses) => Reply::Ok(self.represent_all(courses)),
            Err(e) => failure(e),
        }
    }

    #[instrument(skip(self, course))]
    pub async fn create_course(&self, course: Course) -> Reply<CourseRepresentation> {
        match self.service.create_course(course).await {
            Ok(created) => Reply::Created(self.represent(created)),
            Err(e) => failure(e),
        }
    }

    #[instrument(skip(self, course))]
    pub async fn update_course(&self, id: u64, course: Course) -> Reply<CourseRepresentation> {
        match self.service.update_course(id, course).await {
            Ok(updated) => Reply::Ok(self.represent(updated)),
            Err(e) => failure(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_course_by_id(&self, id: u64) -> Reply<Acknowledgement> {
        match self.service.delete_course_by_id(id).await {
            Ok(()) => Reply::Ok(Acknowledgement {
                message: format!("Course with id {id} deleted!"),
            }),
            Err(e) => failure(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_courses(&self) -> Reply<Acknowledgement> {
        match self.service.delete_courses().await {
            Ok(()) => Reply::Ok(Acknowledgement {
                message: "All courses deleted!".into(),
            }),
            Err(e) => failure(e),
        }
    }
}

fn failure<T>(e: CourseError) -> Reply<T> {
    let message = e.to_string();
    match e {
        CourseError::Validation(_) => Reply::Rejected { message },
        CourseError::NotFound(_) => Reply::NotFound { message },
        CourseError::StorageUnavailable(_) => Reply::Unavailable { message },
    }
}
