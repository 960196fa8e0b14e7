//! Course domain service.
//!
//! Implements the `CourseQuery` and `CourseCommand` driving ports on top of a
//! [`CourseRepository`]. The service owns the rules that span records:
//! names are unique, identifiers are allocated by generate-check-retry, and
//! updates and deletes only touch records that exist.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CourseCommand, CourseIdGenerator, CourseQuery, CourseRepository, CourseRepositoryError,
};
use crate::domain::{Course, CourseDraft, CourseId, Error, ValidCourseFields};

/// Identifier candidates tried before creation gives up.
pub const DEFAULT_ID_ALLOCATION_ATTEMPTS: u32 = 32;

/// Conflict message when creating a course whose name is taken.
pub const DUPLICATE_NAME_MESSAGE: &str = "Course with this name already exists";

/// Conflict message when renaming a course to a name another course uses.
pub const NAME_TAKEN_MESSAGE: &str = "Another course with this name already exists";

/// Message for lookups of identifiers with no course.
pub const NOT_FOUND_MESSAGE: &str = "Course not found";

/// Conflict message when a write collides with no more specific explanation.
pub const RESOURCE_EXISTS_MESSAGE: &str = "Resource already exists";

/// Message for identifiers that do not have the five-digit shape.
pub const INVALID_ID_MESSAGE: &str = "Invalid course ID";

/// Course service implementing the driving ports.
#[derive(Clone)]
pub struct CourseService<R, G> {
    repo: Arc<R>,
    ids: Arc<G>,
    max_id_attempts: u32,
}

impl<R, G> CourseService<R, G> {
    /// Create a service over a repository and an identifier source.
    pub fn new(repo: Arc<R>, ids: Arc<G>) -> Self {
        Self {
            repo,
            ids,
            max_id_attempts: DEFAULT_ID_ALLOCATION_ATTEMPTS,
        }
    }

    /// Bound the number of identifier candidates tried per creation.
    ///
    /// Values below one are raised to one.
    #[must_use]
    pub fn with_id_allocation_attempts(mut self, attempts: u32) -> Self {
        self.max_id_attempts = attempts.max(1);
        self
    }

    /// Configured identifier allocation bound.
    pub fn id_allocation_attempts(&self) -> u32 {
        self.max_id_attempts
    }
}

impl<R, G> CourseService<R, G>
where
    R: CourseRepository,
    G: CourseIdGenerator,
{
    fn map_repository_error(error: CourseRepositoryError) -> Error {
        match error {
            CourseRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("course repository unavailable: {message}"))
            }
            CourseRepositoryError::Query { message } => {
                Error::internal(format!("course repository error: {message}"))
            }
            CourseRepositoryError::DuplicateName { .. } => Error::conflict(RESOURCE_EXISTS_MESSAGE),
            CourseRepositoryError::DuplicateId { id } => {
                Error::internal(format!("unexpected course id collision: {id}"))
            }
        }
    }

    async fn require(&self, id: &CourseId) -> Result<Course, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
    }

    async fn insert_with_fresh_id(&self, fields: ValidCourseFields) -> Result<Course, Error> {
        let ValidCourseFields { name, syllabus } = fields;

        for attempt in 1..=self.max_id_attempts {
            let id = self.ids.next_id();
            let taken = self
                .repo
                .find_by_id(&id)
                .await
                .map_err(Self::map_repository_error)?
                .is_some();
            if taken {
                debug!(%id, attempt, "course id candidate already in use");
                continue;
            }

            let course = Course::new(id, name.clone(), syllabus.clone());
            match self.repo.insert(&course).await {
                Ok(()) => return Ok(course),
                Err(CourseRepositoryError::DuplicateId { id }) => {
                    debug!(%id, attempt, "course id claimed concurrently");
                }
                Err(CourseRepositoryError::DuplicateName { .. }) => {
                    return Err(Error::conflict(DUPLICATE_NAME_MESSAGE));
                }
                Err(err) => return Err(Self::map_repository_error(err)),
            }
        }

        warn!(
            attempts = self.max_id_attempts,
            "exhausted course id allocation attempts"
        );
        Err(Error::internal(format!(
            "no free course id after {} attempts",
            self.max_id_attempts
        )))
    }
}

#[async_trait]
impl<R, G> CourseQuery for CourseService<R, G>
where
    R: CourseRepository,
    G: CourseIdGenerator,
{
    async fn list(&self) -> Result<Vec<Course>, Error> {
        self.repo.list().await.map_err(Self::map_repository_error)
    }

    async fn get(&self, id: &CourseId) -> Result<Course, Error> {
        self.require(id).await
    }
}

#[async_trait]
impl<R, G> CourseCommand for CourseService<R, G>
where
    R: CourseRepository,
    G: CourseIdGenerator,
{
    async fn create(&self, draft: CourseDraft) -> Result<Course, Error> {
        let fields = draft.validate()?;

        let existing = self
            .repo
            .find_by_name(&fields.name)
            .await
            .map_err(Self::map_repository_error)?;
        if existing.is_some() {
            return Err(Error::conflict(DUPLICATE_NAME_MESSAGE));
        }

        let course = self.insert_with_fresh_id(fields).await?;
        info!(id = %course.id(), name = %course.name(), "course created");
        Ok(course)
    }

    async fn update(&self, id: &CourseId, draft: CourseDraft) -> Result<Course, Error> {
        let fields = draft.validate()?;
        let current = self.require(id).await?;

        let holder = self
            .repo
            .find_by_name(&fields.name)
            .await
            .map_err(Self::map_repository_error)?;
        if holder.is_some_and(|other| other.id() != id) {
            return Err(Error::conflict(NAME_TAKEN_MESSAGE));
        }

        let replacement = current.with_fields(fields.name, fields.syllabus);
        match self.repo.update(&replacement).await {
            Ok(Some(course)) => {
                info!(%id, name = %course.name(), "course updated");
                Ok(course)
            }
            Ok(None) => Err(Error::not_found(NOT_FOUND_MESSAGE)),
            Err(CourseRepositoryError::DuplicateName { .. }) => {
                Err(Error::conflict(NAME_TAKEN_MESSAGE))
            }
            Err(err) => Err(Self::map_repository_error(err)),
        }
    }

    async fn delete(&self, id: &CourseId) -> Result<Course, Error> {
        self.require(id).await?;

        let removed = self
            .repo
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))?;
        info!(%id, name = %removed.name(), "course deleted");
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "course_service_tests.rs"]
mod tests;
