//! Port abstraction for course persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Course, CourseId, CourseName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "course repository query failed: {message}",
        /// Another course already uses this name.
        DuplicateName { name: String } => "course name already in use: {name}",
        /// Another course already uses this identifier.
        DuplicateId { id: String } => "course id already in use: {id}",
    }
}

/// Storage for course records.
///
/// Adapters own record lifetime and must behave as if `name` and `id` carry
/// unique indexes: writes that would duplicate either are rejected with
/// [`CourseRepositoryError::DuplicateName`] or
/// [`CourseRepositoryError::DuplicateId`] rather than applied.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Create the unique index on `name` (and any backing storage).
    ///
    /// Called once at startup before requests are served. Must be idempotent.
    async fn ensure_name_index(&self) -> Result<(), CourseRepositoryError>;

    /// All courses in insertion order.
    async fn list(&self) -> Result<Vec<Course>, CourseRepositoryError>;

    /// Fetch a course by identifier.
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    /// Fetch the course using `name`, if any.
    async fn find_by_name(
        &self,
        name: &CourseName,
    ) -> Result<Option<Course>, CourseRepositoryError>;

    /// Store a new course.
    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError>;

    /// Replace name and syllabus of the course sharing `course.id()`.
    ///
    /// Returns the stored course, or `None` when no course has that id.
    async fn update(&self, course: &Course) -> Result<Option<Course>, CourseRepositoryError>;

    /// Remove a course, returning it if it existed.
    async fn delete(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError>;
}
