//! Driving port for mutating courses.

use async_trait::async_trait;

use crate::domain::{Course, CourseDraft, CourseId, Error};

/// Write-side operations exposed to inbound adapters.
///
/// Implementations validate the draft, enforce name uniqueness and allocate
/// identifiers. Validation failures are returned as `InvalidRequest` errors
/// whose details map field names to messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCommand: Send + Sync {
    /// Create a course with a freshly allocated identifier.
    async fn create(&self, draft: CourseDraft) -> Result<Course, Error>;

    /// Replace the name and syllabus of an existing course.
    async fn update(&self, id: &CourseId, draft: CourseDraft) -> Result<Course, Error>;

    /// Remove a course and return what was removed.
    async fn delete(&self, id: &CourseId) -> Result<Course, Error>;
}
