//! Driving port for reading courses.

use async_trait::async_trait;

use crate::domain::{Course, CourseId, Error};

/// Read-side operations exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseQuery: Send + Sync {
    /// Every stored course in insertion order.
    async fn list(&self) -> Result<Vec<Course>, Error>;

    /// The course with `id`, or a `NotFound` error.
    async fn get(&self, id: &CourseId) -> Result<Course, Error>;
}
