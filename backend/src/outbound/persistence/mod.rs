//! Course repository adapters.
//!
//! Two implementations of [`CourseRepository`](crate::domain::ports::CourseRepository)
//! live here:
//!
//! - [`InMemoryCourseRepository`]: an insertion-ordered vector. Used when no
//!   database is configured and throughout the test suite.
//! - [`DieselCourseRepository`]: PostgreSQL via Diesel, `diesel-async` and a
//!   `bb8` pool.
//!
//! Both reject writes that would duplicate a course name or identifier, so the
//! service can rely on the store to settle races between concurrent requests.
//!
//! # Example
//!
//! ```ignore
//! use courses::outbound::persistence::{DbPool, DieselCourseRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/courses")).await?;
//! let repo = DieselCourseRepository::new(pool);
//! ```

mod diesel_course_repository;
mod in_memory_course_repository;
mod models;
mod pool;
mod schema;

pub use diesel_course_repository::DieselCourseRepository;
pub use in_memory_course_repository::InMemoryCourseRepository;
pub use pool::{DEFAULT_POOL_SIZE, DbPool, PoolConfig, PoolError};
