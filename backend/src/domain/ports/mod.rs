//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`CourseRepository`, `CourseIdGenerator`) describe what the
//! domain needs from storage and randomness. Driving ports (`CourseQuery`,
//! `CourseCommand`) are what inbound adapters call; `CourseService`
//! implements both.

mod macros;
pub(crate) use macros::define_port_error;

mod course_command;
mod course_id_generator;
mod course_query;
mod course_repository;

pub use course_command::CourseCommand;
#[cfg(test)]
pub use course_command::MockCourseCommand;
#[cfg(test)]
pub use course_id_generator::MockCourseIdGenerator;
pub use course_id_generator::{
    CourseIdGenerator, RandomCourseIdGenerator, SequentialCourseIdGenerator,
};
pub use course_query::CourseQuery;
#[cfg(test)]
pub use course_query::MockCourseQuery;
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CourseRepository, CourseRepositoryError};
