//! Domain primitives, services and ports.
//!
//! Purpose: define the course record, the rules a submitted course must
//! satisfy, and the services that enforce identifier and name uniqueness.
//! Nothing in here knows about HTTP or a particular database; adapters live
//! under `inbound` and `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode — transport agnostic failure type.
//! - Course, CourseId, CourseName, Syllabus — the course record.
//! - CourseDraft, ValidationErrors — candidate records and their field errors.
//! - CourseService — implements the `CourseQuery` and `CourseCommand` ports.
//! - TraceId — request-scoped correlation identifier.

pub mod course;
pub mod course_service;
pub mod course_validation;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::course::{
    COURSE_ID_DIGITS, Course, CourseFieldError, CourseId, CourseIdValidationError, CourseName,
    NAME_MIN_CHARS, Syllabus,
};
pub use self::course_service::{
    CourseService, DEFAULT_ID_ALLOCATION_ATTEMPTS, DUPLICATE_NAME_MESSAGE, INVALID_ID_MESSAGE,
    NAME_TAKEN_MESSAGE, NOT_FOUND_MESSAGE, RESOURCE_EXISTS_MESSAGE,
};
pub use self::course_validation::{
    CourseDraft, CourseField, ValidCourseFields, ValidationErrors, validate,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
