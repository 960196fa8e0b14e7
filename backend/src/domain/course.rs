//! Course record and its validated components.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Number of decimal digits in a course identifier.
pub const COURSE_ID_DIGITS: usize = 5;

/// Minimum number of characters in a course name.
pub const NAME_MIN_CHARS: usize = 3;

/// Rejection raised when text does not have the course identifier shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("course id must be exactly {COURSE_ID_DIGITS} ASCII digits")]
pub struct CourseIdValidationError;

/// System-assigned course identifier: exactly five ASCII decimal digits.
///
/// # Examples
/// ```
/// use courses::domain::CourseId;
///
/// assert!(CourseId::new("04217").is_ok());
/// assert!(CourseId::new("4217").is_err());
/// assert!(CourseId::new("invalid_id").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseId(String);

impl CourseId {
    /// Validate and construct an identifier from text.
    pub fn new(id: impl Into<String>) -> Result<Self, CourseIdValidationError> {
        let id = id.into();
        if id.len() == COURSE_ID_DIGITS && id.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(id))
        } else {
            Err(CourseIdValidationError)
        }
    }

    /// Render the low five decimal digits of `value` as an identifier.
    pub(crate) fn from_low_digits(value: u32) -> Self {
        Self(format!(
            "{:0width$}",
            value % 100_000,
            width = COURSE_ID_DIGITS
        ))
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for CourseId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CourseId> for String {
    fn from(value: CourseId) -> Self {
        value.0
    }
}

impl TryFrom<String> for CourseId {
    type Error = CourseIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Field-level rule violations for a submitted course.
///
/// The `Display` output is the message returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CourseFieldError {
    /// `name` was missing or empty.
    #[error("Name is required")]
    NameRequired,
    /// `name` was shorter than the minimum length.
    #[error("Name must be at least {min} characters")]
    NameTooShort { min: usize },
    /// `syllabus` was missing or empty.
    #[error("Syllabus is required")]
    SyllabusRequired,
}

/// Course name: non-empty and at least [`NAME_MIN_CHARS`] characters long.
///
/// Length is counted in Unicode scalar values. Surrounding whitespace is
/// kept as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseName(String);

impl CourseName {
    /// Validate and construct a name.
    pub fn new(name: impl Into<String>) -> Result<Self, CourseFieldError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CourseFieldError::NameRequired);
        }
        if name.chars().count() < NAME_MIN_CHARS {
            return Err(CourseFieldError::NameTooShort {
                min: NAME_MIN_CHARS,
            });
        }
        Ok(Self(name))
    }

    /// Validate an optional submission, treating absence as missing.
    pub fn from_optional(name: Option<String>) -> Result<Self, CourseFieldError> {
        name.map_or(Err(CourseFieldError::NameRequired), Self::new)
    }

    /// Borrow the name text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for CourseName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CourseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CourseName> for String {
    fn from(value: CourseName) -> Self {
        value.0
    }
}

impl TryFrom<String> for CourseName {
    type Error = CourseFieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Free-form syllabus text; must not be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Syllabus(String);

impl Syllabus {
    /// Validate and construct a syllabus.
    pub fn new(syllabus: impl Into<String>) -> Result<Self, CourseFieldError> {
        let syllabus = syllabus.into();
        if syllabus.is_empty() {
            return Err(CourseFieldError::SyllabusRequired);
        }
        Ok(Self(syllabus))
    }

    /// Validate an optional submission, treating absence as missing.
    pub fn from_optional(syllabus: Option<String>) -> Result<Self, CourseFieldError> {
        syllabus.map_or(Err(CourseFieldError::SyllabusRequired), Self::new)
    }

    /// Borrow the syllabus text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Syllabus {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<Syllabus> for String {
    fn from(value: Syllabus) -> Self {
        value.0
    }
}

impl TryFrom<String> for Syllabus {
    type Error = CourseFieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A persisted course.
///
/// ## Invariants
/// - `id` has the five-digit identifier shape and never changes.
/// - `name` satisfies [`CourseName`] rules; uniqueness across records is
///   enforced by the service and the repository.
/// - `syllabus` is non-empty.
///
/// Serialises as `{"id": "12345", "name": "...", "syllabus": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "CourseDto", into = "CourseDto")]
pub struct Course {
    #[schema(value_type = String, example = "40213")]
    id: CourseId,
    #[schema(value_type = String, example = "Intro to AI")]
    name: CourseName,
    #[schema(value_type = String, example = "CSP, search, logic")]
    syllabus: Syllabus,
}

impl Course {
    /// Assemble a course from validated parts.
    pub fn new(id: CourseId, name: CourseName, syllabus: Syllabus) -> Self {
        Self { id, name, syllabus }
    }

    /// Stable identifier.
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    /// Unique course name.
    pub fn name(&self) -> &CourseName {
        &self.name
    }

    /// Syllabus text.
    pub fn syllabus(&self) -> &Syllabus {
        &self.syllabus
    }

    /// Replace the mutable fields, keeping the identifier.
    #[must_use]
    pub fn with_fields(self, name: CourseName, syllabus: Syllabus) -> Self {
        Self {
            id: self.id,
            name,
            syllabus,
        }
    }
}

/// Reasons a serialised course could not be read back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourseDtoError {
    #[error(transparent)]
    Id(#[from] CourseIdValidationError),
    #[error(transparent)]
    Field(#[from] CourseFieldError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CourseDto {
    id: String,
    name: String,
    syllabus: String,
}

impl From<Course> for CourseDto {
    fn from(value: Course) -> Self {
        Self {
            id: value.id.into(),
            name: value.name.into(),
            syllabus: value.syllabus.into(),
        }
    }
}

impl TryFrom<CourseDto> for Course {
    type Error = CourseDtoError;

    fn try_from(value: CourseDto) -> Result<Self, Self::Error> {
        Ok(Self::new(
            CourseId::new(value.id)?,
            CourseName::new(value.name)?,
            Syllabus::new(value.syllabus)?,
        ))
    }
}

#[cfg(test)]
mod tests;
