//! Required-field rules for submitted courses.
//!
//! Every rule is evaluated, so a single submission reports all of its
//! failing fields at once:
//!
//! - `name` missing or empty: "Name is required".
//! - `name` shorter than three characters: "Name must be at least 3
//!   characters".
//! - `syllabus` missing or empty: "Syllabus is required".

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use super::{CourseFieldError, CourseName, Error, Syllabus};

/// Candidate course as submitted by a client. Any identifier the client sent
/// has already been discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseDraft {
    pub name: Option<String>,
    pub syllabus: Option<String>,
}

impl CourseDraft {
    /// Build a draft from present values.
    pub fn new(name: impl Into<String>, syllabus: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            syllabus: Some(syllabus.into()),
        }
    }

    /// Apply every rule, returning the validated fields or all failures.
    ///
    /// # Examples
    /// ```
    /// use courses::domain::{CourseDraft, CourseField};
    ///
    /// let draft = CourseDraft { name: Some("AB".into()), syllabus: None };
    /// let errors = draft.validate().unwrap_err();
    /// assert_eq!(errors.len(), 2);
    /// assert!(errors.get(CourseField::Syllabus).is_some());
    /// ```
    pub fn validate(self) -> Result<ValidCourseFields, ValidationErrors> {
        let name = CourseName::from_optional(self.name);
        let syllabus = Syllabus::from_optional(self.syllabus);

        match (name, syllabus) {
            (Ok(name), Ok(syllabus)) => Ok(ValidCourseFields { name, syllabus }),
            (name, syllabus) => {
                let mut errors = ValidationErrors::default();
                if let Err(err) = name {
                    errors.insert(CourseField::Name, err);
                }
                if let Err(err) = syllabus {
                    errors.insert(CourseField::Syllabus, err);
                }
                Err(errors)
            }
        }
    }
}

/// Fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCourseFields {
    pub name: CourseName,
    pub syllabus: Syllabus,
}

/// Course attributes subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CourseField {
    Name,
    Syllabus,
}

impl CourseField {
    /// Field name as it appears in request and response bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Syllabus => "syllabus",
        }
    }
}

impl fmt::Display for CourseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping of field to the rule it failed. Empty means acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<CourseField, CourseFieldError>);

impl ValidationErrors {
    fn insert(&mut self, field: CourseField, error: CourseFieldError) {
        self.0.insert(field, error);
    }

    /// Whether no rule failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Failure recorded for `field`, if any.
    pub fn get(&self, field: CourseField) -> Option<&CourseFieldError> {
        self.0.get(&field)
    }

    /// Failures in field order.
    pub fn iter(&self) -> impl Iterator<Item = (CourseField, &CourseFieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    /// Render as a JSON object of field name to message.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .iter()
            .map(|(field, error)| (field.as_str().to_owned(), Value::String(error.to_string())))
            .collect();
        Value::Object(map)
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::invalid_request("course validation failed").with_details(errors.to_json())
    }
}

/// Check a draft without consuming it.
pub fn validate(draft: &CourseDraft) -> ValidationErrors {
    draft.clone().validate().err().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, NAME_MIN_CHARS};
    use rstest::rstest;
    use serde_json::json;

    fn draft(name: Option<&str>, syllabus: Option<&str>) -> CourseDraft {
        CourseDraft {
            name: name.map(str::to_owned),
            syllabus: syllabus.map(str::to_owned),
        }
    }

    #[rstest]
    #[case(draft(Some("Intro to AI"), Some("CSP, search, logic")))]
    #[case(draft(Some("abc"), Some("x")))]
    #[case(draft(Some("   "), Some(" ")))]
    fn accepts_complete_drafts(#[case] candidate: CourseDraft) {
        assert!(validate(&candidate).is_empty());
        let fields = candidate.clone().validate().expect("valid draft");
        assert_eq!(Some(fields.name.as_str()), candidate.name.as_deref());
        assert_eq!(
            Some(fields.syllabus.as_str()),
            candidate.syllabus.as_deref()
        );
    }

    #[rstest]
    #[case(draft(None, Some("x")), json!({ "name": "Name is required" }))]
    #[case(draft(Some(""), Some("x")), json!({ "name": "Name is required" }))]
    #[case(draft(Some("AB"), Some("x")), json!({ "name": "Name must be at least 3 characters" }))]
    #[case(draft(Some("Intro"), None), json!({ "syllabus": "Syllabus is required" }))]
    #[case(draft(Some("Intro"), Some("")), json!({ "syllabus": "Syllabus is required" }))]
    #[case(
        draft(None, None),
        json!({ "name": "Name is required", "syllabus": "Syllabus is required" })
    )]
    #[case(
        draft(Some("AB"), None),
        json!({ "name": "Name must be at least 3 characters", "syllabus": "Syllabus is required" })
    )]
    fn reports_every_failing_field(#[case] candidate: CourseDraft, #[case] expected: Value) {
        assert_eq!(validate(&candidate).to_json(), expected);
    }

    #[rstest]
    fn short_and_missing_name_rules_are_exclusive() {
        let errors = validate(&draft(Some(""), Some("x")));
        assert_eq!(
            errors.get(CourseField::Name),
            Some(&CourseFieldError::NameRequired)
        );
        let errors = validate(&draft(Some("ab"), Some("x")));
        assert_eq!(
            errors.get(CourseField::Name),
            Some(&CourseFieldError::NameTooShort {
                min: NAME_MIN_CHARS
            })
        );
    }

    #[rstest]
    fn converts_into_invalid_request_with_field_details() {
        let errors = validate(&draft(Some("AB"), None));
        let error = Error::from(errors);
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.details(),
            Some(&json!({
                "name": "Name must be at least 3 characters",
                "syllabus": "Syllabus is required",
            }))
        );
    }
}
