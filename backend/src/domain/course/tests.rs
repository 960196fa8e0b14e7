//! Tests for course identifiers, names and serialisation.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case("00000")]
#[case("12345")]
#[case("99999")]
fn accepts_five_digit_identifiers(#[case] raw: &str) {
    let id = CourseId::new(raw).expect("valid identifier");
    assert_eq!(id.as_str(), raw);
}

#[rstest]
#[case("")]
#[case("1234")]
#[case("123456")]
#[case("12a45")]
#[case(" 1234")]
#[case("invalid_id")]
#[case("507f1f77bcf86cd799439011")]
#[case("１２３４５")]
fn rejects_other_identifier_shapes(#[case] raw: &str) {
    assert_eq!(CourseId::new(raw), Err(CourseIdValidationError));
}

#[rstest]
#[case(42, "00042")]
#[case(99_999, "99999")]
#[case(142_000, "42000")]
fn low_digits_are_zero_padded(#[case] value: u32, #[case] expected: &str) {
    assert_eq!(CourseId::from_low_digits(value).as_str(), expected);
}

#[rstest]
#[case("", CourseFieldError::NameRequired)]
#[case("A", CourseFieldError::NameTooShort { min: NAME_MIN_CHARS })]
#[case("AB", CourseFieldError::NameTooShort { min: NAME_MIN_CHARS })]
fn rejects_short_names(#[case] raw: &str, #[case] expected: CourseFieldError) {
    assert_eq!(CourseName::new(raw), Err(expected));
}

#[rstest]
fn counts_name_length_in_characters() {
    assert!(CourseName::new("日本語").is_ok());
    assert!(CourseName::new("é").is_err());
}

#[rstest]
fn missing_fields_are_required() {
    assert_eq!(
        CourseName::from_optional(None),
        Err(CourseFieldError::NameRequired)
    );
    assert_eq!(
        Syllabus::from_optional(None),
        Err(CourseFieldError::SyllabusRequired)
    );
    assert_eq!(
        Syllabus::from_optional(Some(String::new())),
        Err(CourseFieldError::SyllabusRequired)
    );
}

#[rstest]
fn field_errors_render_client_messages() {
    assert_eq!(
        CourseFieldError::NameRequired.to_string(),
        "Name is required"
    );
    assert_eq!(
        CourseFieldError::NameTooShort { min: 3 }.to_string(),
        "Name must be at least 3 characters"
    );
    assert_eq!(
        CourseFieldError::SyllabusRequired.to_string(),
        "Syllabus is required"
    );
}

fn sample_course() -> Course {
    Course::new(
        CourseId::new("40213").expect("valid id"),
        CourseName::new("Intro to AI").expect("valid name"),
        Syllabus::new("CSP, search, logic").expect("valid syllabus"),
    )
}

#[rstest]
fn serialises_as_flat_record() {
    let value = serde_json::to_value(sample_course()).expect("serialises");
    assert_eq!(
        value,
        json!({ "id": "40213", "name": "Intro to AI", "syllabus": "CSP, search, logic" })
    );
}

#[rstest]
fn deserialisation_enforces_invariants() {
    let bad = json!({ "id": "40213", "name": "AI", "syllabus": "x" });
    assert!(serde_json::from_value::<Course>(bad).is_err());
}

#[rstest]
fn with_fields_keeps_identifier() {
    let course = sample_course();
    let updated = course.clone().with_fields(
        CourseName::new("Advanced AI").expect("valid name"),
        Syllabus::new("MDPs").expect("valid syllabus"),
    );
    assert_eq!(updated.id(), course.id());
    assert_eq!(updated.name().as_str(), "Advanced AI");
    assert_eq!(updated.syllabus().as_str(), "MDPs");
}
