//! OpenAPI schemas for error bodies.
//!
//! The bodies themselves are assembled in [`super::error`]; these types only
//! describe them.

use std::collections::BTreeMap;

use utoipa::ToSchema;

/// Error body carrying a single message.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Human-readable message.
    #[schema(example = "Course not found")]
    error: String,
}

/// Error body listing every failing field.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ValidationErrorSchema {
    /// Field name to message.
    #[schema(example = json!({
        "name": "Name must be at least 3 characters",
        "syllabus": "Syllabus is required"
    }))]
    errors: BTreeMap<String, String>,
}
