//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the course endpoints, the health probes and the
//! schemas of their bodies. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use utoipa::OpenApi;

use crate::domain::Course;
use crate::inbound::http::courses::{CourseRequestBody, DeleteCourseResponseBody};
use crate::inbound::http::schemas::{ErrorSchema, ValidationErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Course catalogue API",
        description = "Create, list, update and delete courses with unique names."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Course,
        CourseRequestBody,
        DeleteCourseResponseBody,
        ErrorSchema,
        ValidationErrorSchema
    )),
    tags(
        (name = "courses", description = "Course records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
