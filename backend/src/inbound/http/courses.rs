//! Course HTTP handlers.
//!
//! ```text
//! GET    /api/courses          list
//! POST   /api/courses          create
//! GET    /api/courses/{id}     fetch
//! PUT    /api/courses/{id}     replace name and syllabus
//! DELETE /api/courses/{id}     remove
//! ```
//!
//! `/api/courses/` is accepted as well as `/api/courses`. Identifiers are
//! checked for the five-digit shape before any port is called.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Course, CourseDraft, CourseId, Error, INVALID_ID_MESSAGE};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::method_not_allowed;
use crate::inbound::http::schemas::{ErrorSchema, ValidationErrorSchema};
use crate::inbound::http::state::HttpState;

/// Collection path.
pub const COURSES_PATH: &str = "/api/courses";

/// Request payload for creating or replacing a course.
///
/// Absent or `null` fields are reported by validation; any `id` the client
/// sends is ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CourseRequestBody {
    #[schema(example = "Intro to AI")]
    pub name: Option<String>,
    #[schema(example = "Search, logic, learning")]
    pub syllabus: Option<String>,
}

impl From<CourseRequestBody> for CourseDraft {
    fn from(value: CourseRequestBody) -> Self {
        Self {
            name: value.name,
            syllabus: value.syllabus,
        }
    }
}

/// Response payload for a deletion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteCourseResponseBody {
    /// `"<name> has been deleted"`.
    #[schema(example = "Intro to AI has been deleted")]
    pub message: String,
    pub deleted: Course,
}

impl From<Course> for DeleteCourseResponseBody {
    fn from(deleted: Course) -> Self {
        Self {
            message: format!("{} has been deleted", deleted.name()),
            deleted,
        }
    }
}

fn parse_course_id(raw: &str) -> Result<CourseId, Error> {
    CourseId::new(raw).map_err(|_| Error::invalid_request(INVALID_ID_MESSAGE))
}

/// List every course in insertion order.
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "All courses", body = [Course]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
pub async fn list_courses(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Course>>> {
    let courses = state.courses.list().await?;
    Ok(web::Json(courses))
}

/// Create a course with a system-assigned identifier.
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CourseRequestBody,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Validation failed", body = ValidationErrorSchema),
        (status = 409, description = "Name already used", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
pub async fn create_course(
    state: web::Data<HttpState>,
    payload: web::Json<CourseRequestBody>,
) -> ApiResult<HttpResponse> {
    let course = state
        .course_commands
        .create(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(course))
}

/// Fetch one course.
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = String, Path, description = "Five-digit course identifier", example = "40213")),
    responses(
        (status = 200, description = "The course", body = Course),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "No such course", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Course>> {
    let id = parse_course_id(&path)?;
    let course = state.courses.get(&id).await?;
    Ok(web::Json(course))
}

/// Replace the name and syllabus of a course.
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = String, Path, description = "Five-digit course identifier", example = "40213")),
    request_body = CourseRequestBody,
    responses(
        (status = 200, description = "Updated course", body = Course),
        (status = 400, description = "Bad id or invalid fields", body = ValidationErrorSchema),
        (status = 404, description = "No such course", body = ErrorSchema),
        (status = 409, description = "Another course uses the name", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
pub async fn update_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: Result<web::Json<CourseRequestBody>, actix_web::Error>,
) -> ApiResult<web::Json<Course>> {
    let id = parse_course_id(&path)?;
    let payload = payload.map_err(Error::from)?;
    let course = state
        .course_commands
        .update(&id, payload.into_inner().into())
        .await?;
    Ok(web::Json(course))
}

/// Delete a course and echo it back.
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = String, Path, description = "Five-digit course identifier", example = "40213")),
    responses(
        (status = 200, description = "Course deleted", body = DeleteCourseResponseBody),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "No such course", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
pub async fn delete_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteCourseResponseBody>> {
    let id = parse_course_id(&path)?;
    let deleted = state.course_commands.delete(&id).await?;
    Ok(web::Json(deleted.into()))
}

/// Register the course routes.
///
/// Unsupported methods on these paths get a JSON 405.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource([COURSES_PATH, "/api/courses/"])
            .route(web::get().to(list_courses))
            .route(web::post().to(create_course))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/api/courses/{id}")
            .route(web::get().to(get_course))
            .route(web::put().to(update_course))
            .route(web::delete().to(delete_course))
            .default_service(web::to(method_not_allowed)),
    );
}

#[cfg(test)]
#[path = "courses_tests.rs"]
mod tests;
