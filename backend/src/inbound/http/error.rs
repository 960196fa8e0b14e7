//! HTTP rendering of domain errors and framework-level failures.
//!
//! Domain errors become JSON bodies with one of two shapes:
//!
//! ```text
//! {"errors": {"name": "Name is required", ...}}   validation failures
//! {"error": "Course not found"}                    everything else
//! ```
//!
//! Internal errors are logged with their original message and returned to
//! clients as `Internal server error`. Requests that never reach a handler
//! (unknown paths, unreadable JSON) get generic messages.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use serde_json::{Value, json};
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Body message for 500 responses.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
/// Body message for paths with no route.
pub const RESOURCE_NOT_FOUND_MESSAGE: &str = "Resource not found";
/// Body message for requests the framework could not decode.
pub const BAD_REQUEST_MESSAGE: &str = "Bad request, check your input";
/// Body message for a method a known path does not support.
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn body_for(error: &Error) -> Value {
    match (error.code(), error.details()) {
        (ErrorCode::InvalidRequest, Some(details)) if details.is_object() => {
            json!({ "errors": details })
        }
        (ErrorCode::InternalError, _) => json!({ "error": INTERNAL_ERROR_MESSAGE }),
        _ => json!({ "error": error.message() }),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(
            self.code(),
            ErrorCode::InternalError | ErrorCode::ServiceUnavailable
        ) {
            error!(
                code = ?self.code(),
                trace_id = self.trace_id().unwrap_or_default(),
                message = self.message(),
                "request failed"
            );
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(body_for(self))
    }
}

/// Recover a domain error raised inside an extractor; anything else becomes
/// a redacted internal error.
impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        if let Some(domain) = err.as_error::<Self>() {
            return domain.clone();
        }
        error!(error = %err, "actix error promoted to domain error");
        Self::internal(INTERNAL_ERROR_MESSAGE)
    }
}

/// JSON extractor configuration rejecting undecodable bodies with a generic
/// 400.
///
/// Covers malformed JSON, wrong field types, oversized payloads and a
/// missing or wrong `Content-Type`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        debug!(error = %err, path = req.path(), "rejected request body");
        Error::invalid_request(BAD_REQUEST_MESSAGE).into()
    })
}

/// Fallback for requests matching no route.
pub async fn not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    debug!(method = %req.method(), path = req.path(), "no route matched");
    Err(Error::not_found(RESOURCE_NOT_FOUND_MESSAGE))
}

/// Fallback for unsupported methods on a known resource.
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(json!({ "error": METHOD_NOT_ALLOWED_MESSAGE }))
}

#[cfg(test)]
mod tests;
