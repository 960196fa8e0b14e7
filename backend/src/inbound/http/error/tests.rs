//! Tests for HTTP error rendering.

use super::*;
use actix_web::body::to_bytes;
use actix_web::{App, test as actix_test};
use rstest::rstest;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn render(error: Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(&error);
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("JSON body");
    (status, trace_id, body)
}

#[rstest]
#[case(Error::invalid_request("Invalid course ID"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("Course not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[actix_web::test]
async fn plain_errors_render_their_message() {
    let (status, _, body) = render(Error::not_found("Course not found")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Course not found" }));
}

#[actix_web::test]
async fn validation_errors_render_the_field_map() {
    let error = Error::invalid_request("course validation failed")
        .with_details(json!({ "name": "Name is required" }));
    let (status, _, body) = render(error).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": { "name": "Name is required" } }));
}

#[actix_web::test]
async fn internal_errors_are_redacted() {
    let error = Error::internal("connection string leaked").with_details(json!({"secret": 1}));
    let (status, _, body) = render(error).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": INTERNAL_ERROR_MESSAGE }));
}

#[rstest]
fn domain_errors_survive_the_framework_error_wrapper() {
    let original = Error::invalid_request(BAD_REQUEST_MESSAGE);
    let wrapped: actix_web::Error = original.clone().into();

    assert_eq!(Error::from(wrapped), original);
}

#[rstest]
fn foreign_framework_errors_become_internal() {
    let wrapped = actix_web::error::ErrorBadRequest("raw parse failure");

    let error = Error::from(wrapped);
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), INTERNAL_ERROR_MESSAGE);
}

#[actix_web::test]
async fn trace_id_is_echoed_as_a_header() {
    let (_, trace_id, _) = render(Error::conflict("taken").with_trace_id(TRACE_ID)).await;
    assert_eq!(trace_id.as_deref(), Some(TRACE_ID));
}

#[actix_web::test]
async fn trace_id_header_is_absent_without_scope() {
    let (_, trace_id, _) = render(Error::conflict("taken")).await;
    assert!(trace_id.is_none());
}

#[actix_web::test]
async fn undecodable_bodies_get_the_generic_message() {
    async fn echo(body: web::Json<Value>) -> HttpResponse {
        HttpResponse::Ok().json(body.into_inner())
    }

    let app = actix_test::init_service(
        App::new()
            .app_data(json_config())
            .route("/", web::post().to(echo)),
    )
    .await;
    let req = actix_test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({ "error": BAD_REQUEST_MESSAGE }));
}

#[actix_web::test]
async fn unknown_paths_get_the_generic_message() {
    let app = actix_test::init_service(App::new().default_service(web::to(not_found))).await;
    let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/nope").to_request()).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({ "error": RESOURCE_NOT_FOUND_MESSAGE }));
}
