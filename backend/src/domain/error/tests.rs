//! Tests for domain error construction and trace capture.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> TraceId {
    TRACE_ID.parse().expect("fixture is a valid UUID")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_their_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn try_with_trace_id_rejects_blank_values() {
    let result = Error::invalid_request("bad").try_with_trace_id(" ");
    assert_eq!(result, Err(ErrorValidationError::EmptyTraceId));
}

#[rstest]
fn trace_id_is_absent_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn trace_id_is_captured_in_scope(trace_id: TraceId) {
    let error = TraceId::scope(trace_id, async { Error::not_found("missing") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn details_are_attached() {
    let error = Error::invalid_request("bad").with_details(json!({ "name": "Name is required" }));
    assert_eq!(
        error.details(),
        Some(&json!({ "name": "Name is required" }))
    );
}

#[rstest]
fn display_uses_the_message() {
    let err = Error::conflict("already there");
    assert_eq!(err.to_string(), "already there");
}

#[rstest]
fn codes_serialise_in_snake_case() {
    let value = serde_json::to_value(ErrorCode::ServiceUnavailable).expect("serialises");
    assert_eq!(value, json!("service_unavailable"));
}
