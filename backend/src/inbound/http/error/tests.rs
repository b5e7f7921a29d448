//! Tests for HTTP error mapping.

use super::*;
use crate::domain::{Error, TraceId};
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn internal_error_case(expected_trace_id: String) -> Error {
    Error::internal("person store query failed: constraint")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"secret": "x"}))
}

#[fixture]
fn enrichment_error_case(expected_trace_id: String) -> Error {
    Error::enrichment_failed("Failed to enrich data from API: age data not found")
        .with_trace_id(expected_trace_id)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::unprocessable("name is too short"), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(Error::enrichment_failed("down"), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(Error::service_unavailable("busy"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id not valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");

    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(
    internal_error_case: Error,
    expected_trace_id: String,
) {
    let redacted = assert_error_response(
        internal_error_case,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(redacted.code(), ErrorCode::InternalError);
    assert_eq!(redacted.message(), "Internal server error");
    assert!(redacted.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn enrichment_failures_keep_their_cause(
    enrichment_error_case: Error,
    expected_trace_id: String,
) {
    let payload = assert_error_response(
        enrichment_error_case,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(payload.code(), ErrorCode::EnrichmentFailed);
    assert_eq!(
        payload.message(),
        "Failed to enrich data from API: age data not found"
    );
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::unprocessable("Filling errors: age contains invalid data");

    let payload = assert_error_response(error, StatusCode::UNPROCESSABLE_ENTITY, None).await;
    assert_eq!(payload.code(), ErrorCode::UnprocessableEntity);
    assert_eq!(payload.message(), "Filling errors: age contains invalid data");
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
#[actix_web::test]
async fn extractor_failures_become_invalid_api_query() {
    let request = TestRequest::default().uri("/api/create").to_http_request();
    let trace_id = TraceId::generate();

    let err = TraceId::scope(trace_id, async {
        invalid_api_query("expected value at line 1 column 1", &request)
    })
    .await;
    let response = err.error_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload: Error = serde_json::from_slice(&bytes).expect("error payload");
    assert_eq!(payload.message(), INVALID_API_QUERY);
    assert_eq!(payload.trace_id(), Some(trace_id.to_string().as_str()));
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    use actix_web::error;

    let actix_err = error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.trace_id(), None);
    assert_eq!(err.details(), None);
}
