//! Assertions for the `{status, error}` response envelope.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::HeaderName;
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

async fn read_json<B>(resp: ServiceResponse<B>) -> Value
where
    B: MessageBody,
{
    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).expect("response body should be valid UTF-8");
    serde_json::from_str(body_str)
        .unwrap_or_else(|_| panic!("response body is not JSON. Raw body: {body_str}"))
}

/// Assert `200 {"status":"OK"}` with no `error` field.
pub async fn assert_ok_envelope<B>(resp: ServiceResponse<B>)
where
    B: MessageBody,
{
    assert_eq!(resp.status(), StatusCode::OK);
    let json = read_json(resp).await;
    assert_eq!(json["status"], "OK", "unexpected body: {json}");
    assert!(json.get("error").is_none(), "OK envelope must not carry errors: {json}");
}

/// Assert an error envelope with the given status line and messages, and
/// that it carries the request's trace id.
pub async fn assert_error_envelope<B>(
    resp: ServiceResponse<B>,
    expected_status: u16,
    expected_messages: &[&str],
) where
    B: MessageBody,
{
    assert_eq!(resp.status().as_u16(), expected_status);

    let headers = resp.headers().clone();
    let trace_id = headers
        .get(HeaderName::from_static("x-trace-id"))
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present on error responses");
    let request_id = headers
        .get(HeaderName::from_static("x-request-id"))
        .and_then(|v| v.to_str().ok());
    if let Some(request_id) = request_id {
        assert_eq!(trace_id, request_id, "x-trace-id should match x-request-id");
    }

    let json = read_json(resp).await;
    assert_eq!(json["status"], "Error", "unexpected body: {json}");
    let messages: Vec<&str> = json["error"]
        .as_array()
        .expect("error field should be an array")
        .iter()
        .map(|m| m.as_str().expect("error messages should be strings"))
        .collect();
    assert_eq!(messages, expected_messages);
}

/// Read a JSON body of any shape.
pub async fn json_body<B>(resp: ServiceResponse<B>) -> Value
where
    B: MessageBody,
{
    read_json(resp).await
}
