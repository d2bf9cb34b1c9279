use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::Service;

use status_errors::api::handlers::{AppStateInner, REDACTED_TRACE};
use status_errors::api::routes::create_router;
use status_errors::errors::FixedTrace;
use status_errors::status;

const TEST_TRACE: &str = "test-trace";

// Helper to create test app
fn create_test_app(expose_trace: bool) -> axum::Router {
    let state = Arc::new(AppStateInner {
        registry: status::init(),
        tracer: Arc::new(FixedTrace::new(TEST_TRACE)),
        expose_trace,
        instance_id: "test-instance".to_string(),
    });

    create_router(state)
}

async fn read_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(json!({}))
}

// Helper to send request and parse JSON response
async fn send_json_request(app: &mut axum::Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status = response.status();
    (status, read_body(response).await)
}

// Helper to send a raw body with a JSON content type
async fn send_body_request(
    app: &mut axum::Router,
    method: &str,
    uri: &str,
    body: impl Into<Body>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status = response.status();
    (status, read_body(response).await)
}

async fn preview(app: &mut axum::Router, body: Value) -> (StatusCode, Value) {
    send_body_request(app, "POST", "/errors/preview", serde_json::to_vec(&body).unwrap()).await
}

// ========== HEALTH ==========

#[tokio::test]
async fn test_health() {
    let mut app = create_test_app(false);
    let (status, body) = send_json_request(&mut app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["instance_id"], "test-instance");
    assert_eq!(body["registered_codes"], 62);
}

// ========== STATUS CODES ==========

#[tokio::test]
async fn test_list_status_codes() {
    let mut app = create_test_app(false);
    let (status, body) = send_json_request(&mut app, "GET", "/status-codes").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 62);
    assert_eq!(
        data[0],
        json!({ "code": 100, "description": "Continue", "class": "informational" })
    );
}

#[tokio::test]
async fn test_get_registered_status_code() {
    let mut app = create_test_app(false);
    let (status, body) = send_json_request(&mut app, "GET", "/status-codes/418").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({ "code": 418, "description": "I'm a teapot", "class": "client_error" })
    );
}

#[tokio::test]
async fn test_get_unknown_status_code_returns_structured_error() {
    let mut app = create_test_app(false);
    let (status, body) = send_json_request(&mut app, "GET", "/status-codes/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "status": "error",
            "error_code": 404,
            "message": "Unknown status code: 999",
            "requested_code": 999
        })
    );
}

#[tokio::test]
async fn test_get_non_integer_status_code() {
    let mut app = create_test_app(false);
    let (status, body) = send_json_request(&mut app, "GET", "/status-codes/teapot").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["error_code"], 400);
    assert_eq!(body["requested_code"], "teapot");
}

// ========== VARIANTS ==========

#[tokio::test]
async fn test_list_variants() {
    let mut app = create_test_app(false);
    let (status, body) = send_json_request(&mut app, "GET", "/variants").await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 15);
    assert!(data.contains(&json!({
        "name": "overflow",
        "default_code": 422,
        "description": "Unprocessable Content"
    })));
}

// ========== ERROR PREVIEW ==========

#[tokio::test]
async fn test_preview_by_variant() {
    let mut app = create_test_app(false);
    let (status, body) = preview(
        &mut app,
        json!({
            "variant": "domain",
            "details": {
                "message": "Validation failed.",
                "details": { "error": "email_format_error" }
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["api_view"],
        json!({
            "status": "error",
            "error_code": 400,
            "message": "Validation failed.",
            "details": { "error": "email_format_error" }
        })
    );
    assert_eq!(
        body["log_view"],
        json!({
            "message": "Validation failed.",
            "status_code": 400,
            "errors": { "details": { "error": "email_format_error" } },
            "stack_trace": REDACTED_TRACE
        })
    );
}

#[tokio::test]
async fn test_preview_by_status_code_exposes_trace_when_enabled() {
    let mut app = create_test_app(true);
    let (status, body) = preview(&mut app, json!({ "status_code": 503 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["api_view"]["message"], "Service Unavailable");
    assert_eq!(body["log_view"]["stack_trace"], TEST_TRACE);
    assert_eq!(body["log_view"]["errors"], json!({}));
}

#[tokio::test]
async fn test_preview_detail_keys_override_fixed_fields() {
    let mut app = create_test_app(false);
    let (status, body) = preview(
        &mut app,
        json!({
            "status_code": 400,
            "details": {
                "message": "keep-already-consumed",
                "message_extra": "Y",
                "status": "pending"
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["api_view"]["status"], "pending");
    assert_eq!(body["api_view"]["message"], "keep-already-consumed");
    assert_eq!(body["log_view"]["errors"], json!({ "message_extra": "Y", "status": "pending" }));
}

#[tokio::test]
async fn test_preview_unknown_variant() {
    let mut app = create_test_app(false);
    let (status, body) = preview(&mut app, json!({ "variant": "catastrophe" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Unknown variant: catastrophe");
    assert_eq!(body["variant"], "catastrophe");
}

#[tokio::test]
async fn test_preview_requires_exactly_one_selector() {
    let mut app = create_test_app(false);

    let (status, _) = preview(&mut app, json!({ "details": {} })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = preview(&mut app, json!({ "variant": "domain", "status_code": 400 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_preview_unregistered_status_code() {
    let mut app = create_test_app(false);
    let (status, body) = preview(&mut app, json!({ "status_code": 299 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["requested_code"], 299);
}

#[tokio::test]
async fn test_preview_malformed_body() {
    let mut app = create_test_app(false);
    let (status, body) = send_body_request(&mut app, "POST", "/errors/preview", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Request body could not be parsed");
    assert!(body["details"]["error"].is_string());
}

// ========== METRICS ==========

#[tokio::test]
async fn test_metrics_endpoint() {
    let mut app = create_test_app(false);
    let _ = send_json_request(&mut app, "GET", "/status-codes/999").await;

    let request = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let response = app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("structured_errors_total"));
    assert!(text.contains("http_requests_total"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let mut app = create_test_app(false);
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let response = app.call(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-123");
}
