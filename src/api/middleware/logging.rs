use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::status::{StatusClass, StatusCode};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Log every request/response pair with structured fields and echo the
/// request id back in `x-request-id`
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let query = sanitize_query(request.uri().query().unwrap_or(""));

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        query = %query,
        "Incoming request"
    );

    let mut response = next.run(request).await;
    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;

    match StatusCode::from_u16(status).class() {
        StatusClass::ClientError => warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            duration_ms,
            "Request failed (client error)"
        ),
        StatusClass::ServerError => error!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            duration_ms,
            "Request failed (server error)"
        ),
        _ => info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            duration_ms,
            "Request completed"
        ),
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Mask values of sensitive query parameters
fn sanitize_query(query: &str) -> String {
    const SENSITIVE: [&str; 4] = ["api_key", "token", "password", "secret"];

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if SENSITIVE.contains(&key) => format!("{}=***", key),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}
