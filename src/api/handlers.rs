use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use utoipa::ToSchema;

use crate::errors::log::LOG_STACK_TRACE_KEY;
use crate::errors::trace::TraceCapture;
use crate::errors::variants::{self, Variant};
use crate::errors::{DetailBag, StructuredError};
use crate::status::{StatusClass, StatusCode, StatusRegistry};

lazy_static::lazy_static! {
    static ref START_TIME: Instant = Instant::now();
}

/// Placeholder written over traces when they are not exposed
pub const REDACTED_TRACE: &str = "[redacted]";

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub registry: &'static StatusRegistry,
    pub tracer: Arc<dyn TraceCapture>,
    pub expose_trace: bool,
    pub instance_id: String,
}

impl AppStateInner {
    /// Build an error through the configured tracer
    fn error(&self, variant: Variant, value: Value) -> StructuredError {
        variant.build_with_tracer(details(value), self.tracer.as_ref())
    }
}

/// A registered status code
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusCodeEntry {
    /// Numeric code (e.g. 404)
    pub code: u16,
    /// Canonical description (e.g. "Not Found")
    pub description: String,
    /// Class derived from the hundreds digit
    pub class: StatusClass,
}

impl From<StatusCode> for StatusCodeEntry {
    fn from(code: StatusCode) -> Self {
        Self {
            code: code.value(),
            description: code.description().to_string(),
            class: code.class(),
        }
    }
}

/// A named error variant and its default status code
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VariantEntry {
    pub name: String,
    pub default_code: u16,
    /// Message used when an error of this variant has none
    pub description: String,
}

impl From<&Variant> for VariantEntry {
    fn from(variant: &Variant) -> Self {
        Self {
            name: variant.name.to_string(),
            default_code: variant.default_code.value(),
            description: variant.description().to_string(),
        }
    }
}

/// Status code list response
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusCodeListResponse {
    /// Always true
    pub success: bool,
    /// Registered codes in ascending order
    pub data: Vec<StatusCodeEntry>,
}

/// Single status code response
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusCodeResponse {
    /// Always true
    pub success: bool,
    pub data: StatusCodeEntry,
}

/// Variant catalog response
#[derive(Debug, Serialize, ToSchema)]
pub struct VariantListResponse {
    /// Always true
    pub success: bool,
    pub data: Vec<VariantEntry>,
}

/// Error preview request: exactly one of `variant` or `status_code`
#[derive(Debug, Deserialize, ToSchema)]
pub struct PreviewRequest {
    /// Variant name, e.g. "domain"
    pub variant: Option<String>,
    /// Raw status code, validated against the registry
    pub status_code: Option<i64>,
    /// Detail bag; a "message" entry becomes the error message
    #[serde(default)]
    #[schema(value_type = Object)]
    pub details: DetailBag,
}

/// Both serialized views of a previewed error
#[derive(Debug, Serialize, ToSchema)]
pub struct PreviewResponse {
    #[schema(value_type = Object)]
    pub api_view: Value,
    #[schema(value_type = Object)]
    pub log_view: Value,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = serde_json::Value)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "status-errors",
        "version": env!("CARGO_PKG_VERSION"),
        "instance_id": state.instance_id,
        "registered_codes": state.registry.len(),
        "uptime_seconds": START_TIME.elapsed().as_secs(),
    }))
}

/// List every registered status code
#[utoipa::path(
    get,
    path = "/status-codes",
    tag = "status-codes",
    responses(
        (status = 200, description = "All registered codes", body = StatusCodeListResponse)
    )
)]
pub async fn list_status_codes(State(state): State<AppState>) -> Json<StatusCodeListResponse> {
    Json(StatusCodeListResponse {
        success: true,
        data: state.registry.codes().into_iter().map(StatusCodeEntry::from).collect(),
    })
}

/// Look up a single status code
#[utoipa::path(
    get,
    path = "/status-codes/{code}",
    tag = "status-codes",
    params(
        ("code" = String, Path, description = "Integer status code, e.g. 404")
    ),
    responses(
        (status = 200, description = "Code is registered", body = StatusCodeResponse),
        (status = 400, description = "Code is not an integer", body = serde_json::Value),
        (status = 404, description = "Code is not registered", body = serde_json::Value)
    )
)]
pub async fn get_status_code(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<StatusCodeResponse>, StructuredError> {
    let value: i64 = raw.parse().map_err(|_| {
        state.error(
            variants::INVALID_ARGUMENT,
            json!({
                "message": format!("Status code must be an integer: {}", raw),
                "requested_code": raw,
            }),
        )
    })?;

    let code = state.registry.parse(value).ok_or_else(|| {
        StructuredError::from_parts(
            details(json!({
                "message": format!("Unknown status code: {}", value),
                "requested_code": value,
            })),
            StatusCode::NOT_FOUND,
            state.registry,
            state.tracer.as_ref(),
        )
    })?;

    Ok(Json(StatusCodeResponse {
        success: true,
        data: StatusCodeEntry::from(code),
    }))
}

/// List the error variant catalog
#[utoipa::path(
    get,
    path = "/variants",
    tag = "variants",
    responses(
        (status = 200, description = "Variant catalog", body = VariantListResponse)
    )
)]
pub async fn list_variants() -> Json<VariantListResponse> {
    Json(VariantListResponse {
        success: true,
        data: variants::CATALOG.iter().map(VariantEntry::from).collect(),
    })
}

/// Build an error without raising it and return both views
#[utoipa::path(
    post,
    path = "/errors/preview",
    tag = "errors",
    request_body = PreviewRequest,
    responses(
        (status = 200, description = "Rendered views", body = PreviewResponse),
        (status = 400, description = "Malformed request", body = serde_json::Value)
    )
)]
pub async fn preview_error(
    State(state): State<AppState>,
    body: Result<Json<PreviewRequest>, JsonRejection>,
) -> Result<Json<PreviewResponse>, StructuredError> {
    let Json(request) = body.map_err(|rejection| {
        state.error(
            variants::REQUEST_PARSE_BODY,
            json!({
                "message": "Request body could not be parsed",
                "details": { "error": rejection.body_text() },
            }),
        )
    })?;

    let code = match (&request.variant, request.status_code) {
        (Some(name), None) => variants::find(name)
            .map(|variant| variant.default_code)
            .ok_or_else(|| {
                state.error(
                    variants::INVALID_ARGUMENT,
                    json!({
                        "message": format!("Unknown variant: {}", name),
                        "variant": name,
                    }),
                )
            })?,
        (None, Some(value)) => state.registry.parse(value).ok_or_else(|| {
            state.error(
                variants::INVALID_ARGUMENT,
                json!({
                    "message": format!("Unknown status code: {}", value),
                    "requested_code": value,
                }),
            )
        })?,
        _ => {
            return Err(state.error(
                variants::INVALID_ARGUMENT,
                json!({ "message": "Exactly one of variant or status_code is required" }),
            ))
        }
    };

    let err = StructuredError::from_parts(
        request.details,
        code,
        state.registry,
        state.tracer.as_ref(),
    );
    debug!(status_code = code.value(), "Previewing structured error");

    let mut log_view = err.log_view();
    if !state.expose_trace {
        log_view.insert(
            LOG_STACK_TRACE_KEY.to_string(),
            Value::String(REDACTED_TRACE.to_string()),
        );
    }

    Ok(Json(PreviewResponse {
        api_view: Value::Object(err.api_view()),
        log_view: Value::Object(log_view),
    }))
}

fn details(value: Value) -> DetailBag {
    match value {
        Value::Object(map) => map,
        _ => DetailBag::new(),
    }
}
