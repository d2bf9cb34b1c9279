use utoipa::OpenApi;

use crate::api::handlers::{
    PreviewRequest, PreviewResponse, StatusCodeEntry, StatusCodeListResponse, StatusCodeResponse,
    VariantEntry, VariantListResponse,
};
use crate::status::StatusClass;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Status Errors Service",
        version = "0.1.0",
        description = "Status code registry and structured error rendering. Failures are returned as flat JSON bodies with `status`, `error_code` and `message` plus any error details.",
    ),
    paths(
        crate::api::handlers::health,
        crate::api::handlers::list_status_codes,
        crate::api::handlers::get_status_code,
        crate::api::handlers::list_variants,
        crate::api::handlers::preview_error,
    ),
    components(
        schemas(
            StatusClass,
            StatusCodeEntry,
            StatusCodeListResponse,
            StatusCodeResponse,
            VariantEntry,
            VariantListResponse,
            PreviewRequest,
            PreviewResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "status-codes", description = "Status code registry lookups"),
        (name = "variants", description = "Named error variants"),
        (name = "errors", description = "Structured error rendering"),
    )
)]
pub struct ApiDoc;
