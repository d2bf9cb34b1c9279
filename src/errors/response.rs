use axum::{
    http::StatusCode as HttpStatus,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::structured::{DetailBag, StructuredError};
use crate::metrics::STRUCTURED_ERRORS_TOTAL;
use crate::status::Status;

/// Fixed keys written before the detail bag is flattened in
pub const API_STATUS_KEY: &str = "status";
pub const API_ERROR_CODE_KEY: &str = "error_code";
pub const API_MESSAGE_KEY: &str = "message";

impl StructuredError {
    /// Flat response body.
    ///
    /// Starts from `status` / `error_code` / `message` and then copies every
    /// detail-bag entry to the top level. Bag entries are written last, so a
    /// bag key named `status` or `error_code` replaces the fixed field.
    /// Existing consumers rely on that precedence.
    pub fn api_view(&self) -> DetailBag {
        let mut view = DetailBag::new();
        view.insert(
            API_STATUS_KEY.to_string(),
            Value::String(Status::Error.as_str().to_string()),
        );
        view.insert(
            API_ERROR_CODE_KEY.to_string(),
            Value::from(self.status_code_value()),
        );
        view.insert(
            API_MESSAGE_KEY.to_string(),
            Value::String(self.message().to_string()),
        );

        for (key, value) in self.details() {
            view.insert(key.clone(), value.clone());
        }

        view
    }
}

/// Serializes as the API view
impl Serialize for StructuredError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.api_view().serialize(serializer)
    }
}

impl IntoResponse for StructuredError {
    fn into_response(self) -> Response {
        // Only 4xx/5xx pass through; anything else is not a valid failure response
        let code = self.status_code();
        let status = if code.is_client_error() || code.is_server_error() {
            HttpStatus::from_u16(code.value()).unwrap_or(HttpStatus::INTERNAL_SERVER_ERROR)
        } else {
            HttpStatus::INTERNAL_SERVER_ERROR
        };

        STRUCTURED_ERRORS_TOTAL
            .with_label_values(&[
                &self.status_code_value().to_string(),
                self.status_code().class().as_str(),
            ])
            .inc();
        self.emit();

        (status, Json(self.api_view())).into_response()
    }
}
