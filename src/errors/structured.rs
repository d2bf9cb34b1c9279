use serde_json::{Map, Value};
use thiserror::Error;

use super::trace::{BacktraceCapture, TraceCapture};
use crate::status::{StatusCode, StatusRegistry};

/// Open-ended context attached to an error. Values may nest arbitrarily.
pub type DetailBag = Map<String, Value>;

/// Detail-bag key that seeds the error message
pub const MESSAGE_KEY: &str = "message";
/// Detail-bag key holding nested, more granular details
pub const DETAILS_KEY: &str = "details";
/// Key inside the nested details that carries a specific error text
pub const DETAIL_ERROR_KEY: &str = "error";

/// A single failure occurrence.
///
/// Built once through [`StructuredError::new`] (or one of the variant
/// constructors in [`super::variants`]) and read-only afterwards. The
/// message is never empty and the detail bag never holds a `"message"` key.
///
/// Two read-side shapes are available: [`api_view`](Self::api_view) for
/// response bodies and [`log_view`](Self::log_view) for log sinks.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct StructuredError {
    message: String,
    status_code: StatusCode,
    details: DetailBag,
    trace: String,
}

impl StructuredError {
    /// Build an error, capturing the current call stack.
    ///
    /// A non-empty string under `"message"` becomes the error message;
    /// otherwise the code's canonical description is used. The `"message"`
    /// key is always removed from the bag. `code` is taken as-is.
    pub fn new(details: DetailBag, code: StatusCode) -> Self {
        Self::with_tracer(details, code, &BacktraceCapture::default())
    }

    /// Same as [`new`](Self::new) with a caller-supplied trace source
    pub fn with_tracer(details: DetailBag, code: StatusCode, tracer: &dyn TraceCapture) -> Self {
        Self::from_parts(details, code, StatusRegistry::global(), tracer)
    }

    /// Fully injected constructor: descriptions come from `registry`
    pub fn from_parts(
        mut details: DetailBag,
        code: StatusCode,
        registry: &StatusRegistry,
        tracer: &dyn TraceCapture,
    ) -> Self {
        let message = match details.remove(MESSAGE_KEY) {
            Some(Value::String(message)) if !message.is_empty() => message,
            _ => registry.describe(code).to_string(),
        };

        Self {
            message,
            status_code: code,
            details,
            trace: tracer.capture(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn status_code_value(&self) -> u16 {
        self.status_code.value()
    }

    /// The owned detail bag, borrowed; no copy is made
    pub fn details(&self) -> &DetailBag {
        &self.details
    }

    /// Copy of the bag's `"details"` entry when it is an object, else empty
    pub fn nested_details(&self) -> DetailBag {
        match self.details.get(DETAILS_KEY) {
            Some(Value::Object(nested)) => nested.clone(),
            _ => DetailBag::new(),
        }
    }

    /// `details.error` when it is a string, else `""`
    pub fn nested_detail_message(&self) -> String {
        self.details
            .get(DETAILS_KEY)
            .and_then(|nested| nested.get(DETAIL_ERROR_KEY))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// Call stack captured at construction
    pub fn trace(&self) -> &str {
        &self.trace
    }
}
