//! Log-side view of a [`StructuredError`] and its bridge to `tracing`

use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn, Level};

use super::structured::{DetailBag, StructuredError};
use crate::status::StatusCode;

pub const LOG_MESSAGE_KEY: &str = "message";
pub const LOG_STATUS_CODE_KEY: &str = "status_code";
pub const LOG_ERRORS_KEY: &str = "errors";
pub const LOG_STACK_TRACE_KEY: &str = "stack_trace";

/// Typed form of the log view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub message: String,
    pub status_code: u16,
    pub errors: DetailBag,
    pub stack_trace: String,
}

impl StructuredError {
    /// Four reserved keys; the detail bag stays nested under `errors`,
    /// so nothing in the bag can shadow them.
    pub fn log_view(&self) -> DetailBag {
        let mut view = DetailBag::new();
        view.insert(
            LOG_MESSAGE_KEY.to_string(),
            Value::String(self.message().to_string()),
        );
        view.insert(
            LOG_STATUS_CODE_KEY.to_string(),
            Value::from(self.status_code_value()),
        );
        view.insert(
            LOG_ERRORS_KEY.to_string(),
            Value::Object(self.details().clone()),
        );
        view.insert(
            LOG_STACK_TRACE_KEY.to_string(),
            Value::String(self.trace().to_string()),
        );
        view
    }

    pub fn log_record(&self) -> LogRecord {
        LogRecord {
            message: self.message().to_string(),
            status_code: self.status_code_value(),
            errors: self.details().clone(),
            stack_trace: self.trace().to_string(),
        }
    }

    /// Write the log view as a single tracing event
    pub fn emit(&self) {
        emit(self)
    }
}

/// Server errors log at ERROR, everything else at WARN
pub fn level_for(code: StatusCode) -> Level {
    if code.is_server_error() {
        Level::ERROR
    } else {
        Level::WARN
    }
}

pub fn emit(err: &StructuredError) {
    let record = err.log_record();
    let errors = serde_json::to_string(&record.errors).unwrap_or_default();

    if level_for(err.status_code()) == Level::ERROR {
        error!(
            status_code = record.status_code,
            message = %record.message,
            errors = %errors,
            stack_trace = %record.stack_trace,
            "Structured error"
        );
    } else {
        warn!(
            status_code = record.status_code,
            message = %record.message,
            errors = %errors,
            stack_trace = %record.stack_trace,
            "Structured error"
        );
    }
}
