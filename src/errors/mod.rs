//! Structured errors: construction, API view and log view

pub mod log;
pub mod response;
pub mod structured;
pub mod trace;
pub mod variants;

pub use log::LogRecord;
pub use structured::{DetailBag, StructuredError};
pub use trace::{BacktraceCapture, FixedTrace, NoTrace, TraceCapture};
pub use variants::Variant;
