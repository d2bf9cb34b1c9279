//! Structured, classifiable error values for service code.
//!
//! A [`StructuredError`] carries a message, a [`StatusCode`] from a fixed
//! HTTP-like registry, an open detail bag and a stack trace captured at
//! construction. It renders either as a flat API body
//! ([`StructuredError::api_view`]) or as a collision-free log record
//! ([`StructuredError::log_view`]).

pub mod api;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod status;

pub use errors::{DetailBag, StructuredError, TraceCapture, Variant};
pub use status::{Status, StatusClass, StatusCode, StatusRegistry};
