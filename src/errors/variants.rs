use serde::Serialize;

use super::structured::{DetailBag, StructuredError};
use super::trace::TraceCapture;
use crate::status::StatusCode;

/// A named failure category: nothing more than a default status code bound
/// to the generic constructor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Variant {
    pub name: &'static str,
    pub default_code: StatusCode,
}

impl Variant {
    pub const fn new(name: &'static str, default_code: StatusCode) -> Self {
        Self { name, default_code }
    }

    pub fn build(&self, details: DetailBag) -> StructuredError {
        StructuredError::new(details, self.default_code)
    }

    pub fn build_with_tracer(&self, details: DetailBag, tracer: &dyn TraceCapture) -> StructuredError {
        StructuredError::with_tracer(details, self.default_code, tracer)
    }

    /// Message an error of this variant gets when none is supplied
    pub fn description(&self) -> &'static str {
        self.default_code.description()
    }
}

pub const BAD_FUNCTION_CALL: Variant = Variant::new("bad_function_call", StatusCode::BAD_REQUEST);
pub const BAD_METHOD_CALL: Variant = Variant::new("bad_method_call", StatusCode::BAD_REQUEST);
pub const DOMAIN: Variant = Variant::new("domain", StatusCode::BAD_REQUEST);
pub const ERROR: Variant = Variant::new("error", StatusCode::INTERNAL_SERVER_ERROR);
pub const INVALID_ARGUMENT: Variant = Variant::new("invalid_argument", StatusCode::BAD_REQUEST);
pub const LENGTH: Variant = Variant::new("length", StatusCode::BAD_REQUEST);
pub const LOGIC: Variant = Variant::new("logic", StatusCode::BAD_REQUEST);
pub const OUT_OF_BOUNDS: Variant = Variant::new("out_of_bounds", StatusCode::UNPROCESSABLE_CONTENT);
pub const OUT_OF_RANGE: Variant = Variant::new("out_of_range", StatusCode::BAD_REQUEST);
pub const OVERFLOW: Variant = Variant::new("overflow", StatusCode::UNPROCESSABLE_CONTENT);
pub const RANGE: Variant = Variant::new("range", StatusCode::UNPROCESSABLE_CONTENT);
pub const REQUEST_PARSE_BODY: Variant = Variant::new("request_parse_body", StatusCode::BAD_REQUEST);
pub const RUNTIME: Variant = Variant::new("runtime", StatusCode::INTERNAL_SERVER_ERROR);
pub const UNDERFLOW: Variant = Variant::new("underflow", StatusCode::INTERNAL_SERVER_ERROR);
pub const UNEXPECTED_VALUE: Variant = Variant::new("unexpected_value", StatusCode::UNPROCESSABLE_CONTENT);

/// Every known variant, ordered by name
pub const CATALOG: &[Variant] = &[
    BAD_FUNCTION_CALL,
    BAD_METHOD_CALL,
    DOMAIN,
    ERROR,
    INVALID_ARGUMENT,
    LENGTH,
    LOGIC,
    OUT_OF_BOUNDS,
    OUT_OF_RANGE,
    OVERFLOW,
    RANGE,
    REQUEST_PARSE_BODY,
    RUNTIME,
    UNDERFLOW,
    UNEXPECTED_VALUE,
];

pub fn find(name: &str) -> Option<&'static Variant> {
    CATALOG.iter().find(|variant| variant.name == name)
}
