use lazy_static::lazy_static;
use std::collections::HashMap;

use super::code::StatusCode;

/// Description returned for any code outside the registry
pub const UNKNOWN_DESCRIPTION: &str = "Unknown Status Code";

/// Canonical descriptions, grouped by class
const STANDARD_DESCRIPTIONS: &[(StatusCode, &str)] = &[
    // 1xx
    (StatusCode::CONTINUE, "Continue"),
    (StatusCode::SWITCHING_PROTOCOLS, "Switching Protocols"),
    (StatusCode::PROCESSING, "Processing"),
    (StatusCode::EARLY_HINTS, "Early Hints"),
    // 2xx
    (StatusCode::OK, "OK"),
    (StatusCode::CREATED, "Created"),
    (StatusCode::ACCEPTED, "Accepted"),
    (StatusCode::NON_AUTHORITATIVE_INFORMATION, "Non-Authoritative Information"),
    (StatusCode::NO_CONTENT, "No Content"),
    (StatusCode::RESET_CONTENT, "Reset Content"),
    (StatusCode::PARTIAL_CONTENT, "Partial Content"),
    (StatusCode::MULTI_STATUS, "Multi-Status"),
    (StatusCode::ALREADY_REPORTED, "Already Reported"),
    (StatusCode::IM_USED, "IM Used"),
    // 3xx
    (StatusCode::MULTIPLE_CHOICES, "Multiple Choices"),
    (StatusCode::MOVED_PERMANENTLY, "Moved Permanently"),
    (StatusCode::FOUND, "Found"),
    (StatusCode::SEE_OTHER, "See Other"),
    (StatusCode::NOT_MODIFIED, "Not Modified"),
    (StatusCode::USE_PROXY, "Use Proxy"),
    (StatusCode::TEMPORARY_REDIRECT, "Temporary Redirect"),
    (StatusCode::PERMANENT_REDIRECT, "Permanent Redirect"),
    // 4xx
    (StatusCode::BAD_REQUEST, "Bad Request"),
    (StatusCode::UNAUTHORIZED, "Unauthorized"),
    (StatusCode::PAYMENT_REQUIRED, "Payment Required"),
    (StatusCode::FORBIDDEN, "Forbidden"),
    (StatusCode::NOT_FOUND, "Not Found"),
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed"),
    (StatusCode::NOT_ACCEPTABLE, "Not Acceptable"),
    (StatusCode::PROXY_AUTHENTICATION_REQUIRED, "Proxy Authentication Required"),
    (StatusCode::REQUEST_TIMEOUT, "Request Timeout"),
    (StatusCode::CONFLICT, "Conflict"),
    (StatusCode::GONE, "Gone"),
    (StatusCode::LENGTH_REQUIRED, "Length Required"),
    (StatusCode::PRECONDITION_FAILED, "Precondition Failed"),
    (StatusCode::CONTENT_TOO_LARGE, "Content Too Large"),
    (StatusCode::URI_TOO_LONG, "URI Too Long"),
    (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported Media Type"),
    (StatusCode::RANGE_NOT_SATISFIABLE, "Range Not Satisfiable"),
    (StatusCode::EXPECTATION_FAILED, "Expectation Failed"),
    (StatusCode::IM_A_TEAPOT, "I'm a teapot"),
    (StatusCode::MISDIRECTED_REQUEST, "Misdirected Request"),
    (StatusCode::UNPROCESSABLE_CONTENT, "Unprocessable Content"),
    (StatusCode::LOCKED, "Locked"),
    (StatusCode::FAILED_DEPENDENCY, "Failed Dependency"),
    (StatusCode::TOO_EARLY, "Too Early"),
    (StatusCode::UPGRADE_REQUIRED, "Upgrade Required"),
    (StatusCode::PRECONDITION_REQUIRED, "Precondition Required"),
    (StatusCode::TOO_MANY_REQUESTS, "Too Many Requests"),
    (StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE, "Request Header Fields Too Large"),
    (StatusCode::UNAVAILABLE_FOR_LEGAL_REASONS, "Unavailable For Legal Reasons"),
    // 5xx
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
    (StatusCode::NOT_IMPLEMENTED, "Not Implemented"),
    (StatusCode::BAD_GATEWAY, "Bad Gateway"),
    (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable"),
    (StatusCode::GATEWAY_TIMEOUT, "Gateway Timeout"),
    (StatusCode::HTTP_VERSION_NOT_SUPPORTED, "HTTP Version Not Supported"),
    (StatusCode::VARIANT_ALSO_NEGOTIATES, "Variant Also Negotiates"),
    (StatusCode::INSUFFICIENT_STORAGE, "Insufficient Storage"),
    (StatusCode::LOOP_DETECTED, "Loop Detected"),
    (StatusCode::NOT_EXTENDED, "Not Extended"),
    (StatusCode::NETWORK_AUTHENTICATION_REQUIRED, "Network Authentication Required"),
];

lazy_static! {
    static ref STANDARD_REGISTRY: StatusRegistry = StatusRegistry::standard();
}

/// Immutable table of known status codes and their canonical descriptions.
///
/// The process-wide instance is built once by [`init`] (or lazily on first
/// use) and is never mutated afterwards, so it can be read from any thread
/// without locking. Code that wants the table injected can take a
/// `&StatusRegistry` instead of going through [`StatusRegistry::global`].
#[derive(Debug, Clone)]
pub struct StatusRegistry {
    descriptions: HashMap<StatusCode, &'static str>,
}

impl StatusRegistry {
    /// Build the standard 1xx-5xx table
    pub fn standard() -> Self {
        Self {
            descriptions: STANDARD_DESCRIPTIONS.iter().copied().collect(),
        }
    }

    /// Process-wide standard registry
    pub fn global() -> &'static StatusRegistry {
        &STANDARD_REGISTRY
    }

    pub fn lookup(&self, code: StatusCode) -> Option<&'static str> {
        self.descriptions.get(&code).copied()
    }

    /// Canonical description, falling back to [`UNKNOWN_DESCRIPTION`]
    pub fn describe(&self, code: StatusCode) -> &'static str {
        self.lookup(code).unwrap_or(UNKNOWN_DESCRIPTION)
    }

    pub fn contains(&self, code: StatusCode) -> bool {
        self.descriptions.contains_key(&code)
    }

    /// Validate an arbitrary integer; negative or oversized values are misses
    pub fn parse(&self, value: i64) -> Option<StatusCode> {
        let code = StatusCode::from_u16(u16::try_from(value).ok()?);
        self.contains(code).then_some(code)
    }

    /// Fresh copy of the whole table. Mutating it never touches the registry.
    pub fn entries(&self) -> HashMap<StatusCode, &'static str> {
        self.descriptions.clone()
    }

    /// Registered codes in ascending order
    pub fn codes(&self) -> Vec<StatusCode> {
        let mut codes: Vec<StatusCode> = self.descriptions.keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

impl Default for StatusRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Initialize the process-wide registry (called on startup)
pub fn init() -> &'static StatusRegistry {
    // Force lazy_static initialization
    lazy_static::initialize(&STANDARD_REGISTRY);
    tracing::debug!(
        registered_codes = STANDARD_REGISTRY.len(),
        "Status code registry initialized"
    );
    &STANDARD_REGISTRY
}
