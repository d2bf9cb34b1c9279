use std::backtrace::Backtrace;

/// Source of the call-stack snapshot stored in every [`StructuredError`].
///
/// The snapshot is taken exactly once, when the error is constructed.
/// Plain closures `Fn() -> String` implement this too, which is the easiest
/// way to get a deterministic trace in tests.
///
/// [`StructuredError`]: super::StructuredError
pub trait TraceCapture: Send + Sync {
    fn capture(&self) -> String;
}

impl<F> TraceCapture for F
where
    F: Fn() -> String + Send + Sync,
{
    fn capture(&self) -> String {
        self()
    }
}

/// Captures the real call stack via [`Backtrace::force_capture`],
/// independent of `RUST_BACKTRACE`
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceCapture {
    /// Upper bound on the rendered trace size in bytes (None = unbounded)
    pub max_bytes: Option<usize>,
}

impl BacktraceCapture {
    pub fn bounded(max_bytes: usize) -> Self {
        Self {
            max_bytes: Some(max_bytes),
        }
    }
}

impl TraceCapture for BacktraceCapture {
    fn capture(&self) -> String {
        let trace = Backtrace::force_capture().to_string();
        match self.max_bytes {
            Some(limit) => truncate_at_char_boundary(trace, limit),
            None => trace,
        }
    }
}

/// Skips stack capture entirely; traces come out empty
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl TraceCapture for NoTrace {
    fn capture(&self) -> String {
        String::new()
    }
}

/// Returns the same text for every error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTrace(pub String);

impl FixedTrace {
    pub fn new(trace: impl Into<String>) -> Self {
        Self(trace.into())
    }
}

impl TraceCapture for FixedTrace {
    fn capture(&self) -> String {
        self.0.clone()
    }
}

fn truncate_at_char_boundary(mut text: String, limit: usize) -> String {
    if text.len() <= limit {
        return text;
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
    text
}
