use serde_json::Value;

/// Sink for responses that match neither the success nor the domain-error
/// shape. Such responses are reported once and never retried.
pub trait ExceptionSink {
    fn report_malformed(&self, action: &str, payload: &Value);
}

#[derive(Debug, Default)]
pub struct StderrExceptionSink;

impl StderrExceptionSink {
    pub fn new() -> Self {
        Self
    }
}

impl ExceptionSink for StderrExceptionSink {
    fn report_malformed(&self, action: &str, payload: &Value) {
        eprintln!("unexpected response while {action}: {payload}");
    }
}
