use crate::llm::Provider;
use serde_json::Value;
use std::fmt;

/// Failure reported by the completion backend itself (non-success status or a
/// reply without usable content). Carries the raw body for diagnostics.
#[derive(Debug, Clone)]
pub struct LlmDiagnosticsError {
    pub provider: Provider,
    pub stage: &'static str,
    pub detail: String,
    pub raw_output: Option<String>,
    pub raw_response_json: Option<Value>,
}

impl fmt::Display for LlmDiagnosticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}

impl std::error::Error for LlmDiagnosticsError {}
