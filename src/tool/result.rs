// ABOUTME: Defines ToolResult - what the host hands back to the model after
// ABOUTME: an invocation: the translated text, or the error text plus its class.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::TranslateError;
use crate::tools::TranslationResult;

/// Metadata key holding the failure class (`invalid_parameter`, ...).
pub const ERROR_KIND: &str = "error_kind";
/// Metadata key holding the provider's own error code.
pub const ERROR_CODE: &str = "error_code";

/// Outcome of a tool invocation as seen by the host.
///
/// Failures are never empty: `content` carries the error text so the model
/// can decide whether to retry with different parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ToolResult {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
            metadata: HashMap::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: message.into(),
            is_error: true,
            metadata: HashMap::new(),
        }
    }

    /// Attach a metadata value; values that fail to serialize are skipped.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.metadata.insert(key.into(), v);
        }
        self
    }

    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(|v| v.as_str())
    }

    pub fn error_kind(&self) -> Option<&str> {
        self.metadata_str(ERROR_KIND)
    }

    pub fn error_code(&self) -> Option<&str> {
        self.metadata_str(ERROR_CODE)
    }
}

impl From<TranslationResult> for ToolResult {
    fn from(result: TranslationResult) -> Self {
        ToolResult::text(result.translated_text.clone())
            .with_metadata("source_language", &result.source_language)
            .with_metadata("target_language", &result.target_language)
            .with_metadata("original_text", &result.original_text)
            .with_metadata("detected_language", &result.detected_language)
    }
}

impl From<&TranslateError> for ToolResult {
    fn from(err: &TranslateError) -> Self {
        let result = ToolResult::error(err.to_string()).with_metadata(ERROR_KIND, err.kind());
        match err.code() {
            Some(code) => result.with_metadata(ERROR_CODE, code),
            None => result,
        }
    }
}
