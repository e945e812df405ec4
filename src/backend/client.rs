// ABOUTME: Defines the Translator trait - the seam between the tool adapter
// ABOUTME: and whichever provider performs the actual translation.

use std::fmt;

use async_trait::async_trait;

use crate::error::BackendError;

/// Wire value meaning "let the provider detect the source language".
pub const AUTO_DETECT: &str = "auto";

/// Source language of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLanguage {
    Auto,
    Code(String),
}

impl SourceLanguage {
    /// Absent or blank values mean auto-detect; anything else is kept verbatim.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(code) if !code.trim().is_empty() => Self::Code(code.to_string()),
            _ => Self::Auto,
        }
    }

    pub fn code(code: impl Into<String>) -> Self {
        Self::Code(code.into())
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Auto => AUTO_DETECT,
            Self::Code(code) => code,
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single translation request sent to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source: SourceLanguage,
    pub target: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, source: SourceLanguage, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source,
            target: target.into(),
        }
    }
}

/// A provider's answer to a translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResponse {
    pub translated_text: String,
    /// Source language the provider reports, if any.
    pub detected_language: Option<String>,
}

impl TranslationResponse {
    pub fn new(translated_text: impl Into<String>) -> Self {
        Self {
            translated_text: translated_text.into(),
            detected_language: None,
        }
    }
}

/// Trait for translation provider implementations.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate one piece of text. Implementations do not retry.
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, BackendError>;
}
