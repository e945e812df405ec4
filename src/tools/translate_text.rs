// ABOUTME: TranslateTextTool - validates parameters, resolves the source
// ABOUTME: language, and makes exactly one call to the translation backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::backend::{
    NiuTransClient, NiuTransConfig, SourceLanguage, TranslationRequest, Translator,
};
use crate::error::{BackendError, ManifestError, TranslateError};
use crate::manifest::{ToolDefinition, translate_text_definition};
use crate::tool::{Tool, ToolResult};

/// Outcome of a successful invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationResult {
    pub translated_text: String,
    /// Requested source code, or `auto`.
    pub source_language: String,
    pub target_language: String,
    pub original_text: String,
    /// Source language reported by the backend, if any.
    pub detected_language: Option<String>,
}

/// The `translate_text` tool.
pub struct TranslateTextTool {
    definition: ToolDefinition,
    backend: Arc<dyn Translator>,
    timeout: Option<Duration>,
}

impl TranslateTextTool {
    /// Create the tool over any backend, using the bundled manifest.
    pub fn new(backend: Arc<dyn Translator>) -> Result<Self, ManifestError> {
        Ok(Self {
            definition: translate_text_definition()?,
            backend,
            timeout: None,
        })
    }

    /// Create the tool backed by NiuTrans.
    pub fn niutrans(config: NiuTransConfig) -> anyhow::Result<Self> {
        let client = NiuTransClient::new(config)?;
        Ok(Self::new(Arc::new(client))?)
    }

    /// Bound every backend call by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate `params` and translate.
    pub async fn invoke(
        &self,
        params: &serde_json::Value,
    ) -> Result<TranslationResult, TranslateError> {
        let request = self.parse_request(params)?;

        let span = info_span!(
            "translate_text",
            invocation = %Uuid::new_v4(),
            from = %request.source,
            to = %request.target,
        );
        self.translate(request).instrument(span).await
    }

    fn parse_request(&self, params: &serde_json::Value) -> Result<TranslationRequest, TranslateError> {
        let fields = params
            .as_object()
            .ok_or_else(|| TranslateError::invalid("parameters", "expected a JSON object"))?;

        if let Some(name) = self.definition.missing_required(params) {
            return Err(TranslateError::invalid(name, "is required and must not be empty"));
        }

        let text = required_param(fields, "text")?;
        let target = required_param(fields, "to_language")?;
        let source = SourceLanguage::from_param(string_param(fields, "from_language")?);

        Ok(TranslationRequest::new(text, source, target))
    }

    async fn translate(
        &self,
        request: TranslationRequest,
    ) -> Result<TranslationResult, TranslateError> {
        debug!("calling translation backend");

        let call = self.backend.translate(&request);
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| BackendError::Timeout)?,
            None => call.await,
        }?;

        info!(
            chars = request.text.chars().count(),
            detected = response.detected_language.as_deref().unwrap_or(""),
            "translation complete"
        );

        Ok(TranslationResult {
            translated_text: response.translated_text,
            source_language: request.source.as_str().to_string(),
            target_language: request.target,
            original_text: request.text,
            detected_language: response.detected_language,
        })
    }
}

fn string_param<'a>(
    fields: &'a serde_json::Map<String, serde_json::Value>,
    name: &str,
) -> Result<Option<&'a str>, TranslateError> {
    match fields.get(name) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(TranslateError::invalid(name, "must be a string")),
    }
}

fn required_param<'a>(
    fields: &'a serde_json::Map<String, serde_json::Value>,
    name: &str,
) -> Result<&'a str, TranslateError> {
    string_param(fields, name)?
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| TranslateError::invalid(name, "is required and must not be empty"))
}

#[async_trait]
impl Tool for TranslateTextTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        match self.invoke(&params).await {
            Ok(result) => Ok(result.into()),
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "translate_text failed");
                Ok(ToolResult::from(&err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::backend::TranslationResponse;

    /// Records requests and answers with a fixed reply.
    struct StubTranslator {
        calls: Mutex<Vec<TranslationRequest>>,
        reply: fn(&TranslationRequest) -> Result<TranslationResponse, BackendError>,
    }

    impl StubTranslator {
        fn new(reply: fn(&TranslationRequest) -> Result<TranslationResponse, BackendError>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                reply,
            })
        }

        fn calls(&self) -> Vec<TranslationRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Translator for StubTranslator {
        async fn translate(
            &self,
            request: &TranslationRequest,
        ) -> Result<TranslationResponse, BackendError> {
            self.calls.lock().unwrap().push(request.clone());
            (self.reply)(request)
        }
    }

    struct SlowTranslator;

    #[async_trait]
    impl Translator for SlowTranslator {
        async fn translate(
            &self,
            _request: &TranslationRequest,
        ) -> Result<TranslationResponse, BackendError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(TranslationResponse::new("too late"))
        }
    }

    fn shout(request: &TranslationRequest) -> Result<TranslationResponse, BackendError> {
        Ok(TranslationResponse::new(request.text.to_uppercase()))
    }

    fn malformed(_: &TranslationRequest) -> Result<TranslationResponse, BackendError> {
        Err(BackendError::MalformedResponse("missing tgtText".to_string()))
    }

    fn unsupported(_: &TranslationRequest) -> Result<TranslationResponse, BackendError> {
        Err(BackendError::UnsupportedLanguage {
            code: "13007".to_string(),
            message: "language not supported".to_string(),
        })
    }

    #[tokio::test]
    async fn test_from_language_forwarded_verbatim() {
        let backend = StubTranslator::new(shout);
        let tool = TranslateTextTool::new(backend.clone()).unwrap();

        let result = assert_ok!(
            tool.invoke(&serde_json::json!({
                "text": "hello",
                "from_language": "zh-TW",
                "to_language": "en"
            }))
            .await
        );

        assert_eq!(result.translated_text, "HELLO");
        assert_eq!(result.source_language, "zh-TW");
        assert_eq!(
            backend.calls(),
            vec![TranslationRequest::new("hello", SourceLanguage::code("zh-TW"), "en")]
        );
    }

    #[tokio::test]
    async fn test_blank_from_language_means_auto() {
        let backend = StubTranslator::new(shout);
        let tool = TranslateTextTool::new(backend.clone()).unwrap();

        for params in [
            serde_json::json!({"text": "hi", "to_language": "ja", "from_language": ""}),
            serde_json::json!({"text": "hi", "to_language": "ja", "from_language": "  "}),
            serde_json::json!({"text": "hi", "to_language": "ja", "from_language": null}),
        ] {
            let result = assert_ok!(tool.invoke(&params).await);
            assert_eq!(result.source_language, "auto");
        }
        assert!(backend.calls().iter().all(|r| r.source.is_auto()));
    }

    #[tokio::test]
    async fn test_text_is_not_trimmed() {
        let backend = StubTranslator::new(shout);
        let tool = TranslateTextTool::new(backend.clone()).unwrap();

        let result = assert_ok!(
            tool.invoke(&serde_json::json!({"text": "  padded ", "to_language": "en"}))
                .await
        );
        assert_eq!(result.original_text, "  padded ");
        assert_eq!(backend.calls()[0].text, "  padded ");
    }

    #[tokio::test]
    async fn test_whitespace_text_rejected() {
        let backend = StubTranslator::new(shout);
        let tool = TranslateTextTool::new(backend.clone()).unwrap();

        let err = assert_err!(
            tool.invoke(&serde_json::json!({"text": " \n\t", "to_language": "en"}))
                .await
        );
        assert!(matches!(err, TranslateError::InvalidParameter { ref name, .. } if name == "text"));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_string_parameters_rejected() {
        let backend = StubTranslator::new(shout);
        let tool = TranslateTextTool::new(backend.clone()).unwrap();

        let err = assert_err!(
            tool.invoke(&serde_json::json!({"text": 42, "to_language": "en"}))
                .await
        );
        assert!(matches!(err, TranslateError::InvalidParameter { ref name, .. } if name == "text"));

        let err = assert_err!(
            tool.invoke(&serde_json::json!({"text": "hi", "to_language": "en", "from_language": 7}))
                .await
        );
        assert!(matches!(
            err,
            TranslateError::InvalidParameter { ref name, .. } if name == "from_language"
        ));

        let err = assert_err!(tool.invoke(&serde_json::json!(["hi", "en"])).await);
        assert_eq!(err.kind(), "invalid_parameter");

        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_response_is_unexpected() {
        let tool = TranslateTextTool::new(StubTranslator::new(malformed)).unwrap();
        let err = assert_err!(
            tool.invoke(&serde_json::json!({"text": "hi", "to_language": "en"}))
                .await
        );
        assert!(matches!(err, TranslateError::Unexpected(_)));
        assert_eq!(err.kind(), "unexpected_error");
        assert!(err.to_string().contains("missing tgtText"));
    }

    #[tokio::test]
    async fn test_timeout_classified() {
        let tool = TranslateTextTool::new(Arc::new(SlowTranslator))
            .unwrap()
            .with_timeout(Duration::from_millis(20));

        let err = assert_err!(
            tool.invoke(&serde_json::json!({"text": "hi", "to_language": "en"}))
                .await
        );
        assert!(matches!(err, TranslateError::Backend(BackendError::Timeout)));
    }

    #[tokio::test]
    async fn test_execute_success_metadata() {
        let tool = TranslateTextTool::new(StubTranslator::new(shout)).unwrap();
        let result = tool
            .execute(serde_json::json!({"text": "hi", "to_language": "en"}))
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(result.content, "HI");
        assert_eq!(result.metadata_str("source_language"), Some("auto"));
        assert_eq!(result.metadata_str("target_language"), Some("en"));
        assert_eq!(result.metadata_str("original_text"), Some("hi"));
    }

    #[tokio::test]
    async fn test_execute_surfaces_error_text() {
        let tool = TranslateTextTool::new(StubTranslator::new(unsupported)).unwrap();
        let result = tool
            .execute(serde_json::json!({"text": "hi", "from_language": "xx", "to_language": "en"}))
            .await
            .unwrap();

        assert!(result.is_error);
        assert!(result.content.contains("language not supported"));
        assert_eq!(result.metadata_str("error_kind"), Some("backend_error"));
        assert_eq!(result.metadata_str("error_code"), Some("13007"));
    }

    fn busy(_: &TranslationRequest) -> Result<TranslationResponse, BackendError> {
        Err(BackendError::ProviderTimeout {
            code: "13008".to_string(),
            message: "request processing timed out for app 7".to_string(),
        })
    }

    #[tokio::test]
    async fn test_execute_provider_timeout_keeps_code() {
        let tool = TranslateTextTool::new(StubTranslator::new(busy)).unwrap();
        let result = tool
            .execute(serde_json::json!({"text": "hi", "to_language": "en"}))
            .await
            .unwrap();

        assert!(result.is_error);
        assert!(result.content.contains("app 7"));
        assert_eq!(result.error_kind(), Some("backend_error"));
        assert_eq!(result.error_code(), Some("13008"));
    }

    #[tokio::test]
    async fn test_execute_invalid_parameter() {
        let tool = TranslateTextTool::new(StubTranslator::new(shout)).unwrap();
        let result = tool
            .execute(serde_json::json!({"text": "hi"}))
            .await
            .unwrap();

        assert!(result.is_error);
        assert!(result.content.contains("to_language"));
        assert_eq!(result.metadata_str("error_kind"), Some("invalid_parameter"));
        assert!(!result.metadata.contains_key("error_code"));
    }

    #[test]
    fn test_tool_surface_comes_from_manifest() {
        let tool = TranslateTextTool::new(StubTranslator::new(shout)).unwrap();
        assert_eq!(tool.name(), "translate_text");
        assert_eq!(tool.description(), "Translate text from one language to another");
        assert_eq!(
            tool.schema()["required"],
            serde_json::json!(["text", "to_language"])
        );
    }

    #[test]
    fn test_niutrans_constructor() {
        let tool = TranslateTextTool::niutrans(NiuTransConfig::new("app", "key")).unwrap();
        assert_eq!(tool.name(), "translate_text");
    }
}
