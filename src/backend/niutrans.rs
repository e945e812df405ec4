// ABOUTME: NiuTrans text translation client implementation.
// ABOUTME: Signs form requests with an MD5 authStr and maps provider errors.

use async_trait::async_trait;
use md5::{Digest, Md5};
use serde::{Deserialize, Deserializer};
use tracing::debug;

use super::{
    NiuTransConfig, SourceLanguage, TranslationRequest, TranslationResponse, Translator,
};
use crate::error::BackendError;

/// NiuTrans API response format.
#[derive(Debug, Default, Deserialize)]
pub struct NiuTransResponse {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(rename = "tgtText", default)]
    pub tgt_text: Option<String>,
    #[serde(rename = "srcText", default)]
    pub src_text: Option<String>,
    #[serde(rename = "errorCode", default, deserialize_with = "lenient_string")]
    pub error_code: Option<String>,
    #[serde(rename = "errorMsg", default)]
    pub error_msg: Option<String>,
}

impl NiuTransResponse {
    /// Convert into a translation, or the provider error it carries.
    pub fn into_result(self) -> Result<TranslationResponse, BackendError> {
        if let Some(code) = self.error_code.filter(|c| !c.is_empty()) {
            return Err(classify_provider_error(
                code,
                self.error_msg.unwrap_or_default(),
            ));
        }

        let translated_text = self
            .tgt_text
            .ok_or_else(|| BackendError::MalformedResponse("missing tgtText".to_string()))?;

        Ok(TranslationResponse {
            translated_text,
            detected_language: self.from.filter(|f| !f.is_empty()),
        })
    }
}

// errorCode has been observed both as a string and as a bare number.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Map a NiuTrans error code onto the backend error taxonomy.
pub fn classify_provider_error(code: String, message: String) -> BackendError {
    match code.as_str() {
        "10001" | "13001" => BackendError::Quota { code, message },
        "13002" => BackendError::Auth { code, message },
        "13007" => BackendError::UnsupportedLanguage { code, message },
        "13008" => BackendError::ProviderTimeout { code, message },
        _ => BackendError::Provider { code, message },
    }
}

fn classify_status(status: u16, body: &str) -> BackendError {
    let parsed = serde_json::from_str::<NiuTransResponse>(body).ok();

    // A provider error code in the body is more specific than the status.
    if let Some(code) = parsed
        .as_ref()
        .and_then(|r| r.error_code.clone())
        .filter(|c| !c.is_empty())
    {
        let message = parsed.and_then(|r| r.error_msg).unwrap_or_default();
        return classify_provider_error(code, message);
    }

    let message = parsed
        .and_then(|r| r.error_msg)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string());

    match status {
        401 | 403 => BackendError::Auth {
            code: status.to_string(),
            message,
        },
        429 => BackendError::Quota {
            code: status.to_string(),
            message,
        },
        _ => BackendError::Http { status, message },
    }
}

/// Decode a successful HTTP body.
pub fn parse_response(body: &str) -> Result<TranslationResponse, BackendError> {
    let response: NiuTransResponse = serde_json::from_str(body)
        .map_err(|e| BackendError::MalformedResponse(e.to_string()))?;
    response.into_result()
}

/// Client for the NiuTrans text translation API.
#[derive(Debug, Clone)]
pub struct NiuTransClient {
    config: NiuTransConfig,
    http: reqwest::Client,
}

impl NiuTransClient {
    /// Create a client whose requests are bounded by `config.timeout`.
    pub fn new(config: NiuTransConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("translate-tool/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                BackendError::Configuration(format!("failed to build HTTP client: {}", e))
            })?;
        Ok(Self { config, http })
    }

    /// Create with a custom reqwest client.
    pub fn with_client(config: NiuTransConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// Create a client from the `NIUTRANS_*` environment variables.
    pub fn from_env() -> Result<Self, BackendError> {
        Self::new(NiuTransConfig::from_env()?)
    }

    pub fn config(&self) -> &NiuTransConfig {
        &self.config
    }

    /// MD5 over every form field plus `apikey`, sorted by key, joined `k=v&k=v`.
    pub fn auth_str(&self, fields: &[(&'static str, String)]) -> String {
        let mut pairs: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        pairs.push(("apikey", self.config.api_key.as_str()));
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        let joined = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        hex::encode(Md5::digest(joined.as_bytes()))
    }

    /// The form fields for `request`, including `authStr`.
    pub fn signed_form(
        &self,
        request: &TranslationRequest,
        timestamp: i64,
    ) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("from", request.source.as_str().to_string()),
            ("to", request.target.clone()),
            ("appId", self.config.app_id.clone()),
            ("timestamp", timestamp.to_string()),
            ("srcText", request.text.clone()),
        ];
        let auth = self.auth_str(&form);
        form.push(("authStr", auth));
        form
    }

    /// Check the configured credentials with a tiny en -> zh request.
    pub async fn verify(&self) -> Result<(), BackendError> {
        let request = TranslationRequest::new("testing", SourceLanguage::code("en"), "zh");
        self.translate(&request).await.map(|_| ())
    }
}

#[async_trait]
impl Translator for NiuTransClient {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, BackendError> {
        let form = self.signed_form(request, chrono::Utc::now().timestamp());
        let url = self.config.translate_url();

        debug!(
            url = %url,
            from = %request.source,
            to = %request.target,
            chars = request.text.chars().count(),
            "sending NiuTrans request"
        );

        let response = self.http.post(&url).form(&form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(classify_status(status.as_u16(), &body));
        }

        parse_response(&body)
    }
}
