// ABOUTME: NiuTrans connection settings, read from the environment or from
// ABOUTME: the credential map a host collects for the provider.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::error::BackendError;

pub const DEFAULT_API_URL: &str = "https://api.niutrans.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const TRANSLATE_PATH: &str = "/v2/text/translate";

/// Settings for [`NiuTransClient`](super::NiuTransClient).
#[derive(Clone)]
pub struct NiuTransConfig {
    pub app_id: String,
    pub api_key: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl NiuTransConfig {
    pub fn new(app_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build from `NIUTRANS_APP_ID`, `NIUTRANS_API_KEY` and the optional
    /// `NIUTRANS_API_URL` / `NIUTRANS_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, BackendError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, BackendError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| {
                    BackendError::Configuration(format!("{} environment variable not set", key))
                })
        };

        let mut config = Self::new(required("NIUTRANS_APP_ID")?, required("NIUTRANS_API_KEY")?);

        if let Some(url) = lookup("NIUTRANS_API_URL").filter(|v| !v.trim().is_empty()) {
            config.api_url = url;
        }
        if let Some(secs) = lookup("NIUTRANS_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                BackendError::Configuration(format!("invalid NIUTRANS_TIMEOUT_SECS: {}", secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Build from host-supplied credentials (`app_id`, `apikey`).
    pub fn from_credentials(credentials: &HashMap<String, String>) -> Result<Self, BackendError> {
        let get = |key: &str| {
            credentials
                .get(key)
                .filter(|v| !v.trim().is_empty())
                .cloned()
                .ok_or_else(|| BackendError::Configuration(format!("missing credential: {}", key)))
        };
        Ok(Self::new(get("app_id")?, get("apikey")?))
    }

    pub fn translate_url(&self) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), TRANSLATE_PATH)
    }
}

impl fmt::Debug for NiuTransConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NiuTransConfig")
            .field("app_id", &self.app_id)
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
