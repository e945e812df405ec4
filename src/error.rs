// ABOUTME: Defines all error types for the translate tool using thiserror.
// ABOUTME: Adapter, backend, manifest and registry failures each get an enum.

/// Errors raised by the Translate Text adapter.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Backend error: {0}")]
    Backend(#[source] BackendError),

    #[error("Unexpected error: {0}")]
    Unexpected(#[source] anyhow::Error),
}

impl TranslateError {
    pub(crate) fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Stable classification string surfaced to the host.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::Backend(_) => "backend_error",
            Self::Unexpected(_) => "unexpected_error",
        }
    }

    /// Provider error code, if the backend supplied one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Backend(err) => err.code(),
            _ => None,
        }
    }
}

impl From<BackendError> for TranslateError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::MalformedResponse(_) => Self::Unexpected(anyhow::Error::new(err)),
            other => Self::Backend(other),
        }
    }
}

/// Errors from the external translation provider.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("authentication failed ({code}): {message}")]
    Auth { code: String, message: String },

    #[error("quota exceeded ({code}): {message}")]
    Quota { code: String, message: String },

    #[error("unsupported language ({code}): {message}")]
    UnsupportedLanguage { code: String, message: String },

    #[error("provider error ({code}): {message}")]
    Provider { code: String, message: String },

    #[error("request timed out")]
    Timeout,

    #[error("provider timed out ({code}): {message}")]
    ProviderTimeout { code: String, message: String },

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP error ({status}): {message}")]
    Http { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl BackendError {
    /// The provider-specific error code carried by this error.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Auth { code, .. }
            | Self::Quota { code, .. }
            | Self::UnsupportedLanguage { code, .. }
            | Self::Provider { code, .. }
            | Self::ProviderTimeout { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err)
        }
    }
}

/// Errors from loading or validating manifests.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tool name must not be empty")]
    EmptyName,

    #[error("Parameter name must not be empty")]
    EmptyParameterName,

    #[error("Duplicate parameter: {0}")]
    DuplicateParameter(String),

    #[error("Provider name must not be empty")]
    EmptyProviderName,

    #[error("Credential name must not be empty")]
    EmptyCredentialName,

    #[error("Duplicate credential: {0}")]
    DuplicateCredential(String),

    #[error("Expected exactly one entry point, found {0}")]
    EntryPointCount(usize),

    #[error("Entry point for '{0}' has an empty source")]
    EmptyEntryPoint(String),
}

/// Errors from tool registry operations.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Invalid tool definition: {0}")]
    InvalidDefinition(#[from] ManifestError),

    #[error("Execution failed: {0}")]
    Execution(#[source] anyhow::Error),
}
