// ABOUTME: Provider-level manifest - plugin metadata and the credentials
// ABOUTME: a host must collect before any of the provider's tools can run.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::I18nText;
use crate::error::ManifestError;

/// Plugin metadata shown by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginMeta {
    pub name: String,
    pub author: String,
    pub version: String,
    pub label: I18nText,
    pub description: I18nText,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
    SecretInput,
    TextInput,
}

/// A credential field the host asks the user for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CredentialKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub label: I18nText,
    #[serde(default)]
    pub help: I18nText,
    #[serde(default)]
    pub placeholder: I18nText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderManifest {
    pub identity: PluginMeta,
    #[serde(default)]
    pub credentials: Vec<CredentialSpec>,
    /// Names of the tools this provider exposes.
    #[serde(default)]
    pub tools: Vec<String>,
}

impl ProviderManifest {
    /// Parse and validate a provider manifest from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ManifestError> {
        let manifest: Self = serde_yaml::from_str(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Provider name non-empty; credential names non-empty and unique.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.identity.name.trim().is_empty() {
            return Err(ManifestError::EmptyProviderName);
        }

        let mut seen = HashSet::new();
        for credential in &self.credentials {
            if credential.name.trim().is_empty() {
                return Err(ManifestError::EmptyCredentialName);
            }
            if !seen.insert(credential.name.as_str()) {
                return Err(ManifestError::DuplicateCredential(credential.name.clone()));
            }
        }
        Ok(())
    }

    /// Required credential names absent or blank in `supplied`.
    pub fn missing_credentials(&self, supplied: &HashMap<String, String>) -> Vec<&str> {
        self.credentials
            .iter()
            .filter(|c| c.required)
            .filter(|c| {
                supplied
                    .get(&c.name)
                    .is_none_or(|v| v.trim().is_empty())
            })
            .map(|c| c.name.as_str())
            .collect()
    }
}
