// ABOUTME: Declarative tool manifest types - identity, localized labels,
// ABOUTME: ordered parameters, and the extension pointer to the entry point.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ManifestError;

/// Locale used when the requested one has no entry.
pub const FALLBACK_LOCALE: &str = "en_US";

/// Display text keyed by locale tag (e.g. `en_US`, `zh_Hans`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct I18nText(BTreeMap<String, String>);

impl I18nText {
    /// Build from `(locale, text)` pairs.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Text for `locale`, falling back to `en_US`, then to any entry.
    pub fn resolve(&self, locale: &str) -> &str {
        self.0
            .get(locale)
            .or_else(|| self.0.get(FALLBACK_LOCALE))
            .or_else(|| self.0.values().next())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Primitive type tag of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Number,
    Boolean,
}

impl ParameterType {
    /// The JSON Schema type name.
    pub fn json_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// Who supplies a parameter's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterForm {
    /// Filled in by the invoking model.
    Llm,
    /// Filled in by a human through the host's form UI.
    Form,
}

/// A single declared tool parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParameterType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub label: I18nText,
    #[serde(default)]
    pub human_description: I18nText,
    #[serde(default)]
    pub llm_description: String,
    pub form: ParameterForm,
}

impl ToolParameter {
    fn is_satisfied_by(&self, value: Option<&serde_json::Value>) -> bool {
        match value {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolIdentity {
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub label: I18nText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescription {
    /// Shown to people browsing the host's tool list.
    pub human: I18nText,
    /// Sent to the model when the tool is offered.
    pub llm: String,
}

/// Executable entry point for one implementation language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    pub source: String,
}

/// Extension block mapping implementation language to its entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolExtension(BTreeMap<String, EntryPoint>);

impl ToolExtension {
    pub fn new(language: impl Into<String>, source: impl Into<String>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            language.into(),
            EntryPoint {
                source: source.into(),
            },
        );
        Self(entries)
    }

    /// The single entry point, or an error if there is not exactly one.
    pub fn entry_point(&self) -> Result<(&str, &EntryPoint), ManifestError> {
        let mut iter = self.0.iter();
        match (iter.next(), iter.next()) {
            (Some((lang, entry)), None) => {
                if entry.source.trim().is_empty() {
                    return Err(ManifestError::EmptyEntryPoint(lang.clone()));
                }
                Ok((lang.as_str(), entry))
            }
            _ => Err(ManifestError::EntryPointCount(self.0.len())),
        }
    }
}

/// The model-facing view of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// A complete tool manifest. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub identity: ToolIdentity,
    pub description: ToolDescription,
    #[serde(default)]
    pub parameters: Vec<ToolParameter>,
    pub extra: ToolExtension,
}

impl ToolDefinition {
    /// Parse and validate a manifest from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ManifestError> {
        let definition: Self = serde_yaml::from_str(yaml)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Read, parse and validate a manifest file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.identity.name.trim().is_empty() {
            return Err(ManifestError::EmptyName);
        }

        let mut seen = HashSet::new();
        for param in &self.parameters {
            if param.name.trim().is_empty() {
                return Err(ManifestError::EmptyParameterName);
            }
            if !seen.insert(param.name.as_str()) {
                return Err(ManifestError::DuplicateParameter(param.name.clone()));
            }
        }

        self.extra.entry_point()?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn entry_point(&self) -> Result<(&str, &EntryPoint), ManifestError> {
        self.extra.entry_point()
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Parameters the invoking model is expected to fill in.
    pub fn llm_parameters(&self) -> impl Iterator<Item = &ToolParameter> {
        self.parameters
            .iter()
            .filter(|p| p.form == ParameterForm::Llm)
    }

    /// JSON Schema for the model-supplied parameters.
    pub fn input_schema(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in self.llm_parameters() {
            properties.insert(
                param.name.clone(),
                serde_json::json!({
                    "type": param.param_type.json_type(),
                    "description": param.llm_description,
                }),
            );
            if param.required {
                required.push(serde_json::Value::String(param.name.clone()));
            }
        }

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    pub fn to_spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.identity.name.clone(),
            description: self.description.llm.clone(),
            input_schema: self.input_schema(),
        }
    }

    /// First required model-supplied parameter that is absent, null or blank.
    pub fn missing_required(&self, params: &serde_json::Value) -> Option<&str> {
        self.llm_parameters()
            .filter(|p| p.required)
            .find(|p| !p.is_satisfied_by(params.get(&p.name)))
            .map(|p| p.name.as_str())
    }
}
