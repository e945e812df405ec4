// ABOUTME: Manifest module - declarative tool and provider metadata.
// ABOUTME: Bundled YAML manifests are embedded at compile time.

mod provider;
mod types;

pub use provider::*;
pub use types::*;

use crate::error::ManifestError;

const TRANSLATE_TEXT_YAML: &str = include_str!("translate_text.yaml");
const NIUTRANS_PROVIDER_YAML: &str = include_str!("niutrans.yaml");

/// Load the bundled `translate_text` tool manifest.
pub fn translate_text_definition() -> Result<ToolDefinition, ManifestError> {
    ToolDefinition::from_yaml_str(TRANSLATE_TEXT_YAML)
}

/// Load the bundled NiuTrans provider manifest.
pub fn niutrans_provider() -> Result<ProviderManifest, ManifestError> {
    ProviderManifest::from_yaml_str(NIUTRANS_PROVIDER_YAML)
}
