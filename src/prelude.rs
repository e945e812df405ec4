// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use translate_tool::prelude::*;` to get started quickly.

pub use crate::backend::{
    AUTO_DETECT, NiuTransClient, NiuTransConfig, SourceLanguage, TranslationRequest,
    TranslationResponse, Translator,
};
pub use crate::error::{BackendError, ManifestError, ToolError, TranslateError};
pub use crate::manifest::{
    I18nText, ParameterForm, ParameterType, ProviderManifest, ToolDefinition, ToolParameter,
    ToolSpec, niutrans_provider, translate_text_definition,
};
pub use crate::tool::{Registry, Tool, ToolResult};
pub use crate::tools::{TranslateTextTool, TranslationResult};
