// ABOUTME: Defines the Tool trait - a manifest plus an async execute method.
// ABOUTME: Name, description and schema are derived from the manifest.

use async_trait::async_trait;

use super::ToolResult;
use crate::manifest::ToolDefinition;

/// A tool that can be invoked by an LLM host.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The manifest describing this tool.
    fn definition(&self) -> &ToolDefinition;

    /// Returns the unique name of this tool.
    fn name(&self) -> &str {
        self.definition().name()
    }

    /// Returns the model-facing description.
    fn description(&self) -> &str {
        &self.definition().description.llm
    }

    /// Returns the JSON Schema for the tool's input parameters.
    fn schema(&self) -> serde_json::Value {
        self.definition().input_schema()
    }

    /// Execute the tool with the given parameters.
    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error>;
}
