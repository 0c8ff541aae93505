//! Pluggable tool system.
//!
//! Tools are async trait objects dispatched by name from the protocol loop.
//! Each tool advertises its own JSON Schema definition and executes against
//! live tmux state through a [`crate::tmux::TmuxClient`].

pub mod execute_command;
pub mod list_sessions;
pub mod read_buffer;

use crate::error::ToolError;
use async_trait::async_trait;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Tool trait
// ---------------------------------------------------------------------------

/// Wire-format tool definition advertised in listing responses.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// A tool that can be invoked by a connected client.
///
/// Implement this trait to add custom tools. Register instances with
/// [`ToolRegistry`] before starting the server loop.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name matching what clients will call.
    fn name(&self) -> &'static str;

    /// Definition advertised in listing responses.
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool with the given JSON arguments string.
    /// Returns a text result to send back to the client.
    async fn execute(&self, arguments: &str) -> Result<String, ToolError>;
}

// ---------------------------------------------------------------------------
// Tool registry
// ---------------------------------------------------------------------------

/// Registry of available tools.
///
/// The server advertises all registered tool definitions to clients, and
/// dispatches tool calls through this registry.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool.
    pub fn register(&mut self, tool: impl Tool + 'static) {
        self.tools.push(Box::new(tool));
    }

    /// Get tool definitions for listing responses.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Find a tool by name and execute it.
    pub async fn execute(&self, name: &str, arguments: &str) -> Result<String, ToolError> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| ToolError::ExecutionFailed(format!("unknown tool: {name}")))?;
        tool.execute(arguments).await
    }

    /// True if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
