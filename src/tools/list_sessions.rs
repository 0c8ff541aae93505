//! Session listing tool.
//!
//! Reports every session the tmux server currently knows about as a JSON
//! array of records. An unreachable or empty server is not an error, just an
//! empty list.

use async_trait::async_trait;

use super::{Tool, ToolDefinition};
use crate::error::ToolError;
use crate::tmux::TmuxClient;

/// Tool that lists active tmux sessions.
pub struct ListSessionsTool {
    /// Client for the tmux binary, shared with the other tools.
    pub tmux: TmuxClient,
}

#[async_trait]
impl Tool for ListSessionsTool {
    fn name(&self) -> &'static str {
        "list_sessions"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().into(),
            description: "List all available tmux sessions".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    async fn execute(&self, _arguments: &str) -> Result<String, ToolError> {
        let sessions = self.tmux.list_sessions().await;
        serde_json::to_string(&sessions).map_err(|e| ToolError::ExecutionFailed(e.to_string()))
    }
}
