//! Command injection tool.
//!
//! Types a command into a named session and presses Enter, exactly as an
//! operator at that terminal would. The text is forwarded to tmux verbatim,
//! with no quoting or filtering; callers are trusted with the same power as
//! an interactive user. Success means delivery of the keystrokes, not
//! completion or exit status of whatever they start.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Tool, ToolDefinition};
use crate::error::{TmuxError, ToolError};
use crate::tmux::TmuxClient;

/// Tool that executes a command inside a tmux session.
pub struct ExecuteCommandTool {
    /// Client for the tmux binary, shared with the other tools.
    pub tmux: TmuxClient,
}

#[derive(Deserialize)]
struct Args {
    session_name: String,
    command: String,
}

/// Structured outcome reported back to the caller as JSON.
#[derive(Debug, Serialize)]
struct CommandResult {
    status: &'static str,
    message: String,
}

impl CommandResult {
    fn success(message: String) -> Self {
        Self {
            status: "success",
            message,
        }
    }

    fn error(message: String) -> Self {
        Self {
            status: "error",
            message,
        }
    }
}

#[async_trait]
impl Tool for ExecuteCommandTool {
    fn name(&self) -> &'static str {
        "execute_command"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().into(),
            description: "Execute a command in a specific tmux terminal".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "session_name": {
                        "type": "string",
                        "description": "Name of the tmux session to execute the command in"
                    },
                    "command": {
                        "type": "string",
                        "description": "The command to execute"
                    }
                },
                "required": ["session_name", "command"]
            }),
        }
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let args: Args = serde_json::from_str(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let result = if !self.tmux.session_exists(&args.session_name).await {
            CommandResult::error(format!("Session '{}' not found", args.session_name))
        } else {
            match self.tmux.send_keys(&args.session_name, &args.command).await {
                Ok(()) => CommandResult::success(format!(
                    "Command executed in session '{}'",
                    args.session_name
                )),
                Err(err @ TmuxError::CommandFailed { .. }) => {
                    let detail = match err.stderr() {
                        Some(stderr) => stderr.to_string(),
                        None => err.to_string(),
                    };
                    CommandResult::error(format!("Error executing command: {detail}"))
                }
                Err(err) => CommandResult::error(format!("Error: {err}")),
            }
        };
        serde_json::to_string(&result).map_err(|e| ToolError::ExecutionFailed(e.to_string()))
    }
}
