//! Pane history reading tool.
//!
//! Captures pane contents from a named session, optionally ranged by a
//! starting line and a line count. The session name is validated against a
//! fresh listing first, and every tmux fault is folded into the returned text
//! so the call itself always succeeds.

use async_trait::async_trait;
use serde::Deserialize;

use super::{Tool, ToolDefinition};
use crate::error::{TmuxError, ToolError};
use crate::tmux::{BufferRange, TmuxClient};

/// Tool that reads buffer content from a tmux session.
pub struct ReadBufferTool {
    /// Client for the tmux binary, shared with the other tools.
    pub tmux: TmuxClient,
}

#[derive(Deserialize)]
struct Args {
    session_name: String,
    start_line: Option<i64>,
    num_lines: Option<i64>,
}

#[async_trait]
impl Tool for ReadBufferTool {
    fn name(&self) -> &'static str {
        "read_buffer"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().into(),
            description: "Read the buffer content from a specified tmux terminal".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "session_name": {
                        "type": "string",
                        "description": "Name of the tmux session to read from"
                    },
                    "start_line": {
                        "type": "integer",
                        "description": "Optional starting line number (default is beginning of buffer)"
                    },
                    "num_lines": {
                        "type": "integer",
                        "description": "Optional number of lines to read (default is all lines)"
                    }
                },
                "required": ["session_name"]
            }),
        }
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let args: Args = serde_json::from_str(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        if !self.tmux.session_exists(&args.session_name).await {
            return Ok(format!("Error: Session '{}' not found", args.session_name));
        }

        let range = BufferRange {
            start_line: args.start_line,
            num_lines: args.num_lines,
        };
        let text = match self.tmux.capture_pane(&args.session_name, range).await {
            Ok(stdout) => stdout,
            Err(TmuxError::CommandFailed { stderr, .. }) => {
                format!("Error reading tmux buffer: {stderr}")
            }
            Err(err) => format!("Error: {err}"),
        };
        Ok(text)
    }
}
