//! MCP server over stdio.
//!
//! Reads line-delimited JSON-RPC 2.0 from stdin and writes responses to
//! stdout, one per request, in arrival order. stdout carries protocol frames
//! only; all diagnostics go through the log stream on stderr.
//!
//! Tool faults never become protocol errors. A registry-level failure
//! (unknown tool, arguments that do not deserialize) is reported as a tool
//! result with `isError`, and anything deeper is already folded into the tool
//! text by the handlers themselves.

pub mod jsonrpc;

use crate::build_info;
use crate::tools::ToolRegistry;
use jsonrpc::{method_not_found, parse_error, success_response, IncomingMessage, Response};
use serde::Deserialize;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

/// MCP protocol revision implemented by this server.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name reported during initialization.
pub const SERVER_NAME: &str = "muxpal";

/// Parameters of a `tools/call` request.
#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

/// One server instance bound to a tool registry.
///
/// Construct it in `main` and call [`McpServer::run`]; tests drive
/// [`McpServer::handle_line`] directly instead of going through stdio.
pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Serve requests until stdin closes.
    pub async fn run(&self) -> std::io::Result<()> {
        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(stdin).lines();

        while let Some(line) = lines.next_line().await? {
            let Some(response) = self.handle_line(&line).await else {
                continue;
            };
            match serde_json::to_string(&response) {
                Ok(json) => {
                    debug!("-> {json}");
                    stdout.write_all(json.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                    stdout.flush().await?;
                }
                Err(e) => error!("failed to serialize response: {e}"),
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one raw input line. Returns `None` when no response is owed:
    /// blank input, notifications, and messages without a method.
    pub async fn handle_line(&self, line: &str) -> Option<Response> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        debug!("<- {trimmed}");

        let msg: IncomingMessage = match serde_json::from_str(trimmed) {
            Ok(m) => m,
            Err(e) => {
                debug!("undecodable request: {e}");
                return Some(parse_error());
            }
        };

        let method = match &msg.method {
            Some(m) => m.as_str(),
            None => {
                debug!("ignoring message without method");
                return None;
            }
        };

        let id = match msg.id {
            Some(id) => id,
            None => {
                debug!("notification: {method}");
                return None;
            }
        };

        let response = match method {
            "initialize" => success_response(id, self.handle_initialize()),
            "tools/list" => success_response(id, self.handle_tools_list()),
            "tools/call" => success_response(id, self.handle_tools_call(msg.params).await),
            _ => method_not_found(id, method),
        };
        Some(response)
    }

    fn handle_initialize(&self) -> Value {
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": build_info::VERSION
            }
        })
    }

    fn handle_tools_list(&self) -> Value {
        serde_json::json!({ "tools": self.registry.definitions() })
    }

    async fn handle_tools_call(&self, params: Option<Value>) -> Value {
        let Some(params) = params else {
            return tool_error("Missing params for tools/call");
        };
        let call: CallParams = match serde_json::from_value(params) {
            Ok(c) => c,
            Err(e) => return tool_error(&format!("Invalid params for tools/call: {e}")),
        };
        // Tools deserialize their own arguments; absent means empty.
        let arguments = match &call.arguments {
            Some(args) => args.to_string(),
            None => "{}".to_string(),
        };

        debug!("dispatching tool {}", call.name);
        match self.registry.execute(&call.name, &arguments).await {
            Ok(text) => serde_json::json!({
                "content": [{ "type": "text", "text": text }]
            }),
            Err(err) => tool_error(&err.to_string()),
        }
    }
}

/// Build a tool error result.
fn tool_error(message: &str) -> Value {
    serde_json::json!({
        "isError": true,
        "content": [{
            "type": "text",
            "text": message
        }]
    })
}
