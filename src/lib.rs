//! Muxpal is a tmux introspection and control server speaking MCP.
//!
//! This crate exposes three tools to MCP clients over line-delimited
//! JSON-RPC 2.0 on stdio: `list_sessions`, `read_buffer`, and
//! `execute_command`. It holds no state of its own; the tmux server reached
//! through the configured binary is the single source of truth, and every
//! call re-reads it.
//!
//! # Quick start
//!
//! ```no_run
//! use muxpal::mcp::McpServer;
//! use muxpal::tmux::TmuxClient;
//! use muxpal::tools::list_sessions::ListSessionsTool;
//! use muxpal::tools::ToolRegistry;
//!
//! # async fn example() {
//! let tmux = TmuxClient::new("tmux");
//! let mut tools = ToolRegistry::new();
//! tools.register(ListSessionsTool { tmux });
//! let server = McpServer::new(tools);
//! server.run().await.unwrap();
//! # }
//! ```

pub mod build_info;
pub mod config;
pub mod error;
pub mod mcp;
#[cfg(test)]
pub mod testsupport;
pub mod tmux;
pub mod tools;
