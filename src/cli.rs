//! CLI argument parsing via clap.

use clap::Parser;
use muxpal::build_info;

/// An MCP server for tmux. Speaks JSON-RPC 2.0 over stdio and exposes
/// session listing, pane-buffer capture, and command injection as tools.
#[derive(Debug, Parser)]
#[command(name = "muxpal", version = build_info::cli_version_text())]
pub struct Args {
    /// Path to config file (default: ./muxpal.toml or ~/.config/muxpal/muxpal.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Override the tmux program to invoke.
    #[arg(long = "tmux-bin", value_name = "PROGRAM")]
    pub tmux_bin: Option<String>,

    /// Override the log filter (tracing env-filter syntax, e.g. "debug").
    #[arg(long = "log-level", value_name = "FILTER")]
    pub log_level: Option<String>,
}
