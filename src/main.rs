//! CLI entry point for muxpal.

mod cli;

use clap::Parser;
use muxpal::build_info;
use muxpal::config::load_config;
use muxpal::mcp::McpServer;
use muxpal::tmux::TmuxClient;
use muxpal::tools::execute_command::ExecuteCommandTool;
use muxpal::tools::list_sessions::ListSessionsTool;
use muxpal::tools::read_buffer::ReadBufferTool;
use muxpal::tools::ToolRegistry;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();

    // Load config.
    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    // Apply CLI overrides.
    config.apply_cli_overrides(args.tmux_bin.as_deref(), args.log_level.as_deref());

    // stdout belongs to the protocol, so all diagnostics go to stderr.
    init_tracing(&config.log.filter);
    tracing::info!("muxpal {}", build_info::startup_metadata_line());
    tracing::info!("tmux binary: {}", config.tmux.bin);

    // Build tool registry.
    let tmux = TmuxClient::new(config.tmux.bin.clone());
    let mut tools = ToolRegistry::new();
    tools.register(ListSessionsTool { tmux: tmux.clone() });
    tools.register(ReadBufferTool { tmux: tmux.clone() });
    tools.register(ExecuteCommandTool { tmux });

    let server = McpServer::new(tools);
    if let Err(e) = server.run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
