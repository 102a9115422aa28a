//! Sample Design System MCP Server
//!
//! Serves design system component metadata to MCP clients over HTTP or stdio.

use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use design_system_mcp::config::{Args, Config, LogFormat, Transport};
use design_system_mcp::error::Result;
use design_system_mcp::mcp::handler::McpHandler;
use design_system_mcp::mcp::prompts::PromptRegistry;
use design_system_mcp::mcp::resources::ResourceRegistry;
use design_system_mcp::mcp::server::McpServer;
use design_system_mcp::mcp::transport::StdioTransport;
use design_system_mcp::metrics::Metrics;
use design_system_mcp::{tools, SERVER_NAME, VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match args.log_format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
    }
    .expect("Failed to set tracing subscriber");

    // Build configuration from args
    let config: Config = args.into();
    config.validate()?;

    info!("Sample Design System MCP Server v{}", VERSION);
    info!("Transport: {:?}", config.transport);

    // Create MCP handler and register tools
    let mut handler = McpHandler::new();
    tools::register_all_tools(&mut handler);
    info!("Registered {} MCP tools", handler.tool_count());

    let server = McpServer::with_features(
        handler,
        PromptRegistry::new(),
        ResourceRegistry::new(config.resource_page_size),
        Metrics::new(),
        SERVER_NAME,
    );

    // Start the server based on transport mode
    match config.transport {
        Transport::Stdio => {
            info!("Starting stdio transport...");
            server.run(StdioTransport::new()).await?;
        }
        Transport::Http => {
            design_system_mcp::http::start_server(&config, Arc::new(server)).await?;
        }
    }

    Ok(())
}
