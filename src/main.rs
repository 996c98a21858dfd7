//! MCP Server Entry Point
//!
//! This is the main entry point for the task-master MCP server. It initializes
//! logging, loads and validates configuration, and starts the server with the
//! configured transport.

use anyhow::{Context, Result};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use task_master_mcp::core::config::LoggingConfig;
use task_master_mcp::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging first, so warnings from the rest of the configuration are seen
    dotenvy::dotenv().ok();
    init_logging(&LoggingConfig::from_env());

    let config = Config::from_env();

    info!("Starting {} v{}", config.server.name, config.server.version);

    config.validate().context("invalid configuration")?;
    info!(
        "External command: {} (timeout: {})",
        config.task_master.command,
        config
            .task_master
            .timeout
            .map(|t| format!("{}s", t.as_secs()))
            .unwrap_or_else(|| "none".to_string())
    );

    let server = McpServer::new(config.clone());

    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs always go to stderr; stdout belongs to the protocol.
fn init_logging(logging: &LoggingConfig) {
    let level = match logging.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if logging.with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
