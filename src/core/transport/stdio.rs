//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP - the default and recommended mode.
//! Stdout carries protocol messages only; logs go to stderr.

use tracing::info;

use super::TransportResult;
use super::session::serve_lines;
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until stdin is closed.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        serve_lines(server, tokio::io::stdin(), tokio::io::stdout()).await?;

        info!("STDIO transport finished");
        Ok(())
    }
}
