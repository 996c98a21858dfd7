//! Task Master MCP Server Library
//!
//! This crate exposes the `task-master` command-line task manager to MCP
//! clients. Seven tools map onto `task-master` subcommands and run it as a
//! child process; two more (agent creation and pattern activation) are
//! answered in-process from static tables.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, JSON-RPC types, the request
//!   dispatcher, and the transports (STDIO, TCP, HTTP)
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: tool definitions, argument mapping, and the process runner
//!
//! # Example
//!
//! ```rust,no_run
//! use task_master_mcp::{core::McpServer, core::Config, core::TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     config.validate()?;
//!     let server = McpServer::new(config.clone());
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
