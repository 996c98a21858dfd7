//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Most tools forward to the external `task-master` command; two are answered
//! in-process from static tables.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Capability list and dispatch by tool name
//! - `runner.rs` - External command execution behind the `CommandRunner` trait
//! - `arguments.rs` - Argument decoding and schema helpers
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `tasks/my_tool.rs`)
//! 2. Define params, `input_schema()`, `to_tool()` and `execute()`
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `registry.rs` (`tool_names`, `get_all_tools`, `call_tool`)

pub mod arguments;
pub mod definitions;
mod error;
mod registry;
pub mod runner;

pub use error::{ToolError, ToolErrorKind, ToolResult};
pub use registry::ToolRegistry;
pub use runner::{CommandRunner, ProcessRunner};
