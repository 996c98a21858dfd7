//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod profiles;
pub mod tasks;

pub use profiles::{ActivatePatternsTool, CreateAgentTool};
pub use tasks::{
    TaskAddTool, TaskExpandTool, TaskListTool, TaskNextTool, TaskResearchTool,
    TaskSetStatusTool, TaskShowTool,
};
