//! Task listing tool definition.
//!
//! Wraps `task-master list`, optionally filtered by status.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use super::common::{TaskStatus, flag};
use crate::domains::tools::arguments::{object_schema, parse_arguments};
use crate::domains::tools::error::ToolResult;
use crate::domains::tools::runner::CommandRunner;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the list tool.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListParams {
    /// Only list tasks in this status.
    #[serde(default)]
    pub status: Option<TaskStatus>,

    /// Include subtasks in the output.
    #[serde(default)]
    pub with_subtasks: Option<bool>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// List tool - shows all tasks with their status.
pub struct TaskListTool;

impl TaskListTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "task_master_list";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List all tasks with their status";

    /// Build the `task-master` argument vector.
    pub fn build_args(params: &TaskListParams) -> Vec<String> {
        let mut args = vec!["list".to_string()];
        if let Some(status) = params.status {
            args.push(flag("status", status.as_str()));
        }
        if params.with_subtasks.unwrap_or(false) {
            args.push("--with-subtasks".to_string());
        }
        args
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(arguments: JsonObject, runner: &dyn CommandRunner) -> ToolResult<String> {
        let params: TaskListParams = parse_arguments(arguments)?;
        info!("List tool called: status={:?}", params.status);
        runner.run(&Self::build_args(&params)).await
    }

    /// Input schema advertised to clients.
    pub fn input_schema() -> JsonObject {
        object_schema(
            json!({
                "status": {
                    "type": "string",
                    "description": "Filter by status (pending, done, in-progress, review, deferred, cancelled)",
                    "enum": TaskStatus::schema_enum()
                },
                "with_subtasks": {
                    "type": "boolean",
                    "description": "Include subtasks in the output"
                }
            }),
            &[],
        )
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: Arc::new(Self::input_schema()),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
