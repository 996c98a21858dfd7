//! Set-status tool definition.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use super::common::{TaskStatus, flag};
use crate::domains::tools::arguments::{object_schema, parse_arguments, require_text, string_or_number};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::runner::CommandRunner;

/// Parameters for the set-status tool.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskSetStatusParams {
    /// Task ID (or comma-separated IDs) to update.
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,

    #[serde(default)]
    pub status: Option<TaskStatus>,
}

/// Set-status tool - moves a task to a new lifecycle state.
pub struct TaskSetStatusTool;

impl TaskSetStatusTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "task_master_set_status";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Update task status";

    /// Build the `task-master` argument vector. Both `id` and `status` are mandatory.
    pub fn build_args(params: &TaskSetStatusParams) -> ToolResult<Vec<String>> {
        let id = require_text(&params.id, "id")?;
        let status = params.status.ok_or(ToolError::missing("status"))?;
        Ok(vec![
            "set-status".to_string(),
            flag("id", id),
            flag("status", status.as_str()),
        ])
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(arguments: JsonObject, runner: &dyn CommandRunner) -> ToolResult<String> {
        let params: TaskSetStatusParams = parse_arguments(arguments)?;
        let args = Self::build_args(&params)?;
        info!(
            "Set-status tool called: id={:?} status={:?}",
            params.id, params.status
        );
        runner.run(&args).await
    }

    pub fn input_schema() -> JsonObject {
        object_schema(
            json!({
                "id": {
                    "type": "string",
                    "description": "Task ID to update",
                    "required": true
                },
                "status": {
                    "type": "string",
                    "description": "New status for the task",
                    "enum": TaskStatus::schema_enum(),
                    "required": true
                }
            }),
            &["id", "status"],
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
