//! Task detail tool definition.
//!
//! Wraps `task-master show <id>`.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::domains::tools::arguments::{object_schema, parse_arguments, require_positional, string_or_number};
use crate::domains::tools::error::ToolResult;
use crate::domains::tools::runner::CommandRunner;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the show tool.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskShowParams {
    /// Task ID to show details for (e.g. "3" or "3.1" for a subtask).
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Show tool - displays detailed information about a single task.
pub struct TaskShowTool;

impl TaskShowTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "task_master_show";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Display detailed information about a specific task";

    /// Build the `task-master` argument vector. Fails if `id` is missing.
    pub fn build_args(params: &TaskShowParams) -> ToolResult<Vec<String>> {
        let id = require_positional(&params.id, "id")?;
        Ok(vec!["show".to_string(), id.to_string()])
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(arguments: JsonObject, runner: &dyn CommandRunner) -> ToolResult<String> {
        let params: TaskShowParams = parse_arguments(arguments)?;
        let args = Self::build_args(&params)?;
        info!("Show tool called: id={}", args[1]);
        runner.run(&args).await
    }

    pub fn input_schema() -> JsonObject {
        object_schema(
            json!({
                "id": {
                    "type": "string",
                    "description": "Task ID to show details for",
                    "required": true
                }
            }),
            &["id"],
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
