//! Add-task tool definition.
//!
//! Wraps `task-master add-task`, which uses AI to turn a prompt into a task.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use super::common::{TaskPriority, flag};
use crate::domains::tools::arguments::{object_schema, optional_text, parse_arguments, require_text};
use crate::domains::tools::error::ToolResult;
use crate::domains::tools::runner::CommandRunner;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the add-task tool.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskAddParams {
    /// Free-text description of the task.
    #[serde(default)]
    pub prompt: Option<String>,

    /// Comma-separated IDs of tasks this one depends on.
    #[serde(default)]
    pub dependencies: Option<String>,

    #[serde(default)]
    pub priority: Option<TaskPriority>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Add-task tool - creates a new task from a prompt.
pub struct TaskAddTool;

impl TaskAddTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "task_master_add_task";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Add a new task using AI";

    /// Build the `task-master` argument vector.
    ///
    /// The prompt is carried whole inside `--prompt=...`; no quoting is added.
    pub fn build_args(params: &TaskAddParams) -> ToolResult<Vec<String>> {
        let prompt = require_text(&params.prompt, "prompt")?;

        let mut args = vec!["add-task".to_string(), flag("prompt", prompt)];
        if let Some(dependencies) = optional_text(&params.dependencies) {
            args.push(flag("dependencies", dependencies));
        }
        if let Some(priority) = params.priority {
            args.push(flag("priority", priority.as_str()));
        }
        Ok(args)
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(arguments: JsonObject, runner: &dyn CommandRunner) -> ToolResult<String> {
        let params: TaskAddParams = parse_arguments(arguments)?;
        let args = Self::build_args(&params)?;
        info!("Add-task tool called: priority={:?}", params.priority);
        runner.run(&args).await
    }

    pub fn input_schema() -> JsonObject {
        object_schema(
            json!({
                "prompt": {
                    "type": "string",
                    "description": "Description of the task to add",
                    "required": true
                },
                "dependencies": {
                    "type": "string",
                    "description": "Comma-separated list of task IDs this task depends on"
                },
                "priority": {
                    "type": "string",
                    "description": "Task priority (low, medium, high, critical)",
                    "enum": TaskPriority::schema_enum()
                }
            }),
            &["prompt"],
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
