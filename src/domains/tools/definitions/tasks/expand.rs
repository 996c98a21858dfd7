//! Expand tool definition.
//!
//! Wraps `task-master expand`, which breaks a task down into subtasks.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde::Deserialize;
use serde_json::{Number, json};
use tracing::{info, instrument};

use super::common::flag;
use crate::domains::tools::arguments::{object_schema, parse_arguments, require_text, string_or_number};
use crate::domains::tools::error::ToolResult;
use crate::domains::tools::runner::CommandRunner;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the expand tool.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskExpandParams {
    /// Task ID to expand.
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,

    /// Number of subtasks to generate. `task-master` picks its own default when omitted.
    #[serde(default)]
    pub num: Option<Number>,

    /// Ask the research model to inform the expansion.
    #[serde(default)]
    pub research: Option<bool>,
}

/// The subtask count as a positive integer, if it is one. `5.0` counts as `5`.
fn positive_count(num: &Number) -> Option<u64> {
    if let Some(n) = num.as_u64() {
        return (n > 0).then_some(n);
    }
    let f = num.as_f64()?;
    (f >= 1.0 && f.fract() == 0.0 && f <= u64::MAX as f64).then(|| f as u64)
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Expand tool - generates subtasks for a task.
pub struct TaskExpandTool;

impl TaskExpandTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "task_master_expand";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Break down a task into detailed subtasks using AI";

    /// Build the `task-master` argument vector.
    ///
    /// `--num` is only emitted for a positive integer count; any other number is skipped.
    pub fn build_args(params: &TaskExpandParams) -> ToolResult<Vec<String>> {
        let id = require_text(&params.id, "id")?;

        let mut args = vec!["expand".to_string(), flag("id", id)];
        if let Some(num) = params.num.as_ref().and_then(positive_count) {
            args.push(flag("num", num));
        }
        if params.research.unwrap_or(false) {
            args.push("--research".to_string());
        }
        Ok(args)
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(arguments: JsonObject, runner: &dyn CommandRunner) -> ToolResult<String> {
        let params: TaskExpandParams = parse_arguments(arguments)?;
        let args = Self::build_args(&params)?;
        info!("Expand tool called: id={:?} num={:?}", params.id, params.num);
        runner.run(&args).await
    }

    pub fn input_schema() -> JsonObject {
        object_schema(
            json!({
                "id": {
                    "type": "string",
                    "description": "Task ID to expand",
                    "required": true
                },
                "num": {
                    "type": "number",
                    "description": "Number of subtasks to generate (default: 5)"
                },
                "research": {
                    "type": "boolean",
                    "description": "Include AI research in expansion"
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
