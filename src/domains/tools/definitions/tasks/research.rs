//! Research tool definition.
//!
//! Wraps `task-master research`, an AI-backed query that can pull in
//! existing tasks as context.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::domains::tools::arguments::{object_schema, optional_text, parse_arguments, require_positional};
use crate::domains::tools::error::ToolResult;
use crate::domains::tools::runner::CommandRunner;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the research tool.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskResearchParams {
    /// The research query.
    #[serde(default)]
    pub prompt: Option<String>,

    /// Comma-separated task IDs whose content is passed as context.
    #[serde(default)]
    pub task_ids: Option<String>,

    /// Additional free-text context.
    #[serde(default)]
    pub context: Option<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Research tool - runs a research query with project context.
pub struct TaskResearchTool;

impl TaskResearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "task_master_research";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Perform AI-powered research queries with project context";

    /// Build the `task-master` argument vector.
    ///
    /// The query is a positional argument; task IDs and context use the
    /// short `-i=` / `-c=` flags.
    pub fn build_args(params: &TaskResearchParams) -> ToolResult<Vec<String>> {
        let prompt = require_positional(&params.prompt, "prompt")?;

        let mut args = vec!["research".to_string(), prompt.to_string()];
        if let Some(task_ids) = optional_text(&params.task_ids) {
            args.push(format!("-i={}", task_ids));
        }
        if let Some(context) = optional_text(&params.context) {
            args.push(format!("-c={}", context));
        }
        Ok(args)
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(arguments: JsonObject, runner: &dyn CommandRunner) -> ToolResult<String> {
        let params: TaskResearchParams = parse_arguments(arguments)?;
        let args = Self::build_args(&params)?;
        info!("Research tool called: task_ids={:?}", params.task_ids);
        runner.run(&args).await
    }

    pub fn input_schema() -> JsonObject {
        object_schema(
            json!({
                "prompt": {
                    "type": "string",
                    "description": "Research query",
                    "required": true
                },
                "task_ids": {
                    "type": "string",
                    "description": "Comma-separated task IDs for context"
                },
                "context": {
                    "type": "string",
                    "description": "Additional context for the research"
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
