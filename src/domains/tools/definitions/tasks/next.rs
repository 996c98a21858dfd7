//! Next-task tool definition.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde_json::json;
use tracing::{info, instrument};

use crate::domains::tools::arguments::object_schema;
use crate::domains::tools::error::ToolResult;
use crate::domains::tools::runner::CommandRunner;

/// Next tool - asks `task-master` which task to pick up based on dependencies and status.
pub struct TaskNextTool;

impl TaskNextTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "task_master_next";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Show the next task to work on based on dependencies and status";

    pub fn build_args() -> Vec<String> {
        vec!["next".to_string()]
    }

    /// Execute the tool logic. The tool takes no arguments; any supplied are ignored.
    #[instrument(skip_all)]
    pub async fn execute(_arguments: JsonObject, runner: &dyn CommandRunner) -> ToolResult<String> {
        info!("Next tool called");
        runner.run(&Self::build_args()).await
    }

    pub fn input_schema() -> JsonObject {
        object_schema(json!({}), &[])
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
