//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The capability list advertised to clients (built once, never mutated)
//! - Dispatch of tool calls by name to the subprocess or in-process executors

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use tracing::{info, instrument, warn};

use crate::core::config::Config;

use super::definitions::{
    ActivatePatternsTool, CreateAgentTool, TaskAddTool, TaskExpandTool, TaskListTool,
    TaskNextTool, TaskResearchTool, TaskSetStatusTool, TaskShowTool,
};
use super::error::{ToolError, ToolResult};
use super::runner::{CommandRunner, ProcessRunner};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// This struct provides a central point for:
/// - Listing all available tools
/// - Dispatching tool calls to their executor
#[derive(Clone)]
pub struct ToolRegistry {
    tools: Arc<[Tool]>,
    runner: Arc<dyn CommandRunner>,
}

impl ToolRegistry {
    /// Create a registry whose subprocess tools spawn the configured command.
    pub fn new(config: &Config) -> Self {
        Self::with_runner(Arc::new(ProcessRunner::from_config(&config.task_master)))
    }

    /// Create a registry with a custom command runner.
    pub fn with_runner(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            tools: Self::get_all_tools().into(),
            runner,
        }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            TaskListTool::NAME,
            TaskNextTool::NAME,
            TaskShowTool::NAME,
            TaskAddTool::NAME,
            TaskSetStatusTool::NAME,
            TaskExpandTool::NAME,
            TaskResearchTool::NAME,
            CreateAgentTool::NAME,
            ActivatePatternsTool::NAME,
        ]
    }

    /// Build all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            TaskListTool::to_tool(),
            TaskNextTool::to_tool(),
            TaskShowTool::to_tool(),
            TaskAddTool::to_tool(),
            TaskSetStatusTool::to_tool(),
            TaskExpandTool::to_tool(),
            TaskResearchTool::to_tool(),
            CreateAgentTool::to_tool(),
            ActivatePatternsTool::to_tool(),
        ]
    }

    /// The capability list, as built when the registry was created.
    pub fn list_tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Dispatch a tool call to the appropriate executor.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(&self, name: &str, arguments: JsonObject) -> ToolResult<String> {
        info!("Calling tool");
        let runner = self.runner.as_ref();
        match name {
            TaskListTool::NAME => TaskListTool::execute(arguments, runner).await,
            TaskNextTool::NAME => TaskNextTool::execute(arguments, runner).await,
            TaskShowTool::NAME => TaskShowTool::execute(arguments, runner).await,
            TaskAddTool::NAME => TaskAddTool::execute(arguments, runner).await,
            TaskSetStatusTool::NAME => TaskSetStatusTool::execute(arguments, runner).await,
            TaskExpandTool::NAME => TaskExpandTool::execute(arguments, runner).await,
            TaskResearchTool::NAME => TaskResearchTool::execute(arguments, runner).await,
            CreateAgentTool::NAME => CreateAgentTool::execute(arguments),
            ActivatePatternsTool::NAME => ActivatePatternsTool::execute(arguments),
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::ToolErrorKind;
    use crate::domains::tools::runner::testing::RecordingRunner;
    use serde_json::json;

    fn recording_registry() -> (ToolRegistry, Arc<RecordingRunner>) {
        let runner = Arc::new(RecordingRunner::echo());
        (ToolRegistry::with_runner(runner.clone()), runner)
    }

    fn args(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_registry_tool_names() {
        let (registry, _) = recording_registry();
        let names = registry.tool_names();
        assert_eq!(names.len(), 9);
        assert!(names.contains(&"task_master_list"));
        assert!(names.contains(&"task_master_next"));
        assert!(names.contains(&"task_master_show"));
        assert!(names.contains(&"task_master_add_task"));
        assert!(names.contains(&"task_master_set_status"));
        assert!(names.contains(&"task_master_expand"));
        assert!(names.contains(&"task_master_research"));
        assert!(names.contains(&"task_master_create_agent"));
        assert!(names.contains(&"task_master_activate_patterns"));
    }

    #[test]
    fn test_names_match_descriptors() {
        let (registry, _) = recording_registry();
        let listed: Vec<_> = registry
            .list_tools()
            .iter()
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(listed, registry.tool_names());
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let (registry, runner) = recording_registry();
        let err = registry
            .call_tool("task_master_delete_everything", JsonObject::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ToolErrorKind::UnknownTool);
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_subprocess_tools_reach_runner() {
        let (registry, runner) = recording_registry();
        registry
            .call_tool("task_master_show", args(json!({ "id": "2" })))
            .await
            .unwrap();
        registry
            .call_tool("task_master_next", JsonObject::new())
            .await
            .unwrap();
        assert_eq!(runner.calls(), vec![vec!["show", "2"], vec!["next"]]);
    }

    #[tokio::test]
    async fn test_in_process_tools_never_spawn() {
        let (registry, runner) = recording_registry();
        let agent = registry
            .call_tool("task_master_create_agent", args(json!({ "agent_type": "react" })))
            .await
            .unwrap();
        assert!(agent.contains("React/Frontend Specialist"));

        let patterns = registry
            .call_tool(
                "task_master_activate_patterns",
                args(json!({ "project_type": "python", "intensity": "high" })),
            )
            .await
            .unwrap();
        assert!(patterns.contains("Slot-Machine-Methodology"));

        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_required_argument_for_every_tool() {
        let (registry, runner) = recording_registry();
        for tool in registry.list_tools() {
            let required = tool
                .input_schema
                .get("required")
                .and_then(|r| r.as_array())
                .cloned()
                .unwrap_or_default();
            if required.is_empty() {
                continue;
            }
            let err = registry
                .call_tool(&tool.name, JsonObject::new())
                .await
                .unwrap_err();
            assert_eq!(
                err.kind(),
                ToolErrorKind::MissingRequiredArgument,
                "tool {}",
                tool.name
            );
        }
        assert!(runner.calls().is_empty());
    }
}
