//! MCP Server implementation.
//!
//! This module contains the request dispatcher shared by every transport.
//! A transport hands it one raw message at a time and writes back whatever
//! reply it produces; the dispatcher itself holds no per-session state, so
//! any number of messages can be in flight at once.
//!
//! ## Routing
//!
//! - `initialize` / `ping` are answered directly.
//! - `tools/list` returns the static tool registry.
//! - `tools/call` is delegated to [`ToolRegistry::call_tool`].
//! - Notifications never get a reply.

use rmcp::model::Content;
use serde_json::{Value, json};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, error, info, instrument, warn};

use super::config::Config;
use super::protocol::{
    CallToolParams, JsonRpcRequest, JsonRpcResponse, extract_id, initialize_result,
};
use crate::domains::tools::ToolRegistry;

/// Prefix of every error message produced by a failed tool call.
pub const ERROR_PREFIX: &str = "Task Master MCP Error: ";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool catalogue and the runner backing it.
    registry: ToolRegistry,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let registry = ToolRegistry::new(&config);
        Self::with_registry(config, registry)
    }

    /// Create a server around an existing registry.
    pub fn with_registry(config: Config, registry: ToolRegistry) -> Self {
        Self {
            config: Arc::new(config),
            registry,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// The unsolicited message written when a session opens.
    pub fn initialization_message(&self) -> JsonRpcResponse {
        JsonRpcResponse::initialization(&self.config.server)
    }

    /// List all available tools as wire descriptors.
    pub fn list_tools(&self) -> Vec<Value> {
        self.registry
            .list_tools()
            .iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Handle one raw message. A panic while handling it becomes an
    /// internal-error reply instead of taking the session down.
    pub async fn dispatch(&self, raw: &str) -> Option<JsonRpcResponse> {
        match AssertUnwindSafe(self.handle_line(raw)).catch_unwind().await {
            Ok(reply) => reply,
            Err(_) => {
                error!("Request handler panicked");
                Some(JsonRpcResponse::internal_error(
                    Some(extract_id(raw)),
                    format!("{}internal error", ERROR_PREFIX),
                ))
            }
        }
    }

    /// Decode and handle one raw message.
    pub async fn handle_line(&self, raw: &str) -> Option<JsonRpcResponse> {
        match JsonRpcRequest::decode(raw) {
            Ok(request) => self.handle_request(request).await,
            Err(reply) => {
                warn!("Rejected malformed message");
                Some(reply)
            }
        }
    }

    /// Route a decoded request.
    #[instrument(skip(self, request), fields(method = %request.method))]
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let is_notification = request.is_notification();
        let id = request.id.clone();

        let response = match request.method.as_str() {
            "initialize" => {
                info!("Client initialized");
                JsonRpcResponse::success(id, initialize_result(&self.config.server))
            }
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": self.list_tools() })),
            "tools/call" => self.handle_tools_call(id, request.params).await,
            method if is_notification => {
                debug!("Notification: {}", method);
                return None;
            }
            method => {
                warn!("Unknown method: {}", method);
                JsonRpcResponse::method_not_found(id, method)
            }
        };

        if is_notification {
            debug!("Dropping reply to notification");
            return None;
        }
        Some(response)
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params = match params.map(serde_json::from_value::<CallToolParams>).transpose() {
            Ok(Some(params)) => params,
            Ok(None) => return JsonRpcResponse::invalid_params(id, "Missing params"),
            Err(e) => {
                return JsonRpcResponse::invalid_params(id, format!("Invalid params: {}", e));
            }
        };

        let arguments = params.arguments.unwrap_or_default();
        match self.registry.call_tool(&params.name, arguments).await {
            Ok(text) => JsonRpcResponse::success(id, json!({ "content": [Content::text(text)] })),
            Err(e) => {
                warn!(tool = %params.name, kind = ?e.kind(), "Tool call failed: {}", e);
                JsonRpcResponse::error(id, e.rpc_code(), format!("{}{}", ERROR_PREFIX, e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::protocol::{INVALID_PARAMS, INTERNAL_ERROR, METHOD_NOT_FOUND, PARSE_ERROR};
    use crate::domains::tools::runner::testing::RecordingRunner;
    use crate::domains::tools::{CommandRunner, ToolError, ToolResult};
    use std::time::Duration;

    fn server_with(runner: Arc<dyn CommandRunner>) -> McpServer {
        McpServer::with_registry(Config::default(), ToolRegistry::with_runner(runner))
    }

    fn result_text(reply: &JsonRpcResponse) -> &str {
        reply.result.as_ref().unwrap()["content"][0]["text"]
            .as_str()
            .unwrap()
    }

    #[tokio::test]
    async fn test_tools_list_matches_registry() {
        let server = server_with(Arc::new(RecordingRunner::echo()));
        let reply = server
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#)
            .await
            .unwrap();

        let tools = reply.result.unwrap()["tools"].as_array().unwrap().clone();
        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(names, ToolRegistry::with_runner(Arc::new(RecordingRunner::echo())).tool_names());
        for (wire, tool) in tools.iter().zip(ToolRegistry::get_all_tools()) {
            assert_eq!(wire["description"], json!(tool.description));
            assert_eq!(wire["inputSchema"], json!(tool.input_schema));
        }
    }

    #[tokio::test]
    async fn test_tools_call_wraps_output_as_text() {
        let runner = Arc::new(RecordingRunner::echo());
        let server = server_with(runner.clone());
        let reply = server
            .handle_line(
                r#"{"jsonrpc":"2.0","id":"a","method":"tools/call","params":{"name":"task_master_show","arguments":{"id":"4"}}}"#,
            )
            .await
            .unwrap();

        assert_eq!(reply.id, Some(json!("a")));
        assert_eq!(result_text(&reply), "show 4");
        assert_eq!(reply.result.as_ref().unwrap()["content"][0]["type"], "text");
        assert_eq!(runner.calls(), vec![vec!["show".to_string(), "4".to_string()]]);
    }

    #[tokio::test]
    async fn test_missing_argument_never_spawns() {
        let runner = Arc::new(RecordingRunner::echo());
        let server = server_with(runner.clone());
        let reply = server
            .handle_line(
                r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"task_master_set_status","arguments":{"id":"1"}}}"#,
            )
            .await
            .unwrap();

        let error = reply.error.unwrap();
        assert_eq!(error.code, INVALID_PARAMS);
        assert!(error.message.starts_with(ERROR_PREFIX));
        assert!(error.message.contains("status"));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let server = server_with(Arc::new(RecordingRunner::echo()));
        let reply = server
            .handle_line(
                r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"task_master_delete_everything"}}"#,
            )
            .await
            .unwrap();

        let error = reply.error.unwrap();
        assert_eq!(error.code, INVALID_PARAMS);
        assert_eq!(
            error.message,
            "Task Master MCP Error: Unknown tool: task_master_delete_everything"
        );
    }

    #[tokio::test]
    async fn test_external_failure_is_reported() {
        let runner = Arc::new(RecordingRunner::with_reply(|_| {
            Err(ToolError::ExternalFailure {
                command: "task-master next".to_string(),
                code: Some(1),
                stderr: "no tasks.json found\n".to_string(),
            })
        }));
        let server = server_with(runner);
        let reply = server
            .handle_line(
                r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"task_master_next","arguments":{}}}"#,
            )
            .await
            .unwrap();

        let error = reply.error.unwrap();
        assert_eq!(error.code, INTERNAL_ERROR);
        assert!(error.message.starts_with(ERROR_PREFIX));
        assert!(error.message.contains("no tasks.json found"));
    }

    #[tokio::test]
    async fn test_missing_params() {
        let server = server_with(Arc::new(RecordingRunner::echo()));
        let reply = server
            .handle_line(r#"{"jsonrpc":"2.0","id":5,"method":"tools/call"}"#)
            .await
            .unwrap();
        assert_eq!(reply.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_protocol_methods() {
        let server = server_with(Arc::new(RecordingRunner::echo()));

        let reply = server
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await
            .unwrap();
        assert_eq!(reply.result.unwrap()["serverInfo"]["name"], server.name());

        let reply = server
            .handle_line(r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#)
            .await
            .unwrap();
        assert_eq!(reply.result, Some(json!({})));

        let reply = server
            .handle_line(r#"{"jsonrpc":"2.0","id":3,"method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(reply.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_notifications_get_no_reply() {
        let server = server_with(Arc::new(RecordingRunner::echo()));
        assert!(
            server
                .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
                .await
                .is_none()
        );
        assert!(
            server
                .handle_line(r#"{"jsonrpc":"2.0","method":"tools/list"}"#)
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_null_id_request_is_answered() {
        let server = server_with(Arc::new(RecordingRunner::echo()));
        let reply = server
            .dispatch(r#"{"jsonrpc":"2.0","id":null,"method":"tools/list"}"#)
            .await
            .unwrap();
        assert_eq!(reply.id, Some(Value::Null));
        assert!(reply.result.is_some());

        let line = reply.to_line().unwrap();
        assert!(line.contains(r#""id":null"#));
    }

    #[tokio::test]
    async fn test_garbage_gets_null_id_reply() {
        let server = server_with(Arc::new(RecordingRunner::echo()));
        let reply = server.dispatch("this is not json").await.unwrap();
        assert_eq!(reply.id, Some(Value::Null));
        assert_eq!(reply.error.unwrap().code, PARSE_ERROR);
    }

    /// Sleeps for `id * 100ms` before answering with the id.
    struct SlowRunner;

    #[async_trait::async_trait]
    impl CommandRunner for SlowRunner {
        fn program(&self) -> &str {
            "task-master"
        }

        async fn run(&self, args: &[String]) -> ToolResult<String> {
            let id: u64 = args[1].parse().unwrap();
            tokio::time::sleep(Duration::from_millis(id * 100)).await;
            Ok(format!("task {}", id))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_calls_are_correlated() {
        let server = server_with(Arc::new(SlowRunner));
        let lines: Vec<String> = (1..=3)
            .rev()
            .map(|n| {
                format!(
                    r#"{{"jsonrpc":"2.0","id":{n},"method":"tools/call","params":{{"name":"task_master_show","arguments":{{"id":{n}}}}}}}"#
                )
            })
            .collect();

        let started = tokio::time::Instant::now();
        let replies = futures::future::join_all(lines.iter().map(|l| server.handle_line(l))).await;
        assert!(started.elapsed() < Duration::from_millis(600));

        for reply in replies {
            let reply = reply.unwrap();
            let id = reply.id.clone().unwrap();
            assert_eq!(result_text(&reply), format!("task {}", id));
        }
    }
}
