//! End-to-end session tests: a line-delimited session backed by a real
//! child process standing in for `task-master`.

#![cfg(all(unix, feature = "stdio"))]

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use task_master_mcp::core::transport::serve_lines;
use task_master_mcp::core::{Config, McpServer};
use task_master_mcp::domains::tools::{ProcessRunner, ToolRegistry};

/// Fake `task-master`: echoes its arguments, `show <id>` sleeps `0.<id>` seconds
/// first, and `set-status` fails with exit code 3.
const FAKE_TASK_MASTER: &str = r#"#!/bin/sh
case "$1" in
  show) sleep "0.$2" ;;
  set-status) echo "task not found" >&2; exit 3 ;;
esac
echo "$@"
"#;

fn install_fake(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("task-master");
    std::fs::write(&path, FAKE_TASK_MASTER).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn call(id: u64, tool: &str, arguments: Value) -> String {
    let mut line = json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": tool, "arguments": arguments }
    })
    .to_string();
    line.push('\n');
    line
}

struct Session {
    lines: tokio::io::Lines<BufReader<tokio::io::ReadHalf<tokio::io::DuplexStream>>>,
    writer: tokio::io::WriteHalf<tokio::io::DuplexStream>,
    _dir: TempDir,
}

impl Session {
    fn start() -> Self {
        let dir = TempDir::new().unwrap();
        let program = install_fake(&dir);
        let runner = ProcessRunner::new(program.to_string_lossy()).with_working_dir(dir.path());
        let server =
            McpServer::with_registry(Config::default(), ToolRegistry::with_runner(Arc::new(runner)));

        let (client, server_io) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server_io);
        tokio::spawn(serve_lines(server, server_read, server_write));

        let (client_read, writer) = tokio::io::split(client);
        Self {
            lines: BufReader::new(client_read).lines(),
            writer,
            _dir: dir,
        }
    }

    async fn send(&mut self, line: &str) {
        self.writer.write_all(line.as_bytes()).await.unwrap();
    }

    async fn recv(&mut self) -> Value {
        let line = self.lines.next_line().await.unwrap().unwrap();
        serde_json::from_str(&line).unwrap()
    }
}

#[tokio::test]
async fn test_session_announces_itself() {
    let mut session = Session::start();
    let init = session.recv().await;
    assert!(init.get("id").is_none());
    assert_eq!(init["result"]["serverInfo"]["name"], "task-master-mcp");
    assert_eq!(init["result"]["capabilities"], json!({ "tools": {} }));
}

#[tokio::test]
async fn test_tool_call_runs_child_process() {
    let mut session = Session::start();
    session.recv().await;

    session
        .send(&call(
            1,
            "task_master_add_task",
            json!({ "prompt": "Write docs; rm -rf /", "priority": "high" }),
        ))
        .await;
    let reply = session.recv().await;
    assert_eq!(reply["id"], 1);
    assert_eq!(
        reply["result"]["content"][0]["text"],
        "add-task --prompt=Write docs; rm -rf / --priority=high\n"
    );
}

#[tokio::test]
async fn test_nonzero_exit_becomes_error_reply() {
    let mut session = Session::start();
    session.recv().await;

    session
        .send(&call(
            7,
            "task_master_set_status",
            json!({ "id": "99", "status": "done" }),
        ))
        .await;
    let reply = session.recv().await;
    assert_eq!(reply["id"], 7);
    assert_eq!(reply["error"]["code"], -32603);
    let message = reply["error"]["message"].as_str().unwrap();
    assert!(message.starts_with("Task Master MCP Error: "));
    assert!(message.contains("code 3"));
    assert!(message.contains("task not found"));
}

#[tokio::test]
async fn test_slow_call_does_not_block_later_requests() {
    let mut session = Session::start();
    session.recv().await;

    session.send(&call(1, "task_master_show", json!({ "id": 5 }))).await;
    session
        .send("{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/list\"}\n")
        .await;
    session.send(&call(3, "task_master_show", json!({ "id": 1 }))).await;

    let mut order = Vec::new();
    for _ in 0..3 {
        let reply = session.recv().await;
        order.push(reply["id"].as_u64().unwrap());
        if reply["id"] == 1 {
            assert_eq!(reply["result"]["content"][0]["text"], "show 5\n");
        }
        if reply["id"] == 3 {
            assert_eq!(reply["result"]["content"][0]["text"], "show 1\n");
        }
    }
    assert_eq!(order.last(), Some(&1));
    order.sort();
    assert_eq!(order, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_in_process_tools_need_no_binary() {
    let mut session = Session::start();
    session.recv().await;

    session
        .send(&call(
            4,
            "task_master_activate_patterns",
            json!({ "project_type": "python", "intensity": "minimal" }),
        ))
        .await;
    let reply = session.recv().await;
    let text = reply["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("MINIMAL"));
}
