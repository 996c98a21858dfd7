//! External command execution.
//!
//! Subprocess-backed tools hand a finished argument vector to a
//! [`CommandRunner`]. The production runner spawns the configured binary
//! directly (no intermediate shell), waits for it to exit, and maps the
//! outcome to a [`ToolResult`]. Tests substitute a recording double.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, instrument, warn};

use super::error::{ToolError, ToolResult};
use crate::core::config::TaskMasterConfig;

/// Runs the external task command with a given argument vector.
#[async_trait::async_trait]
pub trait CommandRunner: Send + Sync {
    /// Name of the program being invoked (used in messages).
    fn program(&self) -> &str;

    /// Run the program with `args` and return its standard output.
    async fn run(&self, args: &[String]) -> ToolResult<String>;
}

/// Spawns the external command as a child process.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: String,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Create a runner for `program` with no working directory override and no time bound.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            working_dir: None,
            timeout: None,
        }
    }

    /// Create a runner from the task-master section of the configuration.
    pub fn from_config(config: &TaskMasterConfig) -> Self {
        Self {
            program: config.command.clone(),
            working_dir: config.working_dir.clone(),
            timeout: config.timeout,
        }
    }

    /// Run the child inside `dir`.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Kill the child if it has not exited after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait::async_trait]
impl CommandRunner for ProcessRunner {
    fn program(&self) -> &str {
        &self.program
    }

    #[instrument(skip(self), fields(program = %self.program))]
    async fn run(&self, args: &[String]) -> ToolResult<String> {
        debug!("Spawning external command");

        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let child = command.spawn().map_err(|source| {
            warn!("Failed to spawn {}: {}", self.program, source);
            ToolError::SpawnFailed {
                command: self.program.clone(),
                source,
            }
        })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| {
                    warn!("{} timed out after {:?}", self.program, limit);
                    ToolError::Timeout {
                        command: self.program.clone(),
                        after: limit,
                    }
                })?,
            None => child.wait_with_output().await,
        }
        .map_err(|e| {
            ToolError::internal(format!("Failed to collect output of {}: {}", self.program, e))
        })?;

        interpret_output(
            &self.program,
            output.status.code(),
            &output.stdout,
            &output.stderr,
        )
    }
}

/// Turn a finished process into a tool result.
///
/// Exit status 0 yields the captured stdout verbatim; anything else
/// (including death by signal, which has no code) is an external failure
/// carrying the captured stderr.
pub fn interpret_output(
    program: &str,
    code: Option<i32>,
    stdout: &[u8],
    stderr: &[u8],
) -> ToolResult<String> {
    match code {
        Some(0) => Ok(String::from_utf8_lossy(stdout).into_owned()),
        _ => {
            let stderr = String::from_utf8_lossy(stderr).into_owned();
            warn!(?code, "{} exited unsuccessfully", program);
            Err(ToolError::ExternalFailure {
                command: program.to_string(),
                code,
                stderr,
            })
        }
    }
}

/// Test doubles for [`CommandRunner`].
#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Records every argument vector it is asked to run and answers with a canned reply.
    pub struct RecordingRunner {
        calls: Mutex<Vec<Vec<String>>>,
        reply: Box<dyn Fn(&[String]) -> ToolResult<String> + Send + Sync>,
    }

    impl RecordingRunner {
        /// Echo the argument vector back, joined by spaces.
        pub fn echo() -> Self {
            Self::with_reply(|args| Ok(args.join(" ")))
        }

        pub fn with_reply(
            reply: impl Fn(&[String]) -> ToolResult<String> + Send + Sync + 'static,
        ) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply: Box::new(reply),
            }
        }

        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl CommandRunner for RecordingRunner {
        fn program(&self) -> &str {
            "task-master"
        }

        async fn run(&self, args: &[String]) -> ToolResult<String> {
            self.calls.lock().unwrap().push(args.to_vec());
            (self.reply)(args)
        }
    }
}
