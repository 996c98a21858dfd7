//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// MCP protocol revision announced to clients.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Default bound on a single external command invocation.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(300);

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// How the external task command is invoked.
    pub task_master: TaskMasterConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for the external task command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskMasterConfig {
    /// Program name or path, resolved through `PATH` like any other command.
    pub command: String,

    /// Working directory for the child process. Inherits ours when `None`.
    pub working_dir: Option<PathBuf>,

    /// Maximum run time of one invocation. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Read `MCP_LOG_LEVEL` and `MCP_LOG_TIMESTAMPS`.
    ///
    /// Never logs, so it can run before the subscriber is installed.
    pub fn from_env() -> Self {
        let mut logging = Self::default();
        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            logging.level = level;
        }
        if let Ok(flag) = std::env::var("MCP_LOG_TIMESTAMPS") {
            logging.with_timestamps = flag.to_lowercase() != "false" && flag != "0";
        }
        logging
    }
}

impl Default for TaskMasterConfig {
    fn default() -> Self {
        Self {
            command: "task-master".to_string(),
            working_dir: None,
            timeout: Some(DEFAULT_COMMAND_TIMEOUT),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "task-master-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
            task_master: TaskMasterConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_TASK_MASTER_COMMAND`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(command) = std::env::var("MCP_TASK_MASTER_COMMAND") {
            if command.trim().is_empty() {
                warn!("MCP_TASK_MASTER_COMMAND is empty, keeping default");
            } else {
                config.task_master.command = command;
            }
        }

        if let Ok(dir) = std::env::var("MCP_TASK_MASTER_CWD") {
            config.task_master.working_dir = Some(PathBuf::from(dir));
        }

        if let Ok(secs) = std::env::var("MCP_TASK_MASTER_TIMEOUT_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(0) => {
                    warn!("External command timeout disabled");
                    config.task_master.timeout = None;
                }
                Ok(secs) => config.task_master.timeout = Some(Duration::from_secs(secs)),
                Err(_) => warn!(
                    "Invalid MCP_TASK_MASTER_TIMEOUT_SECS '{}', using {}s",
                    secs,
                    DEFAULT_COMMAND_TIMEOUT.as_secs()
                ),
            }
        }

        config
    }

    /// Reject settings under which every subprocess-backed tool would fail.
    pub fn validate(&self) -> Result<()> {
        if self.task_master.command.trim().is_empty() {
            return Err(Error::config("task-master command must not be empty"));
        }
        if let Some(dir) = &self.task_master.working_dir {
            if !std::fs::metadata(dir)?.is_dir() {
                return Err(Error::config(format!(
                    "working directory {} is not a directory",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn clear_task_master_env() {
        unsafe {
            std::env::remove_var("MCP_TASK_MASTER_COMMAND");
            std::env::remove_var("MCP_TASK_MASTER_CWD");
            std::env::remove_var("MCP_TASK_MASTER_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.name, "task-master-mcp");
        assert_eq!(config.task_master.command, "task-master");
        assert_eq!(config.task_master.timeout, Some(DEFAULT_COMMAND_TIMEOUT));
        assert!(config.task_master.working_dir.is_none());
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        let file = tempfile::NamedTempFile::new().unwrap();
        config.task_master.working_dir = Some(file.path().to_path_buf());
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.task_master.working_dir = Some(PathBuf::from("/definitely/not/here"));
        assert!(matches!(config.validate(), Err(Error::Io(_))));

        config.task_master.working_dir = None;
        config.task_master.command = String::new();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_task_master_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        let dir = tempfile::TempDir::new().unwrap();
        unsafe {
            std::env::set_var("MCP_TASK_MASTER_COMMAND", "/opt/bin/task-master");
            std::env::set_var("MCP_TASK_MASTER_CWD", dir.path());
            std::env::set_var("MCP_TASK_MASTER_TIMEOUT_SECS", "42");
        }
        let config = Config::from_env();
        assert_eq!(config.task_master.command, "/opt/bin/task-master");
        assert_eq!(config.task_master.working_dir.as_deref(), Some(dir.path()));
        assert_eq!(config.task_master.timeout, Some(Duration::from_secs(42)));
        clear_task_master_env();
    }

    #[test]
    fn test_zero_timeout_disables_bound() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TASK_MASTER_TIMEOUT_SECS", "0");
        }
        let config = Config::from_env();
        assert_eq!(config.task_master.timeout, None);
        clear_task_master_env();
    }

    #[test]
    fn test_logging_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_LOG_LEVEL", "debug");
            std::env::set_var("MCP_LOG_TIMESTAMPS", "0");
        }
        let logging = LoggingConfig::from_env();
        assert_eq!(logging.level, "debug");
        assert!(!logging.with_timestamps);
        unsafe {
            std::env::remove_var("MCP_LOG_LEVEL");
            std::env::remove_var("MCP_LOG_TIMESTAMPS");
        }
        let logging = LoggingConfig::from_env();
        assert_eq!(logging.level, "info");
        assert!(logging.with_timestamps);
    }

    #[test]
    fn test_invalid_timeout_keeps_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TASK_MASTER_TIMEOUT_SECS", "soon");
            std::env::set_var("MCP_TASK_MASTER_COMMAND", "  ");
        }
        let config = Config::from_env();
        assert_eq!(config.task_master.timeout, Some(DEFAULT_COMMAND_TIMEOUT));
        assert_eq!(config.task_master.command, "task-master");
        clear_task_master_env();
    }
}
