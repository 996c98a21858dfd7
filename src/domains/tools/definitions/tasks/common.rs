//! Shared vocabulary for the task-master subprocess tools.

use serde::Deserialize;
use serde_json::{Value, json};

/// Task lifecycle states understood by `task-master`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    Done,
    InProgress,
    Review,
    Deferred,
    Cancelled,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 6] = [
        TaskStatus::Pending,
        TaskStatus::Done,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Deferred,
        TaskStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Done => "done",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Review => "review",
            TaskStatus::Deferred => "deferred",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    /// The `enum` array advertised in schemas.
    pub fn schema_enum() -> Value {
        json!(Self::ALL.iter().map(|s| s.as_str()).collect::<Vec<_>>())
    }
}

/// Task priorities understood by `task-master add-task`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 4] = [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Critical => "critical",
        }
    }

    pub fn schema_enum() -> Value {
        json!(Self::ALL.iter().map(|p| p.as_str()).collect::<Vec<_>>())
    }
}

/// Format a `--name=value` flag.
///
/// The value stays part of the same argv element, so spaces or quotes in it
/// reach the external command untouched.
pub fn flag(name: &str, value: impl std::fmt::Display) -> String {
    format!("--{}={}", name, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_names_round_trip_through_serde() {
        for status in TaskStatus::ALL {
            let parsed: TaskStatus = serde_json::from_value(json!(status.as_str())).unwrap();
            assert_eq!(parsed, status);
        }
        assert!(serde_json::from_value::<TaskStatus>(json!("in_progress")).is_err());
    }

    #[test]
    fn test_schema_enums() {
        assert_eq!(
            TaskStatus::schema_enum(),
            json!(["pending", "done", "in-progress", "review", "deferred", "cancelled"])
        );
        assert_eq!(
            TaskPriority::schema_enum(),
            json!(["low", "medium", "high", "critical"])
        );
    }

    #[test]
    fn test_flag_keeps_value_intact() {
        assert_eq!(flag("prompt", "fix \"login\" bug"), "--prompt=fix \"login\" bug");
        assert_eq!(flag("num", 5), "--num=5");
    }
}
