//! Execution states and point-in-time task status reports.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{NodeId, TaskId};

/// Execution state reported by the executor layer for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    /// Executor accepted the task and is preparing it.
    Staging,
    /// Executor is launching the task.
    Starting,
    /// Task is executing.
    Running,
    /// Task exited successfully.
    Finished,
    /// Task exited with an error.
    Failed,
    /// Task was killed.
    Killed,
    /// Task was lost by the executor.
    Lost,
    /// Task could not be launched.
    Error,
    /// The node running the task is unreachable; the task may still be alive.
    Unreachable,
}

/// What a reported state does to a task's pool membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEffect {
    /// No pool change.
    Stay,
    /// Move to the Running pool.
    Run,
    /// Remove from every pool.
    Terminate,
}

impl TaskState {
    /// Returns true if the task will never run again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Finished | Self::Failed | Self::Killed | Self::Lost | Self::Error
        )
    }

    /// Pool effect of this state.
    pub fn effect(&self) -> StatusEffect {
        match self {
            Self::Running => StatusEffect::Run,
            Self::Staging | Self::Starting | Self::Unreachable => StatusEffect::Stay,
            _ => StatusEffect::Terminate,
        }
    }
}

/// A point-in-time status report for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatus {
    /// Task the report is about.
    pub task_id: TaskId,

    /// Reported execution state.
    pub state: TaskState,

    /// Human-readable detail.
    #[serde(default)]
    pub message: Option<String>,

    /// Node that produced the report, if known.
    #[serde(default)]
    pub node_id: Option<NodeId>,

    /// Free-form metadata.
    #[serde(default)]
    pub metadata: HashMap<String, String>,

    /// Unix timestamp (milliseconds) of the report.
    #[serde(default)]
    pub timestamp_ms: i64,
}

impl TaskStatus {
    /// Create a new status report stamped with the current time.
    pub fn new(task_id: impl Into<TaskId>, state: TaskState) -> Self {
        Self {
            task_id: task_id.into(),
            state,
            message: None,
            node_id: None,
            metadata: HashMap::new(),
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Create a Running report.
    pub fn running(task_id: impl Into<TaskId>) -> Self {
        Self::new(task_id, TaskState::Running)
    }

    /// Create a Finished report.
    pub fn finished(task_id: impl Into<TaskId>) -> Self {
        Self::new(task_id, TaskState::Finished)
    }

    /// Builder method to set the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Builder method to set the reporting node.
    pub fn with_node(mut self, node_id: impl Into<NodeId>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    /// Builder method to add a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effects() {
        assert_eq!(TaskState::Running.effect(), StatusEffect::Run);
        assert_eq!(TaskState::Starting.effect(), StatusEffect::Stay);
        assert_eq!(TaskState::Unreachable.effect(), StatusEffect::Stay);
        for state in [
            TaskState::Finished,
            TaskState::Failed,
            TaskState::Killed,
            TaskState::Lost,
            TaskState::Error,
        ] {
            assert!(state.is_terminal());
            assert_eq!(state.effect(), StatusEffect::Terminate);
        }
    }

    #[test]
    fn test_status_builder() {
        let status = TaskStatus::running("t-1")
            .with_node("node-1")
            .with_message("started");
        assert_eq!(status.state, TaskState::Running);
        assert_eq!(status.node_id, Some(NodeId::new("node-1")));
        assert!(status.timestamp_ms > 0);
    }

    #[test]
    fn test_state_wire_format() {
        let status: TaskStatus =
            serde_json::from_str(r#"{"task_id":"t-1","state":"FINISHED"}"#).unwrap();
        assert_eq!(status.state, TaskState::Finished);
        assert!(status.message.is_none());
    }
}
