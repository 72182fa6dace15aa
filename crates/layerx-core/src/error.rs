//! Core domain errors.

use thiserror::Error;

use crate::{NodeId, PoolKind, ProviderId, TaskId};

/// Core domain errors for LayerX.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Referenced node, task, provider or pool entry does not exist.
    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: String },

    /// Task submitted under a provider id that was never registered.
    #[error("Unknown task provider: {0}")]
    UnknownProvider(ProviderId),

    /// Task id already present in one of the pools.
    #[error("Duplicate task: {0} is already in the {1} pool")]
    DuplicateTask(TaskId, PoolKind),

    /// Task is not in the pool the operation requires.
    #[error("Invalid transition for task {task_id}: in {from}, expected {expected}")]
    InvalidTransition {
        task_id: TaskId,
        from: String,
        expected: String,
    },

    /// Provider id re-registered with a different source.
    #[error("Task provider {id} already registered with source '{existing}', got '{requested}'")]
    Conflict {
        id: ProviderId,
        existing: String,
        requested: String,
    },

    /// Assignment or migration target is not in the inventory.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Malformed input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`].
    pub fn not_found(what: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            what,
            id: id.to_string(),
        }
    }

    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NotFound",
            Self::UnknownProvider(_) => "UnknownProvider",
            Self::DuplicateTask(..) => "DuplicateTask",
            Self::InvalidTransition { .. } => "InvalidTransition",
            Self::Conflict { .. } => "Conflict",
            Self::NodeNotFound(_) => "NodeNotFound",
            Self::InvalidInput(_) => "InvalidInput",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = CoreError::not_found("Task", TaskId::new("t-1"));
        assert_eq!(err.to_string(), "Task not found: t-1");
        assert_eq!(err.kind(), "NotFound");
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = CoreError::InvalidTransition {
            task_id: TaskId::new("t-1"),
            from: PoolKind::Staging.to_string(),
            expected: PoolKind::Pending.to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid transition for task t-1: in STAGING, expected PENDING"
        );
    }
}
