//! Wire types exchanged with the control plane.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use layerx_core::{NodeId, PoolKind, Task, TaskId, TaskState};

/// Request body for assign and migrate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPlacementRequest {
    pub node_id: NodeId,
    pub task_ids: Vec<TaskId>,
}

/// Result of pushing a status update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdateResponse {
    /// `unknown`, `unchanged`, `moved` or `terminated`.
    pub outcome: String,
    pub pool: Option<PoolKind>,
}

/// Result of reporting a node as lost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeLostResponse {
    pub node_id: NodeId,
    pub task_ids: Vec<TaskId>,
}

/// A task that left the pools on a terminal status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminatedTask {
    pub task: Task,
    pub state: TaskState,
    pub terminated_at: DateTime<Utc>,
}

/// Error body returned by the control plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}
