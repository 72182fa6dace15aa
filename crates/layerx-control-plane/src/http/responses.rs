//! HTTP request and response types.

use serde::{Deserialize, Serialize};

use layerx_core::{NodeId, PoolKind, TaskId};

use crate::pool::StatusOutcome;

// ============================================================================
// Brain types
// ============================================================================

/// Request body for assign and migrate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPlacementRequest {
    /// Target node.
    pub node_id: NodeId,

    /// Tasks to place on the node.
    pub task_ids: Vec<TaskId>,
}

// ============================================================================
// Resource provider types
// ============================================================================

/// Response for a submitted status update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdateResponse {
    /// `unknown`, `unchanged`, `moved` or `terminated`.
    pub outcome: String,

    /// Pool the task is in after the update, if any.
    pub pool: Option<PoolKind>,
}

impl From<StatusOutcome> for StatusUpdateResponse {
    fn from(outcome: StatusOutcome) -> Self {
        let (name, pool) = match outcome {
            StatusOutcome::Unknown => ("unknown", None),
            StatusOutcome::Unchanged(pool) => ("unchanged", Some(pool)),
            StatusOutcome::Moved { to, .. } => ("moved", Some(to)),
            StatusOutcome::Terminated { .. } => ("terminated", None),
        };
        Self {
            outcome: name.to_string(),
            pool,
        }
    }
}

/// Response for a node loss report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeLostResponse {
    pub node_id: NodeId,

    /// Staging and Running tasks that were bound to the node.
    pub task_ids: Vec<TaskId>,
}

// ============================================================================
// Error types
// ============================================================================

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,

    /// Machine-readable error kind, e.g. `NodeNotFound`.
    pub kind: String,
}
