//! Brain interface - the scheduler-facing read/write surface.

use tracing::debug;

use layerx_core::{CoreError, Node, NodeId, Task, TaskId, TaskProvider, TaskStatus};

use crate::pool::TerminatedTask;
use crate::state::AppState;

/// Capability aggregation point for schedulers.
///
/// Reads are projections of the stores; the only side effect of a read is
/// that [`BrainService::get_status_updates`] drains the status queue.
pub struct BrainService<'a> {
    state: &'a AppState,
}

impl<'a> BrainService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn get_nodes(&self) -> Vec<Node> {
        self.state.inventory.get_nodes().await
    }

    /// Drain the queued status updates. Each update is returned once.
    pub async fn get_status_updates(&self) -> Vec<TaskStatus> {
        let updates = self.state.status_updates.drain().await;
        debug!(count = updates.len(), "Status updates drained");
        updates
    }

    pub async fn get_pending_tasks(&self) -> Vec<Task> {
        self.state.pools.list_pending().await
    }

    pub async fn get_staging_tasks(&self) -> Vec<Task> {
        self.state.pools.list_staging().await
    }

    pub async fn get_running_tasks(&self) -> Vec<Task> {
        self.state.pools.list_running().await
    }

    pub async fn get_terminal_tasks(&self) -> Vec<TerminatedTask> {
        self.state.pools.list_terminal().await
    }

    pub async fn get_task_providers(&self) -> Vec<TaskProvider> {
        self.state.providers.list().await
    }

    /// Bind Pending tasks to a node.
    pub async fn assign_tasks(
        &self,
        node_id: &NodeId,
        task_ids: &[TaskId],
    ) -> Result<Vec<Task>, CoreError> {
        self.state.assignment().assign_tasks(node_id, task_ids).await
    }

    /// Rebind Staging or Running tasks to another node.
    ///
    /// Returns once the bookkeeping is updated; poll the staging and
    /// running views to see the executor pick the tasks up.
    pub async fn migrate_tasks(
        &self,
        node_id: &NodeId,
        task_ids: &[TaskId],
    ) -> Result<Vec<Task>, CoreError> {
        self.state.migration().migrate_tasks(node_id, task_ids).await
    }
}
