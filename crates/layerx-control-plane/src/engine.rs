//! Assignment and migration of tasks onto nodes.
//!
//! Both engines are stateless views over the inventory and the pools: they
//! validate the target node, then hand the batch to the pool set.

use tracing::{info, warn};

use layerx_core::{CoreError, NodeId, Task, TaskId};

use crate::inventory::ResourceInventory;
use crate::pool::TaskPoolSet;

/// Moves Pending tasks to Staging on a known node.
pub struct AssignmentEngine<'a> {
    inventory: &'a ResourceInventory,
    pools: &'a TaskPoolSet,
}

impl<'a> AssignmentEngine<'a> {
    pub fn new(inventory: &'a ResourceInventory, pools: &'a TaskPoolSet) -> Self {
        Self { inventory, pools }
    }

    /// Assign tasks to a node. Either every task moves or none does.
    pub async fn assign_tasks(
        &self,
        node_id: &NodeId,
        task_ids: &[TaskId],
    ) -> Result<Vec<Task>, CoreError> {
        ensure_node(self.inventory, node_id).await?;

        let staged = self.pools.assign(task_ids, node_id).await.map_err(|e| {
            warn!(node_id = %node_id, error = %e, "Assignment rejected");
            e
        })?;

        info!(node_id = %node_id, count = staged.len(), "Assignment recorded");
        Ok(staged)
    }
}

/// Rebinds Staging or Running tasks to another known node.
///
/// Only the bookkeeping moves: the call returns once the tasks are back in
/// Staging against the new node. Relocating the running work is up to the
/// executor layer, and callers observe completion by polling the staging
/// and running views.
pub struct MigrationEngine<'a> {
    inventory: &'a ResourceInventory,
    pools: &'a TaskPoolSet,
}

impl<'a> MigrationEngine<'a> {
    pub fn new(inventory: &'a ResourceInventory, pools: &'a TaskPoolSet) -> Self {
        Self { inventory, pools }
    }

    /// Migrate tasks to a node. Either every task moves or none does.
    pub async fn migrate_tasks(
        &self,
        node_id: &NodeId,
        task_ids: &[TaskId],
    ) -> Result<Vec<Task>, CoreError> {
        ensure_node(self.inventory, node_id).await?;

        let staged = self.pools.migrate(task_ids, node_id).await.map_err(|e| {
            warn!(node_id = %node_id, error = %e, "Migration rejected");
            e
        })?;

        info!(node_id = %node_id, count = staged.len(), "Migration recorded");
        Ok(staged)
    }
}

async fn ensure_node(inventory: &ResourceInventory, node_id: &NodeId) -> Result<(), CoreError> {
    if inventory.contains_node(node_id).await {
        Ok(())
    } else {
        Err(CoreError::NodeNotFound(node_id.clone()))
    }
}
