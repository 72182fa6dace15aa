//! Resource provider interface.

use layerx_core::{CoreError, Node, NodeId, Resource, TaskId, TaskStatus};

use crate::pool::StatusOutcome;
use crate::state::AppState;

/// Interface used by resource providers to report capacity and task status.
pub struct ResourceProviderService<'a> {
    state: &'a AppState,
}

impl<'a> ResourceProviderService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Add a resource to its node, creating the node if needed.
    pub async fn submit_resource(&self, resource: Resource) -> Result<(), CoreError> {
        self.state.inventory.submit_resource(resource).await
    }

    pub async fn get_nodes(&self) -> Vec<Node> {
        self.state.inventory.get_nodes().await
    }

    /// Push one task status report. Never fails; unknown tasks are ignored.
    pub async fn submit_status_update(&self, status: TaskStatus) -> StatusOutcome {
        self.state.reconciler().apply(status).await
    }

    /// Report that a node is gone. Returns the tasks bound to it.
    pub async fn report_node_lost(&self, node_id: &NodeId) -> Result<Vec<TaskId>, CoreError> {
        self.state.reconciler().node_lost(node_id).await
    }
}
