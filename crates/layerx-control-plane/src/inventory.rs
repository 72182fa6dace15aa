//! Resource inventory - nodes and the resources reported against them.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use layerx_core::{CoreError, Node, NodeId, Resource};

/// Owns every known Node and its Resources.
#[derive(Default)]
pub struct ResourceInventory {
    nodes: RwLock<HashMap<NodeId, Node>>,
}

impl ResourceInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a resource into its owning node, creating the node if absent.
    ///
    /// Resubmitting a resource id the node already holds is a no-op.
    pub async fn submit_resource(&self, resource: Resource) -> Result<(), CoreError> {
        if resource.node_id.is_blank() {
            return Err(CoreError::InvalidInput(format!(
                "resource {} has no node id",
                resource.id
            )));
        }
        if resource.id.is_blank() {
            return Err(CoreError::InvalidInput("resource id is required".to_string()));
        }

        let resource_id = resource.id.clone();
        let node_id = resource.node_id.clone();

        let mut nodes = self.nodes.write().await;
        let node = nodes
            .entry(node_id.clone())
            .or_insert_with(|| Node::new(node_id.clone()));

        if node.add_resource(resource)? {
            info!(
                node_id = %node_id,
                resource_id = %resource_id,
                resources = node.resources.len(),
                "Resource submitted"
            );
        } else {
            warn!(
                node_id = %node_id,
                resource_id = %resource_id,
                "Resource already known, ignoring resubmission"
            );
        }
        Ok(())
    }

    /// Snapshot of all known nodes. Order is unspecified.
    pub async fn get_nodes(&self) -> Vec<Node> {
        let nodes = self.nodes.read().await;
        debug!(count = nodes.len(), "Listing nodes");
        nodes.values().cloned().collect()
    }

    /// Get a single node.
    pub async fn get_node(&self, node_id: &NodeId) -> Result<Node, CoreError> {
        self.nodes
            .read()
            .await
            .get(node_id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Node", node_id))
    }

    /// Check whether a node is known.
    pub async fn contains_node(&self, node_id: &NodeId) -> bool {
        self.nodes.read().await.contains_key(node_id)
    }

    /// Number of known nodes.
    pub async fn node_count(&self) -> usize {
        self.nodes.read().await.len()
    }

    /// Number of resources across all nodes.
    pub async fn resource_count(&self) -> usize {
        self.nodes
            .read()
            .await
            .values()
            .map(|n| n.resources.len())
            .sum()
    }

    /// Clear all nodes and resources.
    pub async fn purge(&self) {
        let mut nodes = self.nodes.write().await;
        let count = nodes.len();
        nodes.clear();
        info!(nodes = count, "Resource inventory purged");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(id: &str, node: &str) -> Resource {
        Resource::new(id, node).with_cpus(1.0).with_mem(1024.0)
    }

    #[tokio::test]
    async fn test_resources_merge_into_nodes() {
        let inventory = ResourceInventory::new();
        inventory.submit_resource(resource("offer-1", "_1")).await.unwrap();
        inventory.submit_resource(resource("offer-2", "_1")).await.unwrap();
        inventory.submit_resource(resource("offer-3", "_2")).await.unwrap();

        assert_eq!(inventory.node_count().await, 2);
        assert_eq!(inventory.resource_count().await, 3);

        let node = inventory.get_node(&NodeId::new("_1")).await.unwrap();
        let ids: Vec<&str> = node.resources.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["offer-1", "offer-2"]);
        assert_eq!(node.total_cpus(), 2.0);
    }

    #[tokio::test]
    async fn test_duplicate_submission_is_idempotent() {
        let inventory = ResourceInventory::new();
        inventory.submit_resource(resource("offer-1", "_1")).await.unwrap();
        let once = inventory.get_nodes().await;

        inventory.submit_resource(resource("offer-1", "_1")).await.unwrap();
        let twice = inventory.get_nodes().await;

        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn test_get_missing_node() {
        let inventory = ResourceInventory::new();
        let err = inventory.get_node(&NodeId::new("nope")).await.unwrap_err();
        assert_eq!(err.kind(), "NotFound");
    }

    #[tokio::test]
    async fn test_resource_without_node_rejected() {
        let inventory = ResourceInventory::new();
        let err = inventory
            .submit_resource(Resource::new("offer-1", ""))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "InvalidInput");
        assert_eq!(inventory.node_count().await, 0);
    }

    #[tokio::test]
    async fn test_purge() {
        let inventory = ResourceInventory::new();
        inventory.submit_resource(resource("offer-1", "_1")).await.unwrap();
        inventory.purge().await;
        assert!(inventory.get_nodes().await.is_empty());
        assert!(!inventory.contains_node(&NodeId::new("_1")).await);
    }
}
