//! Cluster nodes and their accumulated resources.

use serde::{Deserialize, Serialize};

use crate::{CoreError, NodeId, Resource, ResourceId};

/// A cluster host identified by id, exposing the Resources reported for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node identifier.
    pub id: NodeId,

    /// Resources in submission order.
    pub resources: Vec<Resource>,
}

impl Node {
    /// Create a Node with no resources.
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            resources: Vec::new(),
        }
    }

    /// Merge a resource into this node.
    ///
    /// Returns `Ok(false)` when a resource with the same id is already
    /// present; the existing entry is kept unchanged.
    pub fn add_resource(&mut self, resource: Resource) -> Result<bool, CoreError> {
        if resource.node_id != self.id {
            return Err(CoreError::InvalidInput(format!(
                "resource {} belongs to node {}, not {}",
                resource.id, resource.node_id, self.id
            )));
        }
        if self.contains_resource(&resource.id) {
            return Ok(false);
        }
        self.resources.push(resource);
        Ok(true)
    }

    /// Check if a resource id is already part of this node.
    pub fn contains_resource(&self, id: &ResourceId) -> bool {
        self.resources.iter().any(|r| &r.id == id)
    }

    /// Total CPU shares across all resources.
    pub fn total_cpus(&self) -> f64 {
        self.resources.iter().map(|r| r.cpus).sum()
    }

    /// Total memory across all resources.
    pub fn total_mem(&self) -> f64 {
        self.resources.iter().map(|r| r.mem).sum()
    }

    /// Total disk across all resources.
    pub fn total_disk(&self) -> f64 {
        self.resources.iter().map(|r| r.disk).sum()
    }
}
