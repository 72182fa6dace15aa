//! Resources offered by cluster nodes.

use serde::{Deserialize, Serialize};

use crate::{NodeId, ResourceId};

/// An inclusive range of ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    pub begin: u64,
    pub end: u64,
}

impl PortRange {
    pub fn new(begin: u64, end: u64) -> Self {
        Self { begin, end }
    }

    /// Number of ports covered by this range.
    pub fn len(&self) -> u64 {
        if self.end < self.begin {
            0
        } else {
            self.end - self.begin + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A quantity of capacity offered by a Node, sourced from one offer.
///
/// Capacity values are bookkeeping only; the control plane never
/// interprets them beyond summing them per node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Identifier derived from the originating offer id.
    pub id: ResourceId,

    /// Node this resource belongs to.
    pub node_id: NodeId,

    /// CPU shares.
    #[serde(default)]
    pub cpus: f64,

    /// Memory in MB.
    #[serde(default)]
    pub mem: f64,

    /// Disk in MB.
    #[serde(default)]
    pub disk: f64,

    /// Port ranges.
    #[serde(default)]
    pub ports: Vec<PortRange>,

    /// Reference to the provider that reported this resource.
    #[serde(default)]
    pub source: String,
}

impl Resource {
    /// Create an empty Resource for a node.
    pub fn new(id: impl Into<ResourceId>, node_id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            node_id: node_id.into(),
            cpus: 0.0,
            mem: 0.0,
            disk: 0.0,
            ports: Vec::new(),
            source: String::new(),
        }
    }

    /// Builder method to set CPU shares.
    pub fn with_cpus(mut self, cpus: f64) -> Self {
        self.cpus = cpus;
        self
    }

    /// Builder method to set memory.
    pub fn with_mem(mut self, mem: f64) -> Self {
        self.mem = mem;
        self
    }

    /// Builder method to set disk.
    pub fn with_disk(mut self, disk: f64) -> Self {
        self.disk = disk;
        self
    }

    /// Builder method to add a port range.
    pub fn with_ports(mut self, range: PortRange) -> Self {
        self.ports.push(range);
        self
    }

    /// Builder method to set the source reference.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}
