//! Tasks and the pools they live in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::{NodeId, TaskId, TaskProvider};

/// The schedulable pools a Task can be in.
///
/// Terminal tasks are in no pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoolKind {
    /// Submitted, not yet bound to a node.
    Pending,
    /// Bound to a node, waiting for the executor to start it.
    Staging,
    /// Reported running by the executor.
    Running,
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "PENDING",
            Self::Staging => "STAGING",
            Self::Running => "RUNNING",
        };
        f.write_str(name)
    }
}

/// A unit of work submitted by a Task Provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,

    /// Human-readable name.
    pub name: String,

    /// Command to execute. Opaque to the control plane.
    #[serde(default)]
    pub command: String,

    /// Additional opaque payload forwarded to the executor untouched.
    #[serde(default)]
    pub payload: String,

    /// Requested CPU shares.
    #[serde(default)]
    pub cpus: f64,

    /// Requested memory in MB.
    #[serde(default)]
    pub mem: f64,

    /// Requested disk in MB.
    #[serde(default)]
    pub disk: f64,

    /// Task labels/metadata.
    #[serde(default)]
    pub labels: HashMap<String, String>,

    /// Provider that submitted this task. Set on submission.
    #[serde(default)]
    pub provider: Option<TaskProvider>,

    /// Node the task is bound to. `None` while Pending.
    #[serde(default)]
    pub node_id: Option<NodeId>,

    /// When the task was created.
    #[serde(default = "Utc::now")]
    pub submitted_at: DateTime<Utc>,
}

impl Task {
    /// Create a new Task.
    pub fn new(
        id: impl Into<TaskId>,
        name: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            command: command.into(),
            payload: String::new(),
            cpus: 0.0,
            mem: 0.0,
            disk: 0.0,
            labels: HashMap::new(),
            provider: None,
            node_id: None,
            submitted_at: Utc::now(),
        }
    }

    /// Builder method to set the opaque payload.
    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Builder method to set requested capacity.
    pub fn with_resources(mut self, cpus: f64, mem: f64, disk: f64) -> Self {
        self.cpus = cpus;
        self.mem = mem;
        self.disk = disk;
        self
    }

    /// Builder method to add a label.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Check if the task is bound to the given node.
    pub fn is_on_node(&self, node_id: &NodeId) -> bool {
        self.node_id.as_ref() == Some(node_id)
    }
}
