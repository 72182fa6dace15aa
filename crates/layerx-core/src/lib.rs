//! LayerX Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - Async runtime
//! - Storage
//!
//! Everything the control plane books (nodes, resources, task providers,
//! tasks and their status reports) is defined here.

pub mod error;
pub mod ids;
pub mod node;
pub mod provider;
pub mod resource;
pub mod status;
pub mod task;

// Re-export commonly used types
pub use error::CoreError;
pub use ids::{NodeId, ProviderId, ResourceId, TaskId};
pub use node::Node;
pub use provider::TaskProvider;
pub use resource::{PortRange, Resource};
pub use status::{StatusEffect, TaskState, TaskStatus};
pub use task::{PoolKind, Task};
