//! LayerX Control Plane Library
//!
//! This crate provides the in-memory orchestration state of LayerX: the
//! resource inventory, the task provider registry, the task pools, the
//! assignment/migration engines, status reconciliation, and the HTTP
//! transport for the resource provider, task provider and Brain interfaces.

pub mod config;
pub mod engine;
pub mod http;
pub mod inventory;
pub mod metrics;
pub mod pool;
pub mod reconciler;
pub mod registry;
pub mod service;
pub mod state;

pub use config::Config;
pub use engine::{AssignmentEngine, MigrationEngine};
pub use inventory::ResourceInventory;
pub use pool::{PoolCounts, StatusOutcome, TaskPoolSet, TerminatedTask};
pub use reconciler::{SourceError, StatusQueue, StatusReconciler, StatusSource};
pub use registry::TaskProviderRegistry;
pub use service::{BrainService, ResourceProviderService, TaskProviderService};
pub use state::AppState;
