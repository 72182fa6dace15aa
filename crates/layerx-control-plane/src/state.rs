//! Shared application state.
//!
//! One `AppState` is the whole control plane: each store is guarded by its
//! own lock, and the services borrow the stores they need. It is built once
//! and handed to every request handler; nothing reaches it through a global.

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::engine::{AssignmentEngine, MigrationEngine};
use crate::inventory::ResourceInventory;
use crate::pool::TaskPoolSet;
use crate::reconciler::{StatusQueue, StatusReconciler};
use crate::registry::TaskProviderRegistry;
use crate::service::{BrainService, ResourceProviderService, TaskProviderService};

/// Shared application state.
#[derive(Default)]
pub struct AppState {
    /// Nodes and their resources.
    pub inventory: ResourceInventory,

    /// Registered task providers.
    pub providers: TaskProviderRegistry,

    /// Pending, Staging and Running tasks.
    pub pools: TaskPoolSet,

    /// Status reports waiting to be drained by a scheduler.
    pub status_updates: StatusQueue,
}

impl AppState {
    /// Create a new AppState with default limits, wrapped in Arc.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Create a new AppState from configuration, wrapped in Arc.
    pub fn with_config(config: &Config) -> Arc<Self> {
        Arc::new(Self {
            inventory: ResourceInventory::new(),
            providers: TaskProviderRegistry::new(),
            pools: TaskPoolSet::with_terminal_history(config.terminal_history),
            status_updates: StatusQueue::with_capacity(config.status_queue_capacity),
        })
    }

    pub fn assignment(&self) -> AssignmentEngine<'_> {
        AssignmentEngine::new(&self.inventory, &self.pools)
    }

    pub fn migration(&self) -> MigrationEngine<'_> {
        MigrationEngine::new(&self.inventory, &self.pools)
    }

    pub fn reconciler(&self) -> StatusReconciler<'_> {
        StatusReconciler::new(&self.pools, &self.inventory, &self.status_updates)
    }

    /// Scheduler-facing interface.
    pub fn brain(&self) -> BrainService<'_> {
        BrainService::new(self)
    }

    /// Interface for resource providers.
    pub fn resource_provider(&self) -> ResourceProviderService<'_> {
        ResourceProviderService::new(self)
    }

    /// Interface for task providers.
    pub fn task_provider(&self) -> TaskProviderService<'_> {
        TaskProviderService::new(self)
    }

    /// Reset inventory, providers, pools and queued status updates.
    ///
    /// Meant for test harnesses.
    pub async fn purge(&self) {
        self.inventory.purge().await;
        self.providers.purge().await;
        self.pools.purge().await;
        self.status_updates.purge().await;
        info!("Control plane state purged");
    }
}
