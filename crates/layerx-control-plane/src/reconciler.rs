//! Status reconciliation - ingests executor status reports and drives pool
//! transitions.
//!
//! Reports arrive either pushed (HTTP, or any [`Stream`]) or pulled from a
//! [`StatusSource`]. Every consumed report is also kept in a bounded
//! [`StatusQueue`] that schedulers drain through the Brain API.

use std::collections::VecDeque;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info, warn};

use layerx_core::{CoreError, NodeId, TaskId, TaskState, TaskStatus};

use crate::inventory::ResourceInventory;
use crate::pool::{StatusOutcome, TaskPoolSet};

/// Default number of status reports retained for draining.
pub const DEFAULT_STATUS_QUEUE_CAPACITY: usize = 1024;

/// Bounded, drainable queue of recent status reports.
///
/// Draining removes the returned reports, so each report reaches at most
/// one consumer.
pub struct StatusQueue {
    updates: Mutex<VecDeque<TaskStatus>>,
    capacity: usize,
}

impl Default for StatusQueue {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_STATUS_QUEUE_CAPACITY)
    }
}

impl StatusQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            updates: Mutex::new(VecDeque::new()),
            capacity,
        }
    }

    /// Append a report, dropping the oldest one when full.
    pub async fn push(&self, status: TaskStatus) {
        if self.capacity == 0 {
            return;
        }
        let mut updates = self.updates.lock().await;
        if updates.len() >= self.capacity {
            if let Some(dropped) = updates.pop_front() {
                warn!(
                    task_id = %dropped.task_id,
                    capacity = self.capacity,
                    "Status queue full, dropping oldest update"
                );
            }
        }
        updates.push_back(status);
    }

    /// Remove and return every queued report, oldest first.
    pub async fn drain(&self) -> Vec<TaskStatus> {
        self.updates.lock().await.drain(..).collect()
    }

    pub async fn len(&self) -> usize {
        self.updates.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.updates.lock().await.is_empty()
    }

    pub async fn purge(&self) {
        self.updates.lock().await.clear();
    }
}

/// Errors raised by a pull-based status source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Status source unavailable: {0}")]
    Unavailable(String),
}

/// A pull-based feed of status reports.
#[async_trait]
pub trait StatusSource: Send {
    /// Fetch the reports produced since the previous poll.
    async fn poll(&mut self) -> Result<Vec<TaskStatus>, SourceError>;
}

/// Applies status reports to the pools and records them for draining.
pub struct StatusReconciler<'a> {
    pools: &'a TaskPoolSet,
    inventory: &'a ResourceInventory,
    queue: &'a StatusQueue,
}

impl<'a> StatusReconciler<'a> {
    pub fn new(
        pools: &'a TaskPoolSet,
        inventory: &'a ResourceInventory,
        queue: &'a StatusQueue,
    ) -> Self {
        Self {
            pools,
            inventory,
            queue,
        }
    }

    /// Apply one report. Reports for unknown tasks change nothing and are
    /// not an error.
    pub async fn apply(&self, status: TaskStatus) -> StatusOutcome {
        let outcome = self.pools.apply_status(&status).await;
        match outcome {
            StatusOutcome::Unknown => {
                debug!(
                    task_id = %status.task_id,
                    state = ?status.state,
                    "Status update for unknown task"
                );
            }
            StatusOutcome::Unchanged(pool) => {
                debug!(task_id = %status.task_id, state = ?status.state, pool = %pool, "Status update");
            }
            StatusOutcome::Moved { from, to } => {
                info!(task_id = %status.task_id, from = %from, to = %to, "Task moved on status update");
            }
            StatusOutcome::Terminated { from } => {
                info!(
                    task_id = %status.task_id,
                    state = ?status.state,
                    from = %from,
                    "Task reached terminal state"
                );
            }
        }
        self.queue.push(status).await;
        outcome
    }

    /// Apply every report from a stream until it ends. Returns the count.
    pub async fn consume<S>(&self, stream: S) -> usize
    where
        S: Stream<Item = TaskStatus>,
    {
        tokio::pin!(stream);
        let mut applied = 0;
        while let Some(status) = stream.next().await {
            self.apply(status).await;
            applied += 1;
        }
        applied
    }

    /// Pull one batch from a source and apply it. Returns the count.
    pub async fn poll<S>(&self, source: &mut S) -> Result<usize, SourceError>
    where
        S: StatusSource + ?Sized,
    {
        let batch = source.poll().await?;
        let count = batch.len();
        for status in batch {
            self.apply(status).await;
        }
        Ok(count)
    }

    /// Handle the loss of a node.
    ///
    /// Every Staging or Running task bound to the node gets an `Unreachable`
    /// report queued for the scheduler. Pools are left as they are so the
    /// tasks can be migrated elsewhere.
    pub async fn node_lost(&self, node_id: &NodeId) -> Result<Vec<TaskId>, CoreError> {
        if !self.inventory.contains_node(node_id).await {
            return Err(CoreError::NodeNotFound(node_id.clone()));
        }

        let affected = self.pools.tasks_on_node(node_id).await;
        warn!(node_id = %node_id, tasks = affected.len(), "Node lost");

        for task_id in &affected {
            let status = TaskStatus::new(task_id.clone(), TaskState::Unreachable)
                .with_node(node_id.clone())
                .with_message("node lost")
                .with_metadata("cause", "node_lost");
            self.queue.push(status).await;
        }
        Ok(affected)
    }
}
