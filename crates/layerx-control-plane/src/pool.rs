//! Task pools - the Pending -> Staging -> Running state machine.
//!
//! Every live task sits in exactly one of the three pools. All pools share
//! one lock, so each transition (including whole batches) is linearizable
//! and a task can never be observed in two pools at once.

use std::collections::{HashMap, HashSet, VecDeque};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use layerx_core::{
    CoreError, NodeId, PoolKind, StatusEffect, Task, TaskId, TaskProvider, TaskState, TaskStatus,
};

/// Default number of terminated tasks retained for inspection.
pub const DEFAULT_TERMINAL_HISTORY: usize = 256;

/// A task that left the pools on a terminal status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerminatedTask {
    pub task: Task,
    pub state: TaskState,
    pub terminated_at: DateTime<Utc>,
}

/// Result of applying a status report to the pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutcome {
    /// The task is in no pool; nothing changed.
    Unknown,
    /// The task stayed where it was.
    Unchanged(PoolKind),
    /// The task moved between pools.
    Moved { from: PoolKind, to: PoolKind },
    /// The task left the pools for good.
    Terminated { from: PoolKind },
}

/// Number of tasks per pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoolCounts {
    pub pending: usize,
    pub staging: usize,
    pub running: usize,
    pub terminated: usize,
}

#[derive(Default)]
struct Pools {
    pending: HashMap<TaskId, Task>,
    staging: HashMap<TaskId, Task>,
    running: HashMap<TaskId, Task>,
    terminal: VecDeque<TerminatedTask>,
}

impl Pools {
    fn pool(&self, kind: PoolKind) -> &HashMap<TaskId, Task> {
        match kind {
            PoolKind::Pending => &self.pending,
            PoolKind::Staging => &self.staging,
            PoolKind::Running => &self.running,
        }
    }

    fn pool_mut(&mut self, kind: PoolKind) -> &mut HashMap<TaskId, Task> {
        match kind {
            PoolKind::Pending => &mut self.pending,
            PoolKind::Staging => &mut self.staging,
            PoolKind::Running => &mut self.running,
        }
    }

    fn locate(&self, id: &TaskId) -> Option<PoolKind> {
        [PoolKind::Pending, PoolKind::Staging, PoolKind::Running]
            .into_iter()
            .find(|kind| self.pool(*kind).contains_key(id))
    }

    /// Check that every id is live and in one of `allowed`.
    fn check_batch(
        &self,
        ids: &[TaskId],
        allowed: &[PoolKind],
        expected: &str,
    ) -> Result<(), CoreError> {
        for id in ids {
            match self.locate(id) {
                Some(kind) if allowed.contains(&kind) => {}
                Some(kind) => {
                    return Err(CoreError::InvalidTransition {
                        task_id: id.clone(),
                        from: kind.to_string(),
                        expected: expected.to_string(),
                    })
                }
                None => return Err(CoreError::not_found("Task", id)),
            }
        }
        Ok(())
    }

    /// Move a task into Staging bound to `node_id`. The task must exist.
    fn stage(&mut self, id: &TaskId, node_id: &NodeId) -> Option<Task> {
        let from = self.locate(id)?;
        let mut task = self.pool_mut(from).remove(id)?;
        task.node_id = Some(node_id.clone());
        self.staging.insert(id.clone(), task.clone());
        Some(task)
    }
}

/// Owns all Task objects and their pool membership.
pub struct TaskPoolSet {
    inner: RwLock<Pools>,
    terminal_history: usize,
}

impl Default for TaskPoolSet {
    fn default() -> Self {
        Self::with_terminal_history(DEFAULT_TERMINAL_HISTORY)
    }
}

impl TaskPoolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pool set retaining up to `terminal_history` terminated tasks.
    pub fn with_terminal_history(terminal_history: usize) -> Self {
        Self {
            inner: RwLock::new(Pools::default()),
            terminal_history,
        }
    }

    /// Insert a new task into Pending on behalf of a registered provider.
    ///
    /// Returns the task as stored, stamped with its provider.
    pub async fn submit(&self, mut task: Task, provider: TaskProvider) -> Result<Task, CoreError> {
        if task.id.is_blank() {
            return Err(CoreError::InvalidInput("task id is required".to_string()));
        }

        let mut pools = self.inner.write().await;
        if let Some(kind) = pools.locate(&task.id) {
            return Err(CoreError::DuplicateTask(task.id, kind));
        }

        info!(
            task_id = %task.id,
            name = %task.name,
            provider_id = %provider.id,
            "Task submitted"
        );

        task.provider = Some(provider);
        task.node_id = None;
        pools.pending.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    /// Bind Pending tasks to a node and move them to Staging.
    ///
    /// All or nothing: if any id is not Pending, no task moves.
    pub async fn assign(
        &self,
        task_ids: &[TaskId],
        node_id: &NodeId,
    ) -> Result<Vec<Task>, CoreError> {
        let ids = dedup(task_ids);
        let mut pools = self.inner.write().await;
        pools.check_batch(&ids, &[PoolKind::Pending], "PENDING")?;

        let staged: Vec<Task> = ids
            .iter()
            .filter_map(|id| pools.stage(id, node_id))
            .collect();

        info!(
            node_id = %node_id,
            tasks = ?ids.iter().map(TaskId::as_str).collect::<Vec<_>>(),
            "Tasks assigned"
        );
        Ok(staged)
    }

    /// Rebind Staging or Running tasks to a new node and move them to Staging.
    ///
    /// All or nothing, like [`TaskPoolSet::assign`].
    pub async fn migrate(
        &self,
        task_ids: &[TaskId],
        node_id: &NodeId,
    ) -> Result<Vec<Task>, CoreError> {
        let ids = dedup(task_ids);
        let mut pools = self.inner.write().await;
        pools.check_batch(
            &ids,
            &[PoolKind::Staging, PoolKind::Running],
            "STAGING or RUNNING",
        )?;

        let mut staged = Vec::with_capacity(ids.len());
        for id in &ids {
            let previous = pools
                .locate(id)
                .and_then(|kind| pools.pool(kind).get(id))
                .and_then(|t| t.node_id.clone());
            if let Some(task) = pools.stage(id, node_id) {
                info!(
                    task_id = %id,
                    from_node = ?previous.as_ref().map(NodeId::as_str),
                    to_node = %node_id,
                    "Task migrated"
                );
                staged.push(task);
            }
        }
        Ok(staged)
    }

    /// Apply an execution state report to the pools.
    ///
    /// Reports for tasks in no pool are ignored.
    pub async fn apply_status(&self, status: &TaskStatus) -> StatusOutcome {
        let mut pools = self.inner.write().await;
        let Some(from) = pools.locate(&status.task_id) else {
            return StatusOutcome::Unknown;
        };

        match status.state.effect() {
            StatusEffect::Stay => StatusOutcome::Unchanged(from),
            StatusEffect::Run => match from {
                PoolKind::Staging => {
                    if let Some(task) = pools.staging.remove(&status.task_id) {
                        pools.running.insert(status.task_id.clone(), task);
                    }
                    StatusOutcome::Moved {
                        from,
                        to: PoolKind::Running,
                    }
                }
                PoolKind::Running => StatusOutcome::Unchanged(from),
                PoolKind::Pending => {
                    warn!(
                        task_id = %status.task_id,
                        "Running status for a task that was never assigned, ignoring"
                    );
                    StatusOutcome::Unchanged(from)
                }
            },
            StatusEffect::Terminate => {
                if let Some(task) = pools.pool_mut(from).remove(&status.task_id) {
                    if self.terminal_history > 0 {
                        if pools.terminal.len() >= self.terminal_history {
                            pools.terminal.pop_front();
                        }
                        pools.terminal.push_back(TerminatedTask {
                            task,
                            state: status.state,
                            terminated_at: Utc::now(),
                        });
                    }
                }
                StatusOutcome::Terminated { from }
            }
        }
    }

    /// Remove a task from whichever pool holds it.
    pub async fn delete(&self, task_id: &TaskId) -> Result<Task, CoreError> {
        let mut pools = self.inner.write().await;
        let kind = pools
            .locate(task_id)
            .ok_or_else(|| CoreError::not_found("Task", task_id))?;
        let task = pools
            .pool_mut(kind)
            .remove(task_id)
            .ok_or_else(|| CoreError::not_found("Task", task_id))?;
        info!(task_id = %task_id, pool = %kind, "Task deleted");
        Ok(task)
    }

    /// Pool currently holding the task.
    pub async fn find_pool(&self, task_id: &TaskId) -> Result<PoolKind, CoreError> {
        self.inner
            .read()
            .await
            .locate(task_id)
            .ok_or_else(|| CoreError::not_found("Task", task_id))
    }

    /// Get a live task by id.
    pub async fn get(&self, task_id: &TaskId) -> Result<Task, CoreError> {
        let pools = self.inner.read().await;
        pools
            .locate(task_id)
            .and_then(|kind| pools.pool(kind).get(task_id).cloned())
            .ok_or_else(|| CoreError::not_found("Task", task_id))
    }

    pub async fn list_pending(&self) -> Vec<Task> {
        self.list(PoolKind::Pending).await
    }

    pub async fn list_staging(&self) -> Vec<Task> {
        self.list(PoolKind::Staging).await
    }

    pub async fn list_running(&self) -> Vec<Task> {
        self.list(PoolKind::Running).await
    }

    /// Snapshot of one pool. Order is unspecified.
    pub async fn list(&self, kind: PoolKind) -> Vec<Task> {
        self.inner.read().await.pool(kind).values().cloned().collect()
    }

    /// Recently terminated tasks, oldest first.
    pub async fn list_terminal(&self) -> Vec<TerminatedTask> {
        self.inner.read().await.terminal.iter().cloned().collect()
    }

    /// Ids of Staging and Running tasks bound to a node.
    pub async fn tasks_on_node(&self, node_id: &NodeId) -> Vec<TaskId> {
        let pools = self.inner.read().await;
        pools
            .staging
            .values()
            .chain(pools.running.values())
            .filter(|t| t.is_on_node(node_id))
            .map(|t| t.id.clone())
            .collect()
    }

    pub async fn counts(&self) -> PoolCounts {
        let pools = self.inner.read().await;
        PoolCounts {
            pending: pools.pending.len(),
            staging: pools.staging.len(),
            running: pools.running.len(),
            terminated: pools.terminal.len(),
        }
    }

    /// Drop every task, including the terminal history.
    pub async fn purge(&self) {
        let mut pools = self.inner.write().await;
        *pools = Pools::default();
        info!("Task pools purged");
    }
}

/// Remove repeated ids, keeping first occurrence order.
fn dedup(ids: &[TaskId]) -> Vec<TaskId> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(*id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn provider() -> TaskProvider {
        TaskProvider::new("p1", "p@h:1")
    }

    fn ids(raw: &[&str]) -> Vec<TaskId> {
        raw.iter().map(|s| TaskId::new(*s)).collect()
    }

    async fn pools_with(tasks: &[&str]) -> TaskPoolSet {
        let pools = TaskPoolSet::new();
        for id in tasks {
            pools
                .submit(Task::new(*id, "fake_task_name", "echo FAKE_COMMAND"), provider())
                .await
                .unwrap();
        }
        pools
    }

    /// Number of pools holding each id; must always be 0 or 1.
    async fn occurrences(pools: &TaskPoolSet, id: &str) -> usize {
        let id = TaskId::new(id);
        let mut count = 0;
        for kind in [PoolKind::Pending, PoolKind::Staging, PoolKind::Running] {
            count += pools.list(kind).await.iter().filter(|t| t.id == id).count();
        }
        count
    }

    #[tokio::test]
    async fn test_submit_into_pending() {
        let pools = pools_with(&["t1"]).await;
        let pending = pools.list_pending().await;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].provider, Some(provider()));
        assert!(pending[0].node_id.is_none());
        assert_eq!(pools.find_pool(&TaskId::new("t1")).await.unwrap(), PoolKind::Pending);
    }

    #[tokio::test]
    async fn test_submit_returns_stored_task() {
        let pools = TaskPoolSet::new();
        let stored = pools
            .submit(Task::new("t1", "name", "cmd"), provider())
            .await
            .unwrap();
        assert_eq!(stored.provider, Some(provider()));

        // The returned copy stays valid after the task leaves the pools.
        pools.apply_status(&TaskStatus::finished("t1")).await;
        assert_eq!(stored.id, TaskId::new("t1"));
        assert_eq!(pools.list_terminal().await[0].task, stored);
    }

    #[tokio::test]
    async fn test_submit_clears_node_binding() {
        let pools = TaskPoolSet::new();
        let mut task = Task::new("t1", "name", "cmd");
        task.node_id = Some(NodeId::new("n1"));
        pools.submit(task, provider()).await.unwrap();
        assert!(pools.get(&TaskId::new("t1")).await.unwrap().node_id.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_submit_across_pools() {
        let pools = pools_with(&["t1"]).await;
        pools.assign(&ids(&["t1"]), &NodeId::new("n1")).await.unwrap();

        let err = pools
            .submit(Task::new("t1", "again", "cmd"), provider())
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::DuplicateTask(TaskId::new("t1"), PoolKind::Staging));
        assert_eq!(occurrences(&pools, "t1").await, 1);
    }

    #[tokio::test]
    async fn test_assign_moves_to_staging() {
        let pools = pools_with(&["t1", "t2"]).await;
        let node = NodeId::new("n1");

        let staged = pools.assign(&ids(&["t1", "t2"]), &node).await.unwrap();
        assert_eq!(staged.len(), 2);
        assert!(pools.list_pending().await.is_empty());

        let staging = pools.list_staging().await;
        assert_eq!(staging.len(), 2);
        assert!(staging.iter().all(|t| t.is_on_node(&node)));
    }

    #[tokio::test]
    async fn test_assign_batch_is_atomic() {
        let pools = pools_with(&["t1", "t2", "t3"]).await;
        pools.assign(&ids(&["t2"]), &NodeId::new("n1")).await.unwrap();

        let err = pools
            .assign(&ids(&["t1", "t2", "t3"]), &NodeId::new("n2"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "InvalidTransition");

        // Nothing moved
        assert_eq!(pools.find_pool(&TaskId::new("t1")).await.unwrap(), PoolKind::Pending);
        assert_eq!(pools.find_pool(&TaskId::new("t3")).await.unwrap(), PoolKind::Pending);
        let t2 = pools.get(&TaskId::new("t2")).await.unwrap();
        assert_eq!(t2.node_id, Some(NodeId::new("n1")));
    }

    #[tokio::test]
    async fn test_assign_unknown_task() {
        let pools = pools_with(&["t1"]).await;
        let err = pools
            .assign(&ids(&["t1", "ghost"]), &NodeId::new("n1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "NotFound");
        assert_eq!(pools.find_pool(&TaskId::new("t1")).await.unwrap(), PoolKind::Pending);
    }

    #[tokio::test]
    async fn test_assign_repeated_id_in_batch() {
        let pools = pools_with(&["t1"]).await;
        let staged = pools
            .assign(&ids(&["t1", "t1"]), &NodeId::new("n1"))
            .await
            .unwrap();
        assert_eq!(staged.len(), 1);
        assert_eq!(occurrences(&pools, "t1").await, 1);
    }

    #[tokio::test]
    async fn test_migrate_from_staging_and_running() {
        let pools = pools_with(&["t1", "t2"]).await;
        pools.assign(&ids(&["t1", "t2"]), &NodeId::new("n1")).await.unwrap();
        pools.apply_status(&TaskStatus::running("t2")).await;

        let moved = pools
            .migrate(&ids(&["t1", "t2"]), &NodeId::new("n2"))
            .await
            .unwrap();
        assert_eq!(moved.len(), 2);

        let staging = pools.list_staging().await;
        assert_eq!(staging.len(), 2);
        assert!(staging.iter().all(|t| t.is_on_node(&NodeId::new("n2"))));
        assert!(pools.list_running().await.is_empty());
    }

    #[tokio::test]
    async fn test_migrate_pending_fails_atomically() {
        let pools = pools_with(&["t1", "t2"]).await;
        pools.assign(&ids(&["t1"]), &NodeId::new("n1")).await.unwrap();

        let err = pools
            .migrate(&ids(&["t1", "t2"]), &NodeId::new("n2"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "InvalidTransition");

        let t1 = pools.get(&TaskId::new("t1")).await.unwrap();
        assert_eq!(t1.node_id, Some(NodeId::new("n1")));
        assert_eq!(pools.find_pool(&TaskId::new("t2")).await.unwrap(), PoolKind::Pending);
    }

    #[tokio::test]
    async fn test_status_progression() {
        let pools = pools_with(&["t1"]).await;
        pools.assign(&ids(&["t1"]), &NodeId::new("n1")).await.unwrap();

        let outcome = pools.apply_status(&TaskStatus::new("t1", TaskState::Starting)).await;
        assert_eq!(outcome, StatusOutcome::Unchanged(PoolKind::Staging));

        let outcome = pools.apply_status(&TaskStatus::running("t1")).await;
        assert_eq!(
            outcome,
            StatusOutcome::Moved {
                from: PoolKind::Staging,
                to: PoolKind::Running
            }
        );
        assert_eq!(pools.find_pool(&TaskId::new("t1")).await.unwrap(), PoolKind::Running);

        let outcome = pools.apply_status(&TaskStatus::finished("t1")).await;
        assert_eq!(outcome, StatusOutcome::Terminated { from: PoolKind::Running });
        assert_eq!(occurrences(&pools, "t1").await, 0);
        assert!(pools.find_pool(&TaskId::new("t1")).await.is_err());

        let terminal = pools.list_terminal().await;
        assert_eq!(terminal.len(), 1);
        assert_eq!(terminal[0].state, TaskState::Finished);
    }

    #[tokio::test]
    async fn test_terminal_status_from_pending() {
        let pools = pools_with(&["t1"]).await;
        let outcome = pools
            .apply_status(&TaskStatus::new("t1", TaskState::Killed))
            .await;
        assert_eq!(outcome, StatusOutcome::Terminated { from: PoolKind::Pending });
        assert!(pools.list_pending().await.is_empty());
    }

    #[tokio::test]
    async fn test_running_status_for_pending_is_ignored() {
        let pools = pools_with(&["t1"]).await;
        let outcome = pools.apply_status(&TaskStatus::running("t1")).await;
        assert_eq!(outcome, StatusOutcome::Unchanged(PoolKind::Pending));
        assert_eq!(pools.list_pending().await.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_status_is_inert() {
        let pools = pools_with(&["t1"]).await;
        let before = pools.counts().await;

        let outcome = pools.apply_status(&TaskStatus::finished("ghost")).await;
        assert_eq!(outcome, StatusOutcome::Unknown);
        assert_eq!(pools.counts().await, before);
    }

    #[tokio::test]
    async fn test_terminated_id_can_be_resubmitted() {
        let pools = pools_with(&["t1"]).await;
        pools.apply_status(&TaskStatus::new("t1", TaskState::Failed)).await;
        pools
            .submit(Task::new("t1", "retry", "cmd"), provider())
            .await
            .unwrap();
        assert_eq!(pools.find_pool(&TaskId::new("t1")).await.unwrap(), PoolKind::Pending);
    }

    #[tokio::test]
    async fn test_terminal_history_is_bounded() {
        let pools = TaskPoolSet::with_terminal_history(2);
        for id in ["t1", "t2", "t3"] {
            pools.submit(Task::new(id, "n", "c"), provider()).await.unwrap();
            pools.apply_status(&TaskStatus::finished(id)).await;
        }
        let terminal: Vec<String> = pools
            .list_terminal()
            .await
            .into_iter()
            .map(|t| t.task.id.into_inner())
            .collect();
        assert_eq!(terminal, vec!["t2", "t3"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let pools = pools_with(&["t1"]).await;
        pools.assign(&ids(&["t1"]), &NodeId::new("n1")).await.unwrap();

        let task = pools.delete(&TaskId::new("t1")).await.unwrap();
        assert_eq!(task.id, TaskId::new("t1"));
        assert_eq!(occurrences(&pools, "t1").await, 0);

        let err = pools.delete(&TaskId::new("t1")).await.unwrap_err();
        assert_eq!(err.kind(), "NotFound");
    }

    #[tokio::test]
    async fn test_tasks_on_node() {
        let pools = pools_with(&["t1", "t2", "t3", "t4"]).await;
        pools.assign(&ids(&["t1", "t2"]), &NodeId::new("n1")).await.unwrap();
        pools.assign(&ids(&["t3"]), &NodeId::new("n2")).await.unwrap();
        pools.apply_status(&TaskStatus::running("t2")).await;

        let mut on_n1 = pools.tasks_on_node(&NodeId::new("n1")).await;
        on_n1.sort();
        assert_eq!(on_n1, ids(&["t1", "t2"]));
    }

    #[tokio::test]
    async fn test_purge() {
        let pools = pools_with(&["t1", "t2"]).await;
        pools.apply_status(&TaskStatus::finished("t2")).await;
        pools.purge().await;
        assert_eq!(pools.counts().await, PoolCounts::default());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_assign_has_one_winner() {
        for _ in 0..50 {
            let pools = Arc::new(pools_with(&["t1"]).await);
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let pools = Arc::clone(&pools);
                    tokio::spawn(async move {
                        let node = NodeId::new(format!("n{i}"));
                        pools.assign(&ids(&["t1"]), &node).await.map(|_| node)
                    })
                })
                .collect();

            let mut winners = Vec::new();
            for handle in handles {
                match handle.await.unwrap() {
                    Ok(node) => winners.push(node),
                    Err(e) => assert_eq!(e.kind(), "InvalidTransition"),
                }
            }

            assert_eq!(winners.len(), 1);
            assert_eq!(occurrences(&pools, "t1").await, 1);
            let staged = pools.list_staging().await;
            assert_eq!(staged[0].node_id.as_ref(), Some(&winners[0]));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_migrate_and_running_status() {
        for _ in 0..50 {
            let pools = Arc::new(pools_with(&["t1"]).await);
            pools.assign(&ids(&["t1"]), &NodeId::new("n1")).await.unwrap();

            let migrate = {
                let pools = Arc::clone(&pools);
                tokio::spawn(async move { pools.migrate(&ids(&["t1"]), &NodeId::new("n2")).await })
            };
            let status = {
                let pools = Arc::clone(&pools);
                tokio::spawn(async move { pools.apply_status(&TaskStatus::running("t1")).await })
            };

            assert!(migrate.await.unwrap().is_ok());
            assert!(matches!(
                status.await.unwrap(),
                StatusOutcome::Moved {
                    to: PoolKind::Running,
                    ..
                }
            ));

            assert_eq!(occurrences(&pools, "t1").await, 1);
            let pool = pools.find_pool(&TaskId::new("t1")).await.unwrap();
            assert!(matches!(pool, PoolKind::Staging | PoolKind::Running));
            let task = pools.get(&TaskId::new("t1")).await.unwrap();
            assert_eq!(task.node_id, Some(NodeId::new("n2")));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_migrate_and_terminal_status() {
        for _ in 0..50 {
            let pools = Arc::new(pools_with(&["t1"]).await);
            pools.assign(&ids(&["t1"]), &NodeId::new("n1")).await.unwrap();

            let migrate = {
                let pools = Arc::clone(&pools);
                tokio::spawn(async move { pools.migrate(&ids(&["t1"]), &NodeId::new("n2")).await })
            };
            let status = {
                let pools = Arc::clone(&pools);
                tokio::spawn(async move { pools.apply_status(&TaskStatus::finished("t1")).await })
            };

            if let Err(e) = migrate.await.unwrap() {
                assert_eq!(e.kind(), "NotFound");
            }
            assert!(matches!(
                status.await.unwrap(),
                StatusOutcome::Terminated { .. }
            ));

            // Either order ends with the task out of every pool.
            assert_eq!(occurrences(&pools, "t1").await, 0);
            assert_eq!(pools.list_terminal().await.len(), 1);
        }
    }
}
