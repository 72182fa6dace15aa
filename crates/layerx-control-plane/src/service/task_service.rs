//! Task provider interface.

use tracing::{info, warn};

use layerx_core::{CoreError, ProviderId, Task, TaskId, TaskProvider};

use crate::state::AppState;

/// Interface used by task providers to register and submit work.
pub struct TaskProviderService<'a> {
    state: &'a AppState,
}

impl<'a> TaskProviderService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn register_task_provider(&self, provider: TaskProvider) -> Result<(), CoreError> {
        self.state.providers.register(provider).await
    }

    pub async fn deregister_task_provider(
        &self,
        provider_id: &ProviderId,
    ) -> Result<TaskProvider, CoreError> {
        self.state.providers.deregister(provider_id).await
    }

    pub async fn get_task_providers(&self) -> Vec<TaskProvider> {
        self.state.providers.list().await
    }

    /// Submit a task into Pending under a registered provider.
    pub async fn submit_task(
        &self,
        provider_id: &ProviderId,
        task: Task,
    ) -> Result<Task, CoreError> {
        let provider = match self.state.providers.get(provider_id).await {
            Ok(provider) => provider,
            Err(CoreError::NotFound { .. }) => {
                warn!(provider_id = %provider_id, task_id = %task.id, "Task from unknown provider");
                return Err(CoreError::UnknownProvider(provider_id.clone()));
            }
            Err(e) => return Err(e),
        };
        self.state.pools.submit(task, provider).await
    }

    /// Remove a task from whichever pool holds it.
    pub async fn purge_task(&self, task_id: &TaskId) -> Result<Task, CoreError> {
        let pool = self.state.pools.find_pool(task_id).await?;
        let task = self.state.pools.delete(task_id).await?;
        info!(task_id = %task_id, pool = %pool, "Task purged");
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerx_core::{NodeId, PoolKind, Resource};

    #[tokio::test]
    async fn test_submit_requires_registration() {
        let state = AppState::new();
        let tpi = state.task_provider();

        let err = tpi
            .submit_task(&ProviderId::new("p1"), Task::new("t1", "name", "cmd"))
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::UnknownProvider(ProviderId::new("p1")));
        assert!(state.pools.list_pending().await.is_empty());
    }

    #[tokio::test]
    async fn test_submit_attaches_provider() {
        let state = AppState::new();
        let tpi = state.task_provider();
        let provider = TaskProvider::new("fake_task_provider_id", "taskprovider@tphost:port");
        tpi.register_task_provider(provider.clone()).await.unwrap();
        tpi.submit_task(&provider.id, Task::new("t1", "fake_task_name", "echo FAKE_COMMAND"))
            .await
            .unwrap();

        let pending = state.pools.list_pending().await;
        assert_eq!(pending[0].provider, Some(provider.clone()));

        let stored = tpi
            .submit_task(&provider.id, Task::new("t2", "other", "true"))
            .await
            .unwrap();
        assert_eq!(stored.provider, Some(provider));
        assert!(stored.node_id.is_none());
        assert_eq!(state.pools.get(&stored.id).await.unwrap(), stored);
    }

    #[tokio::test]
    async fn test_duplicate_submission() {
        let state = AppState::new();
        let tpi = state.task_provider();
        tpi.register_task_provider(TaskProvider::new("p1", "p@h:1"))
            .await
            .unwrap();
        let p1 = ProviderId::new("p1");
        tpi.submit_task(&p1, Task::new("t1", "a", "cmd")).await.unwrap();

        let err = tpi
            .submit_task(&p1, Task::new("t1", "b", "cmd"))
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::DuplicateTask(TaskId::new("t1"), PoolKind::Pending));
    }

    #[tokio::test]
    async fn test_purge_task_from_staging() {
        let state = AppState::new();
        let tpi = state.task_provider();
        tpi.register_task_provider(TaskProvider::new("p1", "p@h:1"))
            .await
            .unwrap();
        tpi.submit_task(&ProviderId::new("p1"), Task::new("t1", "a", "cmd"))
            .await
            .unwrap();
        state
            .inventory
            .submit_resource(Resource::new("r1", "n1"))
            .await
            .unwrap();
        state
            .brain()
            .assign_tasks(&NodeId::new("n1"), &[TaskId::new("t1")])
            .await
            .unwrap();

        let purged = tpi.purge_task(&TaskId::new("t1")).await.unwrap();
        assert_eq!(purged.node_id, Some(NodeId::new("n1")));
        assert!(state.pools.list_staging().await.is_empty());

        let err = tpi.purge_task(&TaskId::new("t1")).await.unwrap_err();
        assert_eq!(err.kind(), "NotFound");
    }

    #[tokio::test]
    async fn test_deregister_keeps_tasks() {
        let state = AppState::new();
        let tpi = state.task_provider();
        tpi.register_task_provider(TaskProvider::new("p1", "p@h:1"))
            .await
            .unwrap();
        tpi.submit_task(&ProviderId::new("p1"), Task::new("t1", "a", "cmd"))
            .await
            .unwrap();

        tpi.deregister_task_provider(&ProviderId::new("p1"))
            .await
            .unwrap();
        assert!(tpi.get_task_providers().await.is_empty());
        assert_eq!(state.pools.list_pending().await.len(), 1);
    }
}
