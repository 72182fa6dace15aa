//! Brain (scheduler) interface client.

use layerx_core::{Node, NodeId, Task, TaskId, TaskProvider, TaskStatus};

use crate::error::ClientError;
use crate::http::HttpClient;
use crate::types::{TaskPlacementRequest, TerminatedTask};

/// Client used by schedulers to read cluster state and place tasks.
#[derive(Debug, Clone)]
pub struct BrainClient {
    http: HttpClient,
}

impl BrainClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn get_nodes(&self) -> Result<Vec<Node>, ClientError> {
        self.http.get_json(&["brain", "nodes"]).await
    }

    /// Drain queued status updates. Each update is returned once.
    pub async fn get_status_updates(&self) -> Result<Vec<TaskStatus>, ClientError> {
        self.http.get_json(&["brain", "status"]).await
    }

    pub async fn get_pending_tasks(&self) -> Result<Vec<Task>, ClientError> {
        self.http.get_json(&["brain", "tasks", "pending"]).await
    }

    pub async fn get_staging_tasks(&self) -> Result<Vec<Task>, ClientError> {
        self.http.get_json(&["brain", "tasks", "staging"]).await
    }

    pub async fn get_running_tasks(&self) -> Result<Vec<Task>, ClientError> {
        self.http.get_json(&["brain", "tasks", "running"]).await
    }

    pub async fn get_terminal_tasks(&self) -> Result<Vec<TerminatedTask>, ClientError> {
        self.http.get_json(&["brain", "tasks", "terminal"]).await
    }

    pub async fn get_task_providers(&self) -> Result<Vec<TaskProvider>, ClientError> {
        self.http.get_json(&["brain", "providers"]).await
    }

    /// Move Pending tasks to Staging on `node_id`. All or nothing.
    pub async fn assign_tasks(
        &self,
        node_id: &NodeId,
        task_ids: &[TaskId],
    ) -> Result<Vec<Task>, ClientError> {
        let req = TaskPlacementRequest {
            node_id: node_id.clone(),
            task_ids: task_ids.to_vec(),
        };
        self.http.post_json(&["brain", "assign"], &req).await
    }

    /// Move Staging or Running tasks to Staging on `node_id`. All or nothing.
    pub async fn migrate_tasks(
        &self,
        node_id: &NodeId,
        task_ids: &[TaskId],
    ) -> Result<Vec<Task>, ClientError> {
        let req = TaskPlacementRequest {
            node_id: node_id.clone(),
            task_ids: task_ids.to_vec(),
        };
        self.http.post_json(&["brain", "migrate"], &req).await
    }

    /// Reset all control plane state.
    pub async fn purge(&self) -> Result<(), ClientError> {
        let _: serde_json::Value = self.http.post_empty(&["purge"]).await?;
        Ok(())
    }
}
