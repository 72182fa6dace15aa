//! Task provider interface client.

use layerx_core::{ProviderId, Task, TaskId, TaskProvider};

use crate::error::ClientError;
use crate::http::HttpClient;

/// Client used by task providers to register and submit work.
#[derive(Debug, Clone)]
pub struct TpiClient {
    http: HttpClient,
}

impl TpiClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn register_task_provider(
        &self,
        provider: &TaskProvider,
    ) -> Result<TaskProvider, ClientError> {
        self.http.post_json(&["tpi", "providers"], provider).await
    }

    pub async fn deregister_task_provider(
        &self,
        provider_id: &ProviderId,
    ) -> Result<TaskProvider, ClientError> {
        self.http
            .delete_json(&["tpi", "providers", provider_id.as_str()])
            .await
    }

    pub async fn get_task_providers(&self) -> Result<Vec<TaskProvider>, ClientError> {
        self.http.get_json(&["tpi", "providers"]).await
    }

    /// Submit a task; it enters the Pending pool stamped with the provider.
    pub async fn submit_task(
        &self,
        provider_id: &ProviderId,
        task: &Task,
    ) -> Result<Task, ClientError> {
        self.http
            .post_json(&["tpi", "providers", provider_id.as_str(), "tasks"], task)
            .await
    }

    /// Remove a task from whichever pool holds it.
    pub async fn purge_task(&self, task_id: &TaskId) -> Result<Task, ClientError> {
        self.http
            .delete_json(&["tpi", "tasks", task_id.as_str()])
            .await
    }
}
