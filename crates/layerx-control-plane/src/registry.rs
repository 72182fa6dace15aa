//! Registry of task providers.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::info;

use layerx_core::{CoreError, ProviderId, TaskProvider};

/// Owns the identities of registered task providers.
#[derive(Default)]
pub struct TaskProviderRegistry {
    providers: RwLock<HashMap<ProviderId, TaskProvider>>,
}

impl TaskProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider.
    ///
    /// Idempotent for the same id and source; a different source for an
    /// existing id is a [`CoreError::Conflict`].
    pub async fn register(&self, provider: TaskProvider) -> Result<(), CoreError> {
        if provider.id.is_blank() {
            return Err(CoreError::InvalidInput(
                "task provider id is required".to_string(),
            ));
        }

        let mut providers = self.providers.write().await;
        if let Some(existing) = providers.get(&provider.id) {
            if existing.source != provider.source {
                return Err(CoreError::Conflict {
                    id: provider.id,
                    existing: existing.source.clone(),
                    requested: provider.source,
                });
            }
            return Ok(());
        }

        info!(provider_id = %provider.id, source = %provider.source, "Task provider registered");
        providers.insert(provider.id.clone(), provider);
        Ok(())
    }

    /// Get a registered provider.
    pub async fn get(&self, id: &ProviderId) -> Result<TaskProvider, CoreError> {
        self.providers
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Task provider", id))
    }

    /// Remove a provider. Tasks it already submitted are untouched.
    pub async fn deregister(&self, id: &ProviderId) -> Result<TaskProvider, CoreError> {
        let removed = self
            .providers
            .write()
            .await
            .remove(id)
            .ok_or_else(|| CoreError::not_found("Task provider", id))?;
        info!(provider_id = %id, "Task provider deregistered");
        Ok(removed)
    }

    /// Snapshot of all registered providers.
    pub async fn list(&self) -> Vec<TaskProvider> {
        self.providers.read().await.values().cloned().collect()
    }

    /// Number of registered providers.
    pub async fn len(&self) -> usize {
        self.providers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.providers.read().await.is_empty()
    }

    pub async fn purge(&self) {
        self.providers.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_and_get() {
        let registry = TaskProviderRegistry::new();
        let provider = TaskProvider::new("p1", "p@h:1");
        registry.register(provider.clone()).await.unwrap();

        assert_eq!(registry.get(&ProviderId::new("p1")).await.unwrap(), provider);
    }

    #[tokio::test]
    async fn test_reregister_same_source_is_idempotent() {
        let registry = TaskProviderRegistry::new();
        registry.register(TaskProvider::new("p1", "p@h:1")).await.unwrap();
        registry.register(TaskProvider::new("p1", "p@h:1")).await.unwrap();
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_reregister_different_source_conflicts() {
        let registry = TaskProviderRegistry::new();
        registry.register(TaskProvider::new("p1", "p@h:1")).await.unwrap();

        let err = registry
            .register(TaskProvider::new("p1", "p@h:2"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "Conflict");

        // Original registration is unchanged
        let provider = registry.get(&ProviderId::new("p1")).await.unwrap();
        assert_eq!(provider.source, "p@h:1");
    }

    #[tokio::test]
    async fn test_get_unregistered() {
        let registry = TaskProviderRegistry::new();
        let err = registry.get(&ProviderId::new("ghost")).await.unwrap_err();
        assert_eq!(err.kind(), "NotFound");
    }

    #[tokio::test]
    async fn test_deregister() {
        let registry = TaskProviderRegistry::new();
        registry.register(TaskProvider::new("p1", "p@h:1")).await.unwrap();
        registry.deregister(&ProviderId::new("p1")).await.unwrap();
        assert!(registry.is_empty().await);

        let err = registry.deregister(&ProviderId::new("p1")).await.unwrap_err();
        assert_eq!(err.kind(), "NotFound");
    }
}
