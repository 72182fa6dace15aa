//! Task provider handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use layerx_core::{ProviderId, Task, TaskId, TaskProvider};

use crate::http::ApiError;
use crate::state::AppState;

/// Register a task provider.
pub async fn register_task_provider(
    State(state): State<Arc<AppState>>,
    Json(provider): Json<TaskProvider>,
) -> Result<Json<TaskProvider>, ApiError> {
    state
        .task_provider()
        .register_task_provider(provider.clone())
        .await?;
    Ok(Json(provider))
}

/// List task providers.
pub async fn tpi_get_task_providers(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<TaskProvider>> {
    Json(state.task_provider().get_task_providers().await)
}

/// Deregister a task provider.
pub async fn deregister_task_provider(
    State(state): State<Arc<AppState>>,
    Path(provider_id): Path<String>,
) -> Result<Json<TaskProvider>, ApiError> {
    let removed = state
        .task_provider()
        .deregister_task_provider(&ProviderId::new(provider_id))
        .await?;
    Ok(Json(removed))
}

/// Submit a task under a provider.
pub async fn submit_task(
    State(state): State<Arc<AppState>>,
    Path(provider_id): Path<String>,
    Json(task): Json<Task>,
) -> Result<Json<Task>, ApiError> {
    let stored = state
        .task_provider()
        .submit_task(&ProviderId::new(provider_id), task)
        .await?;
    Ok(Json(stored))
}

/// Remove a task from whichever pool holds it.
pub async fn purge_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .task_provider()
        .purge_task(&TaskId::new(task_id))
        .await?;
    Ok(Json(task))
}
