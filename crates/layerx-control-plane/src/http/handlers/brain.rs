//! Brain (scheduler) handlers.

use std::sync::Arc;

use axum::{extract::State, Json};

use layerx_core::{Node, Task, TaskProvider, TaskStatus};

use crate::http::responses::TaskPlacementRequest;
use crate::http::ApiError;
use crate::pool::TerminatedTask;
use crate::state::AppState;

pub async fn brain_get_nodes(State(state): State<Arc<AppState>>) -> Json<Vec<Node>> {
    Json(state.brain().get_nodes().await)
}

/// Drain queued status updates.
pub async fn get_status_updates(State(state): State<Arc<AppState>>) -> Json<Vec<TaskStatus>> {
    Json(state.brain().get_status_updates().await)
}

pub async fn get_pending_tasks(State(state): State<Arc<AppState>>) -> Json<Vec<Task>> {
    Json(state.brain().get_pending_tasks().await)
}

pub async fn get_staging_tasks(State(state): State<Arc<AppState>>) -> Json<Vec<Task>> {
    Json(state.brain().get_staging_tasks().await)
}

pub async fn get_running_tasks(State(state): State<Arc<AppState>>) -> Json<Vec<Task>> {
    Json(state.brain().get_running_tasks().await)
}

pub async fn get_terminal_tasks(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<TerminatedTask>> {
    Json(state.brain().get_terminal_tasks().await)
}

pub async fn brain_get_task_providers(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<TaskProvider>> {
    Json(state.brain().get_task_providers().await)
}

/// Assign Pending tasks to a node.
pub async fn assign_tasks(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TaskPlacementRequest>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let staged = state
        .brain()
        .assign_tasks(&req.node_id, &req.task_ids)
        .await?;
    Ok(Json(staged))
}

/// Migrate Staging or Running tasks to a node.
pub async fn migrate_tasks(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TaskPlacementRequest>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let staged = state
        .brain()
        .migrate_tasks(&req.node_id, &req.task_ids)
        .await?;
    Ok(Json(staged))
}
