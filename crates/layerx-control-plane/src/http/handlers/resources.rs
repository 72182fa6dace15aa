//! Resource provider handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use layerx_core::{Node, NodeId, Resource, TaskStatus};

use crate::http::responses::{NodeLostResponse, StatusUpdateResponse};
use crate::http::ApiError;
use crate::state::AppState;

/// Submit a resource offered by a node.
pub async fn submit_resource(
    State(state): State<Arc<AppState>>,
    Json(resource): Json<Resource>,
) -> Result<Json<Resource>, ApiError> {
    state
        .resource_provider()
        .submit_resource(resource.clone())
        .await?;
    Ok(Json(resource))
}

/// List nodes.
pub async fn rpi_get_nodes(State(state): State<Arc<AppState>>) -> Json<Vec<Node>> {
    Json(state.resource_provider().get_nodes().await)
}

/// Push a task status update.
pub async fn submit_status_update(
    State(state): State<Arc<AppState>>,
    Json(status): Json<TaskStatus>,
) -> Json<StatusUpdateResponse> {
    let outcome = state.resource_provider().submit_status_update(status).await;
    Json(outcome.into())
}

/// Report a lost node.
pub async fn report_node_lost(
    State(state): State<Arc<AppState>>,
    Path(node_id): Path<String>,
) -> Result<Json<NodeLostResponse>, ApiError> {
    let node_id = NodeId::new(node_id);
    let task_ids = state.resource_provider().report_node_lost(&node_id).await?;
    Ok(Json(NodeLostResponse { node_id, task_ids }))
}
