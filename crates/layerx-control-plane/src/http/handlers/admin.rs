//! Administrative handlers.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use tracing::warn;

use crate::state::AppState;

/// Reset all state. Intended for test harnesses only.
pub async fn purge(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    warn!("Purge requested over HTTP");
    state.purge().await;
    Json(serde_json::json!({ "status": "purged" }))
}
