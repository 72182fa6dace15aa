//! HTTP server for the control plane.
//!
//! Provides endpoints for:
//! - Resource providers (`/rpi/...`)
//! - Task providers (`/tpi/...`)
//! - Schedulers (`/brain/...`)
//! - Test harness reset (`/purge`)
//! - Health check (`/health`)
//! - Prometheus metrics (`/metrics`)

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod error;
mod handlers;
pub mod responses;

pub use error::ApiError;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Resource provider interface
        .route("/rpi/resources", post(handlers::submit_resource))
        .route("/rpi/nodes", get(handlers::rpi_get_nodes))
        .route("/rpi/status", post(handlers::submit_status_update))
        .route("/rpi/nodes/:node_id/lost", post(handlers::report_node_lost))
        // Task provider interface
        .route(
            "/tpi/providers",
            post(handlers::register_task_provider).get(handlers::tpi_get_task_providers),
        )
        .route(
            "/tpi/providers/:provider_id",
            delete(handlers::deregister_task_provider),
        )
        .route("/tpi/providers/:provider_id/tasks", post(handlers::submit_task))
        .route("/tpi/tasks/:task_id", delete(handlers::purge_task))
        // Brain interface
        .route("/brain/nodes", get(handlers::brain_get_nodes))
        .route("/brain/status", get(handlers::get_status_updates))
        .route("/brain/tasks/pending", get(handlers::get_pending_tasks))
        .route("/brain/tasks/staging", get(handlers::get_staging_tasks))
        .route("/brain/tasks/running", get(handlers::get_running_tasks))
        .route("/brain/tasks/terminal", get(handlers::get_terminal_tasks))
        .route("/brain/assign", post(handlers::assign_tasks))
        .route("/brain/migrate", post(handlers::migrate_tasks))
        .route("/brain/providers", get(handlers::brain_get_task_providers))
        // Administration and observability
        .route("/purge", post(handlers::purge))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
