//! HTTP request handlers.

mod admin;
mod brain;
mod health;
mod resources;
mod tasks;

pub use admin::purge;
pub use brain::{
    assign_tasks, brain_get_nodes, brain_get_task_providers, get_pending_tasks,
    get_running_tasks, get_staging_tasks, get_status_updates, get_terminal_tasks, migrate_tasks,
};
pub use health::{health_check, metrics_handler};
pub use resources::{report_node_lost, rpi_get_nodes, submit_resource, submit_status_update};
pub use tasks::{
    deregister_task_provider, purge_task, register_task_provider, submit_task,
    tpi_get_task_providers,
};
