//! Prometheus metrics collection and formatting.
//!
//! This module provides metrics in Prometheus text exposition format.

use std::fmt::Write;
use std::sync::Arc;

use crate::state::AppState;

/// Collect all metrics from AppState and format as Prometheus text.
pub async fn collect_metrics(state: &Arc<AppState>) -> String {
    let mut output = String::new();

    collect_inventory_metrics(state, &mut output).await;
    collect_capacity_metrics(state, &mut output).await;
    collect_task_metrics(state, &mut output).await;
    collect_status_metrics(state, &mut output).await;

    output
}

/// Collect node, resource and provider counts.
async fn collect_inventory_metrics(state: &Arc<AppState>, output: &mut String) {
    let nodes = state.inventory.node_count().await;
    let resources = state.inventory.resource_count().await;
    let providers = state.providers.len().await;

    writeln!(output, "# HELP layerx_nodes_total Number of known nodes").ok();
    writeln!(output, "# TYPE layerx_nodes_total gauge").ok();
    writeln!(output, "layerx_nodes_total {nodes}").ok();

    writeln!(output).ok();
    writeln!(
        output,
        "# HELP layerx_resources_total Number of resources across all nodes"
    )
    .ok();
    writeln!(output, "# TYPE layerx_resources_total gauge").ok();
    writeln!(output, "layerx_resources_total {resources}").ok();

    writeln!(output).ok();
    writeln!(
        output,
        "# HELP layerx_task_providers_total Number of registered task providers"
    )
    .ok();
    writeln!(output, "# TYPE layerx_task_providers_total gauge").ok();
    writeln!(output, "layerx_task_providers_total {providers}").ok();
}

/// Collect offered capacity per node.
async fn collect_capacity_metrics(state: &Arc<AppState>, output: &mut String) {
    let mut nodes = state.inventory.get_nodes().await;
    nodes.sort_by(|a, b| a.id.cmp(&b.id));

    writeln!(output).ok();
    writeln!(
        output,
        "# HELP layerx_node_capacity Capacity offered by a node, summed over its resources"
    )
    .ok();
    writeln!(output, "# TYPE layerx_node_capacity gauge").ok();
    for node in &nodes {
        for (kind, value) in [
            ("cpus", node.total_cpus()),
            ("mem", node.total_mem()),
            ("disk", node.total_disk()),
        ] {
            writeln!(
                output,
                "layerx_node_capacity{{node=\"{}\",resource=\"{kind}\"}} {value}",
                node.id
            )
            .ok();
        }
    }
}

/// Collect task counts by pool.
async fn collect_task_metrics(state: &Arc<AppState>, output: &mut String) {
    let counts = state.pools.counts().await;

    writeln!(output).ok();
    writeln!(output, "# HELP layerx_tasks Number of tasks by pool").ok();
    writeln!(output, "# TYPE layerx_tasks gauge").ok();
    writeln!(output, "layerx_tasks{{pool=\"pending\"}} {}", counts.pending).ok();
    writeln!(output, "layerx_tasks{{pool=\"staging\"}} {}", counts.staging).ok();
    writeln!(output, "layerx_tasks{{pool=\"running\"}} {}", counts.running).ok();

    writeln!(output).ok();
    writeln!(
        output,
        "# HELP layerx_tasks_terminated_retained Terminated tasks kept for inspection"
    )
    .ok();
    writeln!(output, "# TYPE layerx_tasks_terminated_retained gauge").ok();
    writeln!(
        output,
        "layerx_tasks_terminated_retained {}",
        counts.terminated
    )
    .ok();
}

/// Collect status queue depth.
async fn collect_status_metrics(state: &Arc<AppState>, output: &mut String) {
    let queued = state.status_updates.len().await;

    writeln!(output).ok();
    writeln!(
        output,
        "# HELP layerx_status_updates_queued Status updates waiting to be drained"
    )
    .ok();
    writeln!(output, "# TYPE layerx_status_updates_queued gauge").ok();
    writeln!(output, "layerx_status_updates_queued {queued}").ok();
}
