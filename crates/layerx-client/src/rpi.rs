//! Resource provider interface client.

use layerx_core::{Node, NodeId, Resource, TaskStatus};

use crate::error::ClientError;
use crate::http::HttpClient;
use crate::types::{NodeLostResponse, StatusUpdateResponse};

/// Client used by resource providers to report capacity and task status.
#[derive(Debug, Clone)]
pub struct RpiClient {
    http: HttpClient,
}

impl RpiClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Offer a resource; the node is created on first sight.
    pub async fn submit_resource(&self, resource: &Resource) -> Result<Resource, ClientError> {
        self.http.post_json(&["rpi", "resources"], resource).await
    }

    pub async fn get_nodes(&self) -> Result<Vec<Node>, ClientError> {
        self.http.get_json(&["rpi", "nodes"]).await
    }

    /// Push a status update observed on a node.
    pub async fn submit_status_update(
        &self,
        status: &TaskStatus,
    ) -> Result<StatusUpdateResponse, ClientError> {
        self.http.post_json(&["rpi", "status"], status).await
    }

    /// Report that a node stopped responding.
    pub async fn report_node_lost(&self, node_id: &NodeId) -> Result<NodeLostResponse, ClientError> {
        self.http
            .post_empty(&["rpi", "nodes", node_id.as_str(), "lost"])
            .await
    }
}
