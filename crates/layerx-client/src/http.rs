//! HTTP client for the control plane REST endpoints.

use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::ClientError;
use crate::types::ErrorResponse;

/// HTTP client shared by the interface clients.
///
/// Endpoints are addressed by path segments, e.g. `&["tpi", "tasks", id]`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the control plane is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let url = self.url(&["health"])?;
        debug!(url = %url, "Checking health");

        let response = self.inner.get(url).send().await?;
        Ok(response.status().is_success())
    }

    /// Get JSON from an endpoint.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T, ClientError> {
        let url = self.url(path)?;
        debug!(url = %url, "GET request");
        self.send(self.inner.get(url)).await
    }

    /// Post a JSON body and decode the JSON reply.
    pub async fn post_json<B, T>(&self, path: &[&str], body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        debug!(url = %url, "POST request");
        self.send(self.inner.post(url).json(body)).await
    }

    /// Post without a body and decode the JSON reply.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T, ClientError> {
        let url = self.url(path)?;
        debug!(url = %url, "POST request");
        self.send(self.inner.post(url)).await
    }

    /// Delete a resource and decode the JSON reply.
    pub async fn delete_json<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T, ClientError> {
        let url = self.url(path)?;
        debug!(url = %url, "DELETE request");
        self.send(self.inner.delete(url)).await
    }

    /// Build an endpoint URL. Each segment is percent-encoded on its own,
    /// so ids containing `/`, `?` or `#` stay a single path segment.
    pub fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let (kind, message) = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(err) => (err.kind, err.error),
            Err(_) => ("Unknown".to_string(), body),
        };
        return Err(ClientError::Api {
            status: status.as_u16(),
            kind,
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| ClientError::Serialization(e.to_string()))
}
