use axum::body::Bytes;
use reqwest::{Client, Method, Url};
use std::time::Duration;
use taxihub::drivers::protocol::ENDPOINT_DRIVERS;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid driver service url {0}")]
    InvalidUrl(String),
    #[error("invalid path segment {0:?}")]
    InvalidSegment(String),
    #[error("driver service request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// What the driver service answered, relayed to the caller unchanged.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Forwards driver requests to the driver service. No retries.
#[derive(Clone)]
pub struct DriverServiceClient {
    base_url: Url,
    client: Client,
}

impl DriverServiceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub async fn create_driver(
        &self,
        body: &serde_json::Value,
    ) -> Result<UpstreamResponse, UpstreamError> {
        self.forward(Method::POST, &[], None, Some(body)).await
    }

    pub async fn update_driver(
        &self,
        id: &str,
        body: &serde_json::Value,
    ) -> Result<UpstreamResponse, UpstreamError> {
        self.forward(Method::PUT, &[id], None, Some(body)).await
    }

    pub async fn get_driver(&self, id: &str) -> Result<UpstreamResponse, UpstreamError> {
        self.forward(Method::GET, &[id], None, None).await
    }

    /// `query` is the raw query string of the incoming request.
    pub async fn list_drivers(
        &self,
        query: Option<&str>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        self.forward(Method::GET, &[], query, None).await
    }

    pub async fn find_nearby(&self, query: &str) -> Result<UpstreamResponse, UpstreamError> {
        self.forward(Method::GET, &["nearby"], Some(query), None).await
    }

    /// The drivers collection URL with `segments` appended (percent-encoded).
    ///
    /// `.` and `..` are refused: the URL parser would resolve them away.
    fn endpoint(&self, segments: &[&str], query: Option<&str>) -> Result<Url, UpstreamError> {
        if let Some(dot) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(UpstreamError::InvalidSegment(dot.to_string()));
        }

        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(ENDPOINT_DRIVERS.split('/').filter(|s| !s.is_empty()));
            path.extend(segments);
        }
        url.set_query(query.filter(|q| !q.is_empty()));
        Ok(url)
    }

    async fn forward(
        &self,
        method: Method,
        segments: &[&str],
        query: Option<&str>,
        body: Option<&serde_json::Value>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.endpoint(segments, query)?;
        tracing::debug!("Forwarding {} {}", method, url);

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Driver service request {} {} failed: {}", method, url, e);
            UpstreamError::Transport(e)
        })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}
