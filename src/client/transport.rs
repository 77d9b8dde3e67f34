//! Transport seam between the client and the network.
//!
//! [`UserClient`](super::UserClient) only ever talks to a [`Transport`].
//! Production code uses [`HttpTransport`] (reqwest); tests substitute a
//! recording implementation.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::ClientError;
use super::request::{ApiRequest, Method};
use crate::constants::USER_AGENT;

/// Status and raw body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends an [`ApiRequest`] and returns the response, whatever its status.
///
/// Implementations only fail when no response was obtained; mapping
/// non-2xx statuses to errors is the client's job.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

/// reqwest-backed transport rooted at a base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport for `base_url`.
    ///
    /// The base URL may carry a path prefix (`https://host/api`); request
    /// paths are appended to it rather than resolved against it.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = parse_base_url(base_url)?;
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Absolute URL for a request path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Validate a base URL and normalise it to have no trailing slash.
fn parse_base_url(raw: &str) -> Result<String, ClientError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ClientError::InvalidBaseUrl(format!("{raw}: {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ClientError::InvalidBaseUrl(format!(
                "{raw}: unsupported scheme {other}"
            )));
        }
    }
    if url.host().is_none() {
        return Err(ClientError::InvalidBaseUrl(format!("{raw}: no host specified")));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ClientError::InvalidBaseUrl(format!(
            "{raw}: must not contain a query or fragment"
        )));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = self.endpoint(&request.path);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Transport(format!("{} {url}: request timed out", request.method))
            } else {
                ClientError::Transport(format!("{} {url}: {e}", request.method))
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(format!("{} {url}: failed to read body: {e}", request.method)))?;

        Ok(ApiResponse { status, body })
    }
}
