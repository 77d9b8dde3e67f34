//! Client for the user-management REST API.
//!
//! [`UserClient`] validates arguments, builds the request (see
//! [`request`]), hands it to a [`Transport`], and decodes the JSON reply.
//! Invalid arguments are rejected before anything is sent; non-2xx
//! responses and undecodable bodies surface as their own error variants.

pub mod request;
pub mod transport;

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{Instrument, debug, info_span};

use crate::config::Config;
use crate::models::{AuthToken, AuthoritySet, Credentials, NewUser, PageableQuery, User, UserList};

pub use request::{ApiRequest, Method};
pub use transport::{ApiResponse, HttpTransport, Transport};

/// Longest response body excerpt included in an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Errors from the user API client.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("failed to encode request body: {0}")]
    Encode(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("server returned HTTP {status}{}", body_excerpt(.body))]
    RequestFailed { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

fn body_excerpt(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return String::new();
    }
    let excerpt: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    if excerpt.len() < body.len() {
        format!(": {excerpt}…")
    } else {
        format!(": {excerpt}")
    }
}

/// Turn a raw response into a typed payload.
pub fn decode_response<T: DeserializeOwned>(response: ApiResponse) -> Result<T, ClientError> {
    if !response.is_success() {
        return Err(ClientError::RequestFailed {
            status: response.status,
            body: response.body,
        });
    }
    serde_json::from_str(&response.body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// User API client.
///
/// Cheap to clone; clones share the underlying transport.
#[derive(Clone)]
pub struct UserClient {
    transport: Arc<dyn Transport>,
    authorities: AuthoritySet,
}

impl UserClient {
    pub fn new(transport: Arc<dyn Transport>, authorities: AuthoritySet) -> Self {
        Self {
            transport,
            authorities,
        }
    }

    /// Build a client over [`HttpTransport`] from resolved configuration.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(
            &config.api.base_url,
            Duration::from_secs(config.api.timeout_secs),
        )?;
        Ok(Self::new(Arc::new(transport), config.authority.clone()))
    }

    /// `GET /users`, paged when a complete query is given.
    pub async fn list_users(&self, query: Option<&PageableQuery>) -> Result<UserList, ClientError> {
        let request = request::list_users(query)?;
        self.send(request).await
    }

    /// `GET /users/{id}`.
    pub async fn get_user(&self, id: i64) -> Result<User, ClientError> {
        self.send(request::get_user(id)).await
    }

    /// `POST /users`.
    pub async fn create_user(&self, user: &NewUser) -> Result<User, ClientError> {
        let request = request::create_user(user, &self.authorities)?;
        self.send(request).await
    }

    /// `POST /users/authenticate`.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken, ClientError> {
        let request = request::authenticate(credentials)?;
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let span = info_span!(
            "userctl.request",
            http.method = %request.method,
            path = %request.path
        );

        async move {
            debug!("sending request");
            let response = self.transport.execute(request).await?;
            debug!(status = response.status, "received response");
            decode_response(response)
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for UserClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserClient")
            .field("authorities", &self.authorities)
            .finish_non_exhaustive()
    }
}
