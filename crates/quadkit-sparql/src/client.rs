//! Endpoint connection settings and the shared HTTP client.

use std::fmt;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};

use quadkit_core::config::SparqlConfig;

/// Errors from SPARQL requests.
#[derive(Debug, thiserror::Error)]
pub enum SparqlError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Connection to {endpoint} failed: {message}")]
    Connection { endpoint: String, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid SPARQL results: {0}")]
    InvalidResponse(String),
}

impl SparqlError {
    /// HTTP status for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Client for one SPARQL endpoint.
///
/// Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct SparqlClient {
    http: Client,
    endpoint: String,
    username: Option<String>,
    password: Option<String>,
    timeout_secs: u64,
}

impl fmt::Debug for SparqlClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparqlClient")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SparqlClient {
    /// Build a client with the configured per-request timeout.
    pub fn new(config: &SparqlConfig) -> Result<Self, SparqlError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SparqlError::Client(e.to_string()))?;

        tracing::debug!(endpoint = %config.endpoint, timeout_secs = config.timeout_secs, "SPARQL client ready");

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a SPARQL 1.1 Update. Only HTTP 200 counts as success; the
    /// response body is returned.
    pub async fn update(&self, update: &str) -> Result<String, SparqlError> {
        self.post("application/sparql-update", None, update).await
    }

    /// POST `body` to the endpoint and return the response text.
    pub(crate) async fn post(
        &self,
        content_type: &str,
        accept: Option<&str>,
        body: &str,
    ) -> Result<String, SparqlError> {
        let mut req = self
            .authorize(self.http.post(&self.endpoint))
            .header(CONTENT_TYPE, content_type)
            .body(body.to_string());
        if let Some(accept) = accept {
            req = req.header(ACCEPT, accept);
        }

        let resp = req.send().await.map_err(|e| self.map_network_error(e))?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| self.map_network_error(e))?;

        if status == StatusCode::OK {
            Ok(text)
        } else {
            Err(SparqlError::Status {
                status: status.as_u16(),
                body: text,
            })
        }
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.username {
            Some(user) => req.basic_auth(user, self.password.as_deref()),
            None => req,
        }
    }

    fn map_network_error(&self, e: reqwest::Error) -> SparqlError {
        if e.is_timeout() {
            SparqlError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else if e.is_connect() {
            SparqlError::Connection {
                endpoint: self.endpoint.clone(),
                message: e.to_string(),
            }
        } else {
            SparqlError::Network(e.to_string())
        }
    }
}
