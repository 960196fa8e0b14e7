//! HTTP transport used by the load tester.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Methods the scenario uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Upper-case method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Status and body text of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// The request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Sends one request and reads the whole response.
#[async_trait(?Send)]
pub trait ApiTransport {
    /// Send `method` to `url`, with `body` as JSON when present.
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> Result<TransportResponse, TransportError>;
}

/// `reqwest`-backed transport with a per-request timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TransportError::new(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { client })
    }
}

#[async_trait(?Send)]
impl ApiTransport for ReqwestTransport {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> Result<TransportResponse, TransportError> {
        let request = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|err| TransportError::new(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::new(err.to_string()))?;
        Ok(TransportResponse { status, body })
    }
}
