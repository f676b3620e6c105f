//! Transport layer for JSON-RPC communication
//!
//! One call is one HTTP POST to the configured endpoint. The [`Transport`]
//! trait is the seam between envelope handling and the network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use tracing::{debug, trace};

use crate::jsonrpc::CallContext;
use crate::{RpcError, RpcResult, TransportFailure};

/// Transport trait for carrying one serialized request to the remote end
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `body` and return the raw reply body.
    ///
    /// Exactly one exchange is made. Cancellation of `ctx` aborts it.
    async fn exchange(&self, ctx: &CallContext, body: Vec<u8>) -> RpcResult<Vec<u8>>;

    /// The URL requests are posted to
    fn endpoint(&self) -> &str;
}

/// HTTP transport posting JSON bodies with `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport with a default HTTP client.
    ///
    /// The endpoint is validated lazily: a malformed URL surfaces as a
    /// request construction error on the first call.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Create a transport around an existing HTTP client
    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Create a transport whose HTTP client enforces a per-request timeout
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> RpcResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RpcError::request_construction(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(http, endpoint))
    }

    fn url(&self) -> RpcResult<Url> {
        Url::parse(&self.endpoint).map_err(|e| {
            RpcError::request_construction(format!("Invalid endpoint URL '{}': {}", self.endpoint, e))
        })
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    async fn post(&self, url: Url, body: Vec<u8>) -> RpcResult<Vec<u8>> {
        let response = self
            .http
            .post(url)
            .headers(Self::headers())
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        // The body is consumed here; on cancellation the response is
        // dropped with the future, releasing the connection either way.
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        trace!("Read {} response bytes", bytes.len());

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn exchange(&self, ctx: &CallContext, body: Vec<u8>) -> RpcResult<Vec<u8>> {
        let url = self.url()?;
        debug!(endpoint = %self.endpoint, bytes = body.len(), "Posting JSON-RPC request");
        ctx.run(self.post(url, body)).await
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn map_reqwest_error(error: reqwest::Error) -> RpcError {
    if error.is_builder() {
        RpcError::request_construction(error.to_string())
    } else if error.is_timeout() {
        RpcError::transport(TransportFailure::TimedOut, error.to_string())
    } else {
        RpcError::transport(TransportFailure::Network, error.to_string())
    }
}
