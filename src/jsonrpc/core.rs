//! The generic call primitive

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::context::CallContext;
use super::protocol::{RpcRequest, RpcResponse};
use super::transport::{HttpTransport, Transport};
use crate::RpcResult;

/// Issues typed calls against one endpoint.
///
/// Knows nothing about sessions or surveys: callers supply the method, the
/// positional parameters and the shape of the result.
pub struct RpcClient {
    transport: Box<dyn Transport>,
}

impl RpcClient {
    /// Create a client posting to `endpoint` over HTTP
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_transport(Box::new(HttpTransport::new(endpoint)))
    }

    /// Create a client over an arbitrary transport
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    /// The endpoint the transport posts to
    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// Call `method` with positional `params` and decode the result as `R`.
    ///
    /// One exchange is made per call. A non-null `error` member in the reply
    /// is returned as [`crate::RpcError::Remote`]; unknown top-level members
    /// are a [`crate::RpcError::Decode`].
    pub async fn call<P, R>(&self, ctx: &CallContext, method: &str, params: &P) -> RpcResult<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = RpcRequest::new(method, params)?;
        let body = request.to_body()?;

        debug!(method, params = request.params.len(), "Calling remote method");

        let reply = self.transport.exchange(ctx, body).await?;
        let response = RpcResponse::decode(&reply)?;

        if response.is_error() {
            warn!(method, error = %response.error, "Remote method reported an error");
        } else {
            debug!(method, id = ?response.id, "Remote method succeeded");
        }

        response.into_result()
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("endpoint", &self.endpoint())
            .finish_non_exhaustive()
    }
}
