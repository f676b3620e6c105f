//! Session-aware LimeSurvey client

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::jsonrpc::{
    CallContext, RpcClient, Transport, GET_SESSION_KEY, LIST_SURVEYS, RELEASE_SESSION_KEY,
};
use crate::models::SurveySummary;
use crate::RpcResult;

/// Client for one RemoteControl endpoint holding the current session key.
///
/// Methods that change the key take `&mut self`. To share one client
/// between tasks wrap it in a `tokio::sync::Mutex`; otherwise give each
/// task its own client.
#[derive(Debug)]
pub struct SurveyClient {
    rpc: RpcClient,
    session_key: String,
}

impl SurveyClient {
    /// Create an unauthenticated client for `endpoint`
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::from_rpc(RpcClient::new(endpoint))
    }

    /// Create a client over a custom transport (timeouts, proxies, tests)
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self::from_rpc(RpcClient::with_transport(transport))
    }

    pub fn from_rpc(rpc: RpcClient) -> Self {
        Self {
            rpc,
            session_key: String::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        self.rpc.endpoint()
    }

    /// The current session key; empty until [`authenticate`](Self::authenticate) succeeds
    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    pub fn is_authenticated(&self) -> bool {
        !self.session_key.is_empty()
    }

    /// The underlying call primitive, for methods without a typed wrapper
    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    /// Obtain a session key for `username`.
    ///
    /// On success the key replaces any previous one. On failure the previous
    /// key is kept and the error is returned as is.
    pub async fn authenticate(
        &mut self,
        ctx: &CallContext,
        username: &str,
        password: &str,
    ) -> RpcResult<()> {
        let key: String = self
            .rpc
            .call(ctx, GET_SESSION_KEY, &(username, password))
            .await?;

        if self.is_authenticated() {
            debug!("Replacing existing session key");
        }
        self.session_key = key;

        info!(username, endpoint = %self.endpoint(), "Authenticated");
        Ok(())
    }

    /// Call `method` with the session key prepended to `params`.
    ///
    /// The key is sent even when empty; the server rejects it.
    pub async fn call_authenticated<R>(
        &self,
        ctx: &CallContext,
        method: &str,
        params: Vec<Value>,
    ) -> RpcResult<R>
    where
        R: DeserializeOwned,
    {
        if !self.is_authenticated() {
            warn!(method, "Calling authenticated method without a session key");
        }

        let mut positional = Vec::with_capacity(params.len() + 1);
        positional.push(Value::String(self.session_key.clone()));
        positional.extend(params);

        self.rpc.call(ctx, method, &positional).await
    }

    /// List all surveys visible to the session
    pub async fn list_surveys(&self, ctx: &CallContext) -> RpcResult<Vec<SurveySummary>> {
        self.call_authenticated(ctx, LIST_SURVEYS, vec![Value::Null]).await
    }

    /// List the surveys owned by `username` (requires superadmin rights)
    pub async fn list_surveys_for_user(
        &self,
        ctx: &CallContext,
        username: &str,
    ) -> RpcResult<Vec<SurveySummary>> {
        self.call_authenticated(ctx, LIST_SURVEYS, vec![Value::from(username)])
            .await
    }

    /// Invalidate the session key on the server.
    ///
    /// The stored key is cleared only when the server confirms.
    pub async fn release_session_key(&mut self, ctx: &CallContext) -> RpcResult<()> {
        let _status: Value = self
            .call_authenticated(ctx, RELEASE_SESSION_KEY, Vec::new())
            .await?;

        self.session_key.clear();
        info!(endpoint = %self.endpoint(), "Session key released");
        Ok(())
    }
}
