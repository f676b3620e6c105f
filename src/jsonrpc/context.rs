//! Cancellation and deadline scope for a single call

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::{RpcError, RpcResult, TransportFailure};

/// Execution context a call is bound to.
///
/// Cancelling the context (or letting its timeout elapse) aborts the
/// in-flight exchange and the call reports a transport error. Clones share
/// the same cancellation token.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    token: CancellationToken,
    timeout: Option<Duration>,
}

impl CallContext {
    /// A context that is never cancelled and has no deadline
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Bind the context to an externally owned cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Derive a context that is cancelled with this one but can also be
    /// cancelled on its own.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            timeout: self.timeout,
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }

    /// Drive `future` to completion unless the context is cancelled or its
    /// deadline passes first. The future is dropped on abort.
    pub async fn run<F, T>(&self, future: F) -> RpcResult<T>
    where
        F: Future<Output = RpcResult<T>>,
    {
        if self.is_cancelled() {
            return Err(cancelled());
        }

        let bounded = async {
            match self.timeout {
                Some(limit) => tokio::time::timeout(limit, future).await.map_err(|_| {
                    RpcError::transport(
                        TransportFailure::TimedOut,
                        format!("context deadline of {:?} exceeded", limit),
                    )
                })?,
                None => future.await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(cancelled()),
            outcome = bounded => outcome,
        }
    }
}

fn cancelled() -> RpcError {
    RpcError::transport(TransportFailure::Cancelled, "context cancelled")
}
