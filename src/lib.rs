//! LimeSurvey RemoteControl client
//!
//! A small JSON-RPC client for the LimeSurvey RemoteControl API. The
//! [`jsonrpc`] module owns the generic call primitive (envelopes, strict
//! response decoding, the HTTP exchange); [`client`] layers session-key
//! handling and the survey operations on top of it.

pub mod cli;
pub mod client;
pub mod config;
pub mod jsonrpc;
pub mod models;

pub use client::SurveyClient;
pub use jsonrpc::{CallContext, RpcClient};
pub use models::SurveySummary;

/// Why a network exchange did not produce a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailure {
    /// Connection refused, reset, DNS failure and the like
    Network,
    /// The call context was cancelled before the exchange completed
    Cancelled,
    /// The call context's deadline (or the HTTP client timeout) elapsed
    TimedOut,
}

impl std::fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportFailure::Network => write!(f, "network failure"),
            TransportFailure::Cancelled => write!(f, "cancelled"),
            TransportFailure::TimedOut => write!(f, "timed out"),
        }
    }
}

/// Failure kinds of a remote call
///
/// Every call reports exactly one of these. Only [`RpcError::Transport`] is
/// worth retrying; the client itself never retries.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("Request construction error: {message}")]
    RequestConstruction { message: String },

    #[error("Transport error ({kind}): {message}")]
    Transport {
        kind: TransportFailure,
        message: String,
    },

    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("error: {message}")]
    Remote {
        message: String,
        value: serde_json::Value,
    },
}

impl RpcError {
    /// Create a request construction error
    pub fn request_construction(message: impl Into<String>) -> Self {
        Self::RequestConstruction {
            message: message.into(),
        }
    }

    /// Create a transport error of the given kind
    pub fn transport(kind: TransportFailure, message: impl Into<String>) -> Self {
        Self::Transport {
            kind,
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a remote application error from the decoded `error` member.
    ///
    /// JSON strings keep their bare text; any other value is rendered as
    /// compact JSON.
    pub fn remote(value: serde_json::Value) -> Self {
        let message = match &value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        Self::Remote { message, value }
    }

    /// The transport failure kind, if this is a transport error
    pub fn transport_failure(&self) -> Option<TransportFailure> {
        match self {
            RpcError::Transport { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Whether a caller may reasonably retry the call
    pub fn is_retryable(&self) -> bool {
        matches!(self, RpcError::Transport { .. })
    }

    /// Whether the remote service rejected the call
    pub fn is_remote(&self) -> bool {
        matches!(self, RpcError::Remote { .. })
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            RpcError::Serialization { source } => {
                format!("Could not encode request parameters: {}", source)
            }
            RpcError::RequestConstruction { message } => {
                format!("Invalid request: {}", message)
            }
            RpcError::Transport { kind, message } => match kind {
                TransportFailure::Network => format!("Communication error: {}", message),
                TransportFailure::Cancelled => "The request was cancelled".to_string(),
                TransportFailure::TimedOut => "The request timed out".to_string(),
            },
            RpcError::Decode { message } => {
                format!("Unexpected response from server: {}", message)
            }
            RpcError::Remote { message, .. } => {
                format!("LimeSurvey reported an error: {}", message)
            }
        }
    }
}

/// Convenience type alias for Results
pub type RpcResult<T> = Result<T, RpcError>;
