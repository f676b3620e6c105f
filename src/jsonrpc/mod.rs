//! JSON-RPC call machinery for the LimeSurvey RemoteControl API
//!
//! Features:
//! - Positional-parameter request envelopes with a fixed id
//! - Strict reply decoding: unknown top-level members are rejected
//! - Remote `error` members surfaced as typed errors, distinct from transport
//!   and decode failures
//! - Calls bound to a cancellable, deadline-aware [`CallContext`]

pub mod context;
pub mod core;
pub mod methods;
pub mod protocol;
pub mod transport;

pub use self::core::RpcClient;
pub use context::CallContext;
pub use methods::{ALL_METHODS, GET_SESSION_KEY, LIST_SURVEYS, RELEASE_SESSION_KEY};
pub use protocol::{RpcRequest, RpcResponse, REQUEST_ID, RESPONSE_FIELDS};
pub use transport::{HttpTransport, Transport};

/// Default per-call deadline used by the CLI, in seconds
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;
