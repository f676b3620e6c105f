//! Request and response envelopes
//!
//! LimeSurvey speaks a pre-2.0 flavour of JSON-RPC: requests carry no
//! `jsonrpc` member, parameters are always positional, and every response
//! carries `id`, `result` and `error` with exactly one of the last two set.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{RpcError, RpcResult};

/// Id sent with every request. Calls never overlap on one client, so the
/// response needs no correlation.
pub const REQUEST_ID: u64 = 1;

/// The only top-level members a response may carry
pub const RESPONSE_FIELDS: &[&str] = &["id", "result", "error"];

/// Outgoing call envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub id: u64,
    pub method: String,
    pub params: Vec<Value>,
}

impl RpcRequest {
    /// Build a request from any positional parameter list.
    ///
    /// `params` must serialize to a JSON array: a tuple, slice, `Vec` or
    /// array. `None` entries inside the list become `null` placeholders;
    /// pass an empty list, not `()` or `None`, for a call without arguments.
    pub fn new<P>(method: impl Into<String>, params: &P) -> RpcResult<Self>
    where
        P: Serialize + ?Sized,
    {
        let method = method.into();
        if method.is_empty() {
            return Err(RpcError::request_construction("Method name cannot be empty"));
        }

        let params = match serde_json::to_value(params)? {
            Value::Array(items) => items,
            other => {
                return Err(RpcError::Serialization {
                    source: serde::ser::Error::custom(format!(
                        "parameters must be a positional list, got {}",
                        json_type_name(&other)
                    )),
                })
            }
        };

        Ok(Self {
            id: REQUEST_ID,
            method,
            params,
        })
    }

    /// Serialize to the request body
    pub fn to_body(&self) -> RpcResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Incoming reply envelope
///
/// Absent `result`/`error` members decode as `null`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RpcResponse {
    pub id: Option<u64>,
    pub result: Value,
    pub error: Value,
}

impl RpcResponse {
    /// Decode a response body, rejecting any top-level member outside
    /// [`RESPONSE_FIELDS`].
    pub fn decode(body: &[u8]) -> RpcResult<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| RpcError::decode(format!("Malformed response JSON: {}", e)))?;

        match value {
            Value::Object(members) => Self::from_members(members),
            other => Err(RpcError::decode(format!(
                "Response must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    fn from_members(mut members: Map<String, Value>) -> RpcResult<Self> {
        if let Some(unknown) = members
            .keys()
            .find(|key| !RESPONSE_FIELDS.contains(&key.as_str()))
        {
            return Err(RpcError::decode(format!(
                "unknown field `{}`, expected one of {}",
                unknown,
                RESPONSE_FIELDS.join(", ")
            )));
        }

        let id = match members.remove("id") {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => Some(n.as_u64().ok_or_else(|| {
                RpcError::decode(format!("Response id must be an unsigned integer, got {}", n))
            })?),
            Some(other) => {
                return Err(RpcError::decode(format!(
                    "Response id must be an unsigned integer, got {}",
                    json_type_name(&other)
                )))
            }
        };

        Ok(Self {
            id,
            result: members.remove("result").unwrap_or(Value::Null),
            error: members.remove("error").unwrap_or(Value::Null),
        })
    }

    /// Whether the remote side reported an error
    pub fn is_error(&self) -> bool {
        !self.error.is_null()
    }

    /// Turn the envelope into the call outcome.
    ///
    /// A non-null `error` wins regardless of `result`; otherwise `result` is
    /// decoded into `R`.
    pub fn into_result<R: DeserializeOwned>(self) -> RpcResult<R> {
        if self.is_error() {
            return Err(RpcError::remote(self.error));
        }

        serde_json::from_value(self.result)
            .map_err(|e| RpcError::decode(format!("Unexpected result shape: {}", e)))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
