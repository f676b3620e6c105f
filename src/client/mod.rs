//! Session layer for the LimeSurvey RemoteControl API
//!
//! [`SurveyClient`] keeps the session key issued by `get_session_key` and
//! prepends it to every authenticated call. The wire work is delegated to
//! [`crate::jsonrpc::RpcClient`].

pub mod session;

pub use session::SurveyClient;

