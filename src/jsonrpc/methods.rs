//! RemoteControl method names

/// Exchange credentials for a session key: `[username, password]`
pub const GET_SESSION_KEY: &str = "get_session_key";

/// Invalidate a session key: `[session_key]`
pub const RELEASE_SESSION_KEY: &str = "release_session_key";

/// List surveys visible to the session, optionally for one user: `[session_key, username|null]`
pub const LIST_SURVEYS: &str = "list_surveys";

/// All methods this crate has typed wrappers for
pub const ALL_METHODS: &[&str] = &[GET_SESSION_KEY, RELEASE_SESSION_KEY, LIST_SURVEYS];
