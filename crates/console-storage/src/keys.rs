//! Storage key constants.

/// Durable keys owned by the session layer
pub struct StorageKeys;

impl StorageKeys {
    /// Bearer token for the current session
    pub const TOKEN: &'static str = "token";

    /// Backend user id
    pub const USER_ID: &'static str = "userId";

    /// Display username
    pub const USERNAME: &'static str = "username";
}
