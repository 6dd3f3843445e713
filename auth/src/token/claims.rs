use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// Claim key carrying the user's id in every issued token.
pub const USER_ID_CLAIM: &str = "userId";

/// Claim key carrying the user's role in every issued token.
pub const ROLE_CLAIM: &str = "role";

/// Payload of a session token.
///
/// `sub` is the principal the token asserts (the user's email). Extra claims
/// are flattened into the token alongside the registered ones; the codec puts
/// the user id and role there under fixed keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (the user's email)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Additional claims (flattened into the token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Get the user id claim, if present.
    pub fn user_id(&self) -> Option<&str> {
        self.extra.get(USER_ID_CLAIM).and_then(|v| v.as_str())
    }

    /// Get the role claim, if present.
    pub fn role(&self) -> Option<&str> {
        self.extra.get(ROLE_CLAIM).and_then(|v| v.as_str())
    }

    /// Check whether the token is expired at the given timestamp.
    ///
    /// A token is expired from the instant `exp` is reached.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
