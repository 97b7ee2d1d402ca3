//! Registered claims carried by every token

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Claims structure for the token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the JSON encoding of the application payload
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims issued now and expiring `timeout_seconds` later
    ///
    /// A negative timeout yields claims that are already expired.
    pub fn new(subject: String, timeout_seconds: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: subject,
            iat: now,
            exp: now.saturating_add(timeout_seconds),
        }
    }

    /// Checks if the claims have expired
    ///
    /// Claims stop being valid at the start of the `exp` second.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
