//! Error types for policy resolution and token issuing
//!
//! Verification failures are not represented here: a token that fails
//! signature, expiration or payload checks is returned as an invalid token.

use thiserror::Error;

/// Errors raised while building or distributing a token policy
///
/// All of these are configuration-time failures and are expected to abort
/// startup.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Weak key: {secret} is {length} bytes, at least {required} bytes are required")]
    WeakKey {
        secret: String,
        length: usize,
        required: usize,
    },

    #[error("Token policy not installed")]
    NotInstalled,

    #[error("Token policy already installed")]
    AlreadyInstalled,
}

impl PolicyError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        PolicyError::Configuration {
            message: message.into(),
        }
    }
}

/// Errors raised while issuing a token
#[derive(Error, Debug)]
pub enum TokenError {
    /// The subject could not be encoded. This is a schema bug in the caller.
    #[error("Subject serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Token signing failed: {message}")]
    Signing { message: String },

    #[error(transparent)]
    Policy(#[from] PolicyError),
}
