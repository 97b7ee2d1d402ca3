//! Stateless token entities
//!
//! `Token` is the general kind. `AccessToken` and `RefreshToken` reuse the same
//! sign/verify path and only choose which policy key and timeout to consult.
//!
//! A token is either valid (subject present) or invalid (subject absent). It
//! never changes state after construction. Verification failures produce an
//! invalid token instead of an error.

use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::entities::claims::Claims;
use crate::errors::TokenResult;
use crate::services::policy::{holder, SigningKey, TokenPolicy};
use crate::services::token::codec::{self, Rejection};

/// Signed token carrying an application-defined subject
#[derive(Debug, Clone, PartialEq)]
pub struct Token<S> {
    value: String,
    subject: Option<S>,
    invalid: bool,
}

impl<S> Token<S> {
    /// Compact signed string
    ///
    /// Always present: the signed string for created tokens, the original
    /// input for parsed ones.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Decoded subject, `None` when the token is invalid
    pub fn subject(&self) -> Option<&S> {
        self.subject.as_ref()
    }

    pub fn into_subject(self) -> Option<S> {
        self.subject
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn is_valid(&self) -> bool {
        !self.invalid
    }

    fn rejected(value: String) -> Self {
        Self {
            value,
            subject: None,
            invalid: true,
        }
    }
}

impl<S: Serialize> Token<S> {
    /// Signs a subject with the given key and timeout
    ///
    /// A negative timeout still produces a signed string, but the token is
    /// invalid and carries no subject. This mints already-expired tokens, for
    /// example to overwrite a client credential on logout.
    ///
    /// # Returns
    ///
    /// * `Ok(Token)` - The signed token
    /// * `Err(TokenError::Serialization)` - The subject cannot be encoded
    /// * `Err(TokenError::Signing)` - The codec failed to sign
    pub fn create_with(key: &SigningKey, subject: S, timeout_seconds: i64) -> TokenResult<Self> {
        let encoded = serde_json::to_string(&subject)?;
        let value = codec::sign(key, &Claims::new(encoded, timeout_seconds))?;

        if timeout_seconds < 0 {
            return Ok(Self::rejected(value));
        }

        Ok(Self {
            value,
            subject: Some(subject),
            invalid: false,
        })
    }

    /// Creates a general token with the policy timeout
    pub fn create(policy: &TokenPolicy, subject: S) -> TokenResult<Self> {
        Self::create_with(policy.token_key(), subject, policy.token_timeout_seconds())
    }

    /// Creates a general token with an explicit timeout
    pub fn create_with_timeout(
        policy: &TokenPolicy,
        subject: S,
        timeout_seconds: i64,
    ) -> TokenResult<Self> {
        Self::create_with(policy.token_key(), subject, timeout_seconds)
    }

    /// Creates a general token using the process-wide policy
    pub fn issue(subject: S) -> TokenResult<Self> {
        let policy = holder::current()?;
        Self::create(&policy, subject)
    }

    /// Creates a general token with an explicit timeout using the process-wide policy
    pub fn issue_with_timeout(subject: S, timeout_seconds: i64) -> TokenResult<Self> {
        let policy = holder::current()?;
        Self::create_with_timeout(&policy, subject, timeout_seconds)
    }
}

impl<S: DeserializeOwned> Token<S> {
    /// Verifies a token string and decodes its subject as `S`
    ///
    /// Never fails. Bad signatures, expired tokens and subjects that do not
    /// match `S` all yield an invalid token holding the original input.
    pub fn parse_with(key: &SigningKey, value: impl Into<String>) -> Self {
        let value = value.into();

        let claims = match codec::verify(key, &value) {
            Ok(claims) => claims,
            Err(Rejection::Expired) => return Self::rejected(value),
            Err(rejection) => {
                debug!(?rejection, "Token verification failed");
                return Self::rejected(value);
            }
        };

        match serde_json::from_str::<S>(&claims.sub) {
            Ok(subject) => Self {
                value,
                subject: Some(subject),
                invalid: false,
            },
            Err(e) => {
                warn!(error = %e, "Failed to parse token subject");
                Self::rejected(value)
            }
        }
    }

    /// Parses a general token
    pub fn parse(policy: &TokenPolicy, value: impl Into<String>) -> Self {
        Self::parse_with(policy.token_key(), value)
    }

    /// Parses a general token using the process-wide policy
    pub fn read(value: impl Into<String>) -> TokenResult<Self> {
        let policy = holder::current()?;
        Ok(Self::parse(&policy, value))
    }
}

/// Short-lived token signed with the access key
///
/// Only obtainable through its factory functions.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessToken<S>(Token<S>);

impl<S> AccessToken<S> {
    pub fn into_token(self) -> Token<S> {
        self.0
    }

    pub fn into_subject(self) -> Option<S> {
        self.0.into_subject()
    }
}

impl<S> Deref for AccessToken<S> {
    type Target = Token<S>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Serialize> AccessToken<S> {
    /// Creates an access token with the policy access timeout
    pub fn create(policy: &TokenPolicy, subject: S) -> TokenResult<Self> {
        Self::create_with_timeout(policy, subject, policy.access_timeout_seconds())
    }

    pub fn create_with_timeout(
        policy: &TokenPolicy,
        subject: S,
        timeout_seconds: i64,
    ) -> TokenResult<Self> {
        Token::create_with(policy.access_key(), subject, timeout_seconds).map(Self)
    }

    /// Creates an access token using the process-wide policy
    pub fn issue(subject: S) -> TokenResult<Self> {
        let policy = holder::current()?;
        Self::create(&policy, subject)
    }

    pub fn issue_with_timeout(subject: S, timeout_seconds: i64) -> TokenResult<Self> {
        let policy = holder::current()?;
        Self::create_with_timeout(&policy, subject, timeout_seconds)
    }
}

impl<S: DeserializeOwned> AccessToken<S> {
    /// Parses an access token, verified with the access key
    pub fn parse(policy: &TokenPolicy, value: impl Into<String>) -> Self {
        Self(Token::parse_with(policy.access_key(), value))
    }

    /// Parses an access token using the process-wide policy
    pub fn read(value: impl Into<String>) -> TokenResult<Self> {
        let policy = holder::current()?;
        Ok(Self::parse(&policy, value))
    }
}

/// Long-lived token signed with the refresh key
///
/// Only obtainable through its factory functions.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshToken<S>(Token<S>);

impl<S> RefreshToken<S> {
    pub fn into_token(self) -> Token<S> {
        self.0
    }

    pub fn into_subject(self) -> Option<S> {
        self.0.into_subject()
    }
}

impl<S> Deref for RefreshToken<S> {
    type Target = Token<S>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Serialize> RefreshToken<S> {
    /// Creates a refresh token with the policy refresh timeout
    pub fn create(policy: &TokenPolicy, subject: S) -> TokenResult<Self> {
        Self::create_with_timeout(policy, subject, policy.refresh_timeout_seconds())
    }

    pub fn create_with_timeout(
        policy: &TokenPolicy,
        subject: S,
        timeout_seconds: i64,
    ) -> TokenResult<Self> {
        Token::create_with(policy.refresh_key(), subject, timeout_seconds).map(Self)
    }

    /// Creates a refresh token using the process-wide policy
    pub fn issue(subject: S) -> TokenResult<Self> {
        let policy = holder::current()?;
        Self::create(&policy, subject)
    }

    pub fn issue_with_timeout(subject: S, timeout_seconds: i64) -> TokenResult<Self> {
        let policy = holder::current()?;
        Self::create_with_timeout(&policy, subject, timeout_seconds)
    }
}

impl<S: DeserializeOwned> RefreshToken<S> {
    /// Parses a refresh token, verified with the refresh key
    pub fn parse(policy: &TokenPolicy, value: impl Into<String>) -> Self {
        Self(Token::parse_with(policy.refresh_key(), value))
    }

    /// Parses a refresh token using the process-wide policy
    pub fn read(value: impl Into<String>) -> TokenResult<Self> {
        let policy = holder::current()?;
        Ok(Self::parse(&policy, value))
    }
}
