//! Immutable token policy and its builder

use std::sync::Arc;

use tracing::{debug, error};

use crate::errors::PolicyError;

use super::key::{generate_secret, SigningKey, MIN_KEY_LENGTH};

/// Default access token timeout (30 minutes)
pub const DEFAULT_ACCESS_TOKEN_TIMEOUT_SECONDS: i64 = 60 * 30;

/// Default refresh token timeout (12 hours)
pub const DEFAULT_REFRESH_TOKEN_TIMEOUT_SECONDS: i64 = 60 * 60 * 12;

/// Signing keys and timeouts for the three token kinds
///
/// A policy is never mutated after it is built. Access and refresh keys share
/// the general key when no dedicated secret was configured.
#[derive(Debug, Clone)]
pub struct TokenPolicy {
    token_key: Arc<SigningKey>,
    access_key: Arc<SigningKey>,
    refresh_key: Arc<SigningKey>,
    token_timeout_seconds: i64,
    access_timeout_seconds: i64,
    refresh_timeout_seconds: i64,
}

impl TokenPolicy {
    /// Creates a new builder for constructing a policy
    pub fn builder() -> TokenPolicyBuilder {
        TokenPolicyBuilder::new()
    }

    /// Key for general tokens
    pub fn token_key(&self) -> &Arc<SigningKey> {
        &self.token_key
    }

    /// Key for access tokens
    pub fn access_key(&self) -> &Arc<SigningKey> {
        &self.access_key
    }

    /// Key for refresh tokens
    pub fn refresh_key(&self) -> &Arc<SigningKey> {
        &self.refresh_key
    }

    pub fn token_timeout_seconds(&self) -> i64 {
        self.token_timeout_seconds
    }

    pub fn access_timeout_seconds(&self) -> i64 {
        self.access_timeout_seconds
    }

    pub fn refresh_timeout_seconds(&self) -> i64 {
        self.refresh_timeout_seconds
    }
}

/// Mutable, in-progress policy
///
/// Setters take `&mut self` so customizers can edit a builder in place. Blank
/// secrets are treated as unset. Keys are derived in [`TokenPolicyBuilder::build`].
#[derive(Clone)]
pub struct TokenPolicyBuilder {
    token_secret: Option<String>,
    access_token_secret: Option<String>,
    refresh_token_secret: Option<String>,
    token_timeout: Option<i64>,
    access_token_timeout: Option<i64>,
    refresh_token_timeout: Option<i64>,
    suggest_replacement_secret: bool,
}

impl std::fmt::Debug for TokenPolicyBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPolicyBuilder")
            .field("token_secret", &self.has_token_secret())
            .field("access_token_secret", &self.has_access_token_secret())
            .field("refresh_token_secret", &self.has_refresh_token_secret())
            .field("token_timeout", &self.token_timeout)
            .field("access_token_timeout", &self.access_token_timeout)
            .field("refresh_token_timeout", &self.refresh_token_timeout)
            .finish()
    }
}

impl Default for TokenPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenPolicyBuilder {
    pub fn new() -> Self {
        Self {
            token_secret: None,
            access_token_secret: None,
            refresh_token_secret: None,
            token_timeout: None,
            access_token_timeout: None,
            refresh_token_timeout: None,
            suggest_replacement_secret: true,
        }
    }

    /// Sets the secret for general tokens (required)
    pub fn token_secret(&mut self, secret: impl Into<String>) -> &mut Self {
        self.token_secret = Some(secret.into());
        self
    }

    /// Sets the secret for access tokens (defaults to the token secret)
    pub fn access_token_secret(&mut self, secret: impl Into<String>) -> &mut Self {
        self.access_token_secret = Some(secret.into());
        self
    }

    /// Sets the secret for refresh tokens (defaults to the token secret)
    pub fn refresh_token_secret(&mut self, secret: impl Into<String>) -> &mut Self {
        self.refresh_token_secret = Some(secret.into());
        self
    }

    /// Sets the timeout in seconds for general tokens (required)
    pub fn token_timeout(&mut self, seconds: i64) -> &mut Self {
        self.token_timeout = Some(seconds);
        self
    }

    /// Sets the timeout in seconds for access tokens (defaults to 30 minutes)
    pub fn access_token_timeout(&mut self, seconds: i64) -> &mut Self {
        self.access_token_timeout = Some(seconds);
        self
    }

    /// Sets the timeout in seconds for refresh tokens (defaults to 12 hours)
    pub fn refresh_token_timeout(&mut self, seconds: i64) -> &mut Self {
        self.refresh_token_timeout = Some(seconds);
        self
    }

    /// Log a generated replacement secret when a configured secret is too weak
    pub fn suggest_replacement_secret(&mut self, enabled: bool) -> &mut Self {
        self.suggest_replacement_secret = enabled;
        self
    }

    pub fn has_token_secret(&self) -> bool {
        non_blank(&self.token_secret).is_some()
    }

    pub fn has_access_token_secret(&self) -> bool {
        non_blank(&self.access_token_secret).is_some()
    }

    pub fn has_refresh_token_secret(&self) -> bool {
        non_blank(&self.refresh_token_secret).is_some()
    }

    pub fn configured_token_timeout(&self) -> Option<i64> {
        self.token_timeout
    }

    pub fn configured_access_token_timeout(&self) -> Option<i64> {
        self.access_token_timeout
    }

    pub fn configured_refresh_token_timeout(&self) -> Option<i64> {
        self.refresh_token_timeout
    }

    pub fn suggests_replacement_secret(&self) -> bool {
        self.suggest_replacement_secret
    }

    /// Builds an immutable policy from the configured values
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPolicy)` - Policy with every key and timeout resolved
    /// * `Err(PolicyError::Configuration)` - Token secret or timeout missing, or a negative timeout
    /// * `Err(PolicyError::WeakKey)` - A secret is shorter than 64 bytes
    pub fn build(&self) -> Result<TokenPolicy, PolicyError> {
        let token_secret = non_blank(&self.token_secret)
            .ok_or_else(|| PolicyError::configuration("token secret is required"))?;
        let token_timeout_seconds = self
            .token_timeout
            .ok_or_else(|| PolicyError::configuration("token timeout is required"))?;

        let access_timeout_seconds = self
            .access_token_timeout
            .unwrap_or(DEFAULT_ACCESS_TOKEN_TIMEOUT_SECONDS);
        let refresh_timeout_seconds = self
            .refresh_token_timeout
            .unwrap_or(DEFAULT_REFRESH_TOKEN_TIMEOUT_SECONDS);

        ensure_non_negative("token timeout", token_timeout_seconds)?;
        ensure_non_negative("access token timeout", access_timeout_seconds)?;
        ensure_non_negative("refresh token timeout", refresh_timeout_seconds)?;

        let token_key = Arc::new(self.derive("token_secret", token_secret)?);

        let access_key = match non_blank(&self.access_token_secret) {
            Some(secret) => Arc::new(self.derive("access_token_secret", secret)?),
            None => {
                debug!("Access token secret not provided, using token secret");
                Arc::clone(&token_key)
            }
        };

        let refresh_key = match non_blank(&self.refresh_token_secret) {
            Some(secret) => Arc::new(self.derive("refresh_token_secret", secret)?),
            None => {
                debug!("Refresh token secret not provided, using token secret");
                Arc::clone(&token_key)
            }
        };

        Ok(TokenPolicy {
            token_key,
            access_key,
            refresh_key,
            token_timeout_seconds,
            access_timeout_seconds,
            refresh_timeout_seconds,
        })
    }

    fn derive(&self, name: &str, secret: &str) -> Result<SigningKey, PolicyError> {
        SigningKey::from_secret(name, secret).map_err(|e| {
            if self.suggest_replacement_secret {
                error!(
                    "The {} is too weak to be used as a secret key. Use a string that is at least {} bytes long.\n\n\
                     You can use the random value below as a secret.\n\n\t{}\n",
                    name,
                    MIN_KEY_LENGTH,
                    generate_secret()
                );
            }
            e
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn ensure_non_negative(name: &str, seconds: i64) -> Result<(), PolicyError> {
    if seconds < 0 {
        return Err(PolicyError::configuration(format!(
            "{} is required to be a non-negative number of seconds, got {}",
            name, seconds
        )));
    }
    Ok(())
}
