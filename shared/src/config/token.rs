//! Token policy settings
//!
//! Settings are surfaced to the policy resolver as a flat property map so any
//! configuration source (environment, files, test fixtures) can feed it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;

/// Property key for the general token secret (required)
pub const TOKEN_SECRET: &str = "stateless.token.secret";
/// Property key for the general token timeout in seconds (required)
pub const TOKEN_TIMEOUT: &str = "stateless.token.timeout";
/// Property key for the access token secret
pub const ACCESS_TOKEN_SECRET: &str = "stateless.accessToken.secret";
/// Property key for the access token timeout in seconds
pub const ACCESS_TOKEN_TIMEOUT: &str = "stateless.accessToken.timeout";
/// Property key for the refresh token secret
pub const REFRESH_TOKEN_SECRET: &str = "stateless.refreshToken.secret";
/// Property key for the refresh token timeout in seconds
pub const REFRESH_TOKEN_TIMEOUT: &str = "stateless.refreshToken.timeout";
/// Property key toggling the replacement-secret suggestion on weak keys
pub const SUGGEST_SECRET: &str = "stateless.token.suggestSecret";

/// Raw token settings, before key derivation and validation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenSettings {
    /// Secret for general tokens
    #[serde(default)]
    pub secret: Option<String>,

    /// Timeout for general tokens, in seconds
    #[serde(default)]
    pub timeout: Option<String>,

    /// Secret for access tokens
    #[serde(default)]
    pub access_secret: Option<String>,

    /// Timeout for access tokens, in seconds
    #[serde(default)]
    pub access_timeout: Option<String>,

    /// Secret for refresh tokens
    #[serde(default)]
    pub refresh_secret: Option<String>,

    /// Timeout for refresh tokens, in seconds
    #[serde(default)]
    pub refresh_timeout: Option<String>,

    /// Log a generated replacement secret when a configured one is too weak
    #[serde(default = "default_suggest_secret")]
    pub suggest_replacement_secret: bool,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            secret: None,
            timeout: None,
            access_secret: None,
            access_timeout: None,
            refresh_secret: None,
            refresh_timeout: None,
            suggest_replacement_secret: default_suggest_secret(),
        }
    }
}

impl TokenSettings {
    /// Load token settings from environment variables
    ///
    /// Reads `STATELESS_TOKEN_SECRET`, `STATELESS_TOKEN_TIMEOUT`,
    /// `STATELESS_ACCESS_TOKEN_SECRET`, `STATELESS_ACCESS_TOKEN_TIMEOUT`,
    /// `STATELESS_REFRESH_TOKEN_SECRET`, `STATELESS_REFRESH_TOKEN_TIMEOUT` and
    /// `STATELESS_TOKEN_SUGGEST_SECRET`. Validation is left to the resolver.
    pub fn from_env() -> Self {
        Self {
            secret: env::var("STATELESS_TOKEN_SECRET").ok(),
            timeout: env::var("STATELESS_TOKEN_TIMEOUT").ok(),
            access_secret: env::var("STATELESS_ACCESS_TOKEN_SECRET").ok(),
            access_timeout: env::var("STATELESS_ACCESS_TOKEN_TIMEOUT").ok(),
            refresh_secret: env::var("STATELESS_REFRESH_TOKEN_SECRET").ok(),
            refresh_timeout: env::var("STATELESS_REFRESH_TOKEN_TIMEOUT").ok(),
            suggest_replacement_secret: env::var("STATELESS_TOKEN_SUGGEST_SECRET")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or_else(default_suggest_secret),
        }
    }

    /// Flatten the settings into the property map consumed by the resolver
    ///
    /// Unset values are omitted; blank values are kept and treated as absent
    /// by the resolver.
    pub fn into_properties(self) -> HashMap<String, String> {
        let mut properties = HashMap::new();
        let entries = [
            (TOKEN_SECRET, self.secret),
            (TOKEN_TIMEOUT, self.timeout),
            (ACCESS_TOKEN_SECRET, self.access_secret),
            (ACCESS_TOKEN_TIMEOUT, self.access_timeout),
            (REFRESH_TOKEN_SECRET, self.refresh_secret),
            (REFRESH_TOKEN_TIMEOUT, self.refresh_timeout),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                properties.insert(key.to_string(), value);
            }
        }
        properties.insert(
            SUGGEST_SECRET.to_string(),
            self.suggest_replacement_secret.to_string(),
        );
        properties
    }
}

fn default_suggest_secret() -> bool {
    true
}

/// Parses `true`/`false` ignoring case and surrounding whitespace
fn parse_flag(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_properties_skips_unset_values() {
        let settings = TokenSettings {
            secret: Some("secret".to_string()),
            timeout: Some("300".to_string()),
            refresh_timeout: Some(String::new()),
            ..Default::default()
        };

        let properties = settings.into_properties();
        assert_eq!(properties.get(TOKEN_SECRET).map(String::as_str), Some("secret"));
        assert_eq!(properties.get(TOKEN_TIMEOUT).map(String::as_str), Some("300"));
        assert_eq!(properties.get(REFRESH_TOKEN_TIMEOUT).map(String::as_str), Some(""));
        assert!(!properties.contains_key(ACCESS_TOKEN_SECRET));
        assert!(!properties.contains_key(ACCESS_TOKEN_TIMEOUT));
    }

    #[test]
    fn test_deserialize_defaults() {
        let settings: TokenSettings =
            serde_json::from_str(r#"{"secret":"s","timeout":"60"}"#).unwrap();
        assert_eq!(settings.secret.as_deref(), Some("s"));
        assert!(settings.access_secret.is_none());
        assert!(settings.suggest_replacement_secret);
    }

    #[test]
    fn test_parse_flag_ignores_case() {
        assert_eq!(parse_flag("false"), Some(false));
        assert_eq!(parse_flag("FALSE"), Some(false));
        assert_eq!(parse_flag(" False "), Some(false));
        assert_eq!(parse_flag("True"), Some(true));
        assert_eq!(parse_flag("no"), None);
        assert_eq!(parse_flag(""), None);
    }
}
