//! # Stateless Token Core
//!
//! Issues and verifies self-contained signed tokens carrying an
//! application-defined subject, with no server-side session storage.
//!
//! - `services::policy` resolves signing keys and timeouts into an immutable
//!   [`TokenPolicy`]
//! - `domain::entities::token` creates and parses [`Token`], [`AccessToken`]
//!   and [`RefreshToken`] against a policy
//!
//! ```no_run
//! use st_core::{Token, TokenPolicy};
//!
//! let policy = TokenPolicy::builder()
//!     .token_secret("A".repeat(64))
//!     .token_timeout(300)
//!     .build()?;
//!
//! let token = Token::create(&policy, vec!["admin".to_string()])?;
//! let parsed = Token::<Vec<String>>::parse(&policy, token.value());
//! assert!(parsed.is_valid());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod domain;
pub mod errors;
pub mod services;

use std::sync::Arc;

use st_shared::AppConfig;

pub use domain::{AccessToken, Claims, RefreshToken, Token};
pub use errors::{PolicyError, PolicyResult, TokenError, TokenResult};
pub use services::policy::{
    GlobalPolicyHolder, PolicyAware, PolicyCustomizer, PolicyResolver, SigningKey, TokenPolicy,
    TokenPolicyBuilder,
};

/// Loads configuration from the environment, sets up logging, resolves the
/// policy and installs it in the process-wide holder
///
/// # Returns
///
/// * `Ok(Arc<TokenPolicy>)` - The installed policy
/// * `Err(PolicyError)` - Resolution failed or a policy was already installed
pub fn init_from_env(resolver: PolicyResolver) -> PolicyResult<Arc<TokenPolicy>> {
    let config = AppConfig::from_env();
    config.logging.init();

    let policy = resolver.resolve_settings(config.token)?;
    services::policy::holder::install(Arc::clone(&policy))?;
    Ok(policy)
}
