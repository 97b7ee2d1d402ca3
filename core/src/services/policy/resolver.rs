//! Property-driven policy resolution
//!
//! Properties are applied to a [`TokenPolicyBuilder`], customizers run in
//! order, the policy is frozen and pushed once to every registered consumer.

use std::collections::HashMap;
use std::sync::Arc;

use st_shared::config::token::{
    ACCESS_TOKEN_SECRET, ACCESS_TOKEN_TIMEOUT, REFRESH_TOKEN_SECRET, REFRESH_TOKEN_TIMEOUT,
    SUGGEST_SECRET, TOKEN_SECRET, TOKEN_TIMEOUT,
};
use st_shared::TokenSettings;
use tracing::{debug, info};

use crate::errors::PolicyError;

use super::token_policy::{TokenPolicy, TokenPolicyBuilder};

/// Post-processing step applied to the in-progress policy
///
/// Customizers run after properties are applied, lowest `order` first. Ties
/// keep registration order.
pub trait PolicyCustomizer: Send + Sync {
    fn customize(&self, builder: &mut TokenPolicyBuilder);

    fn order(&self) -> i32 {
        0
    }
}

impl<F> PolicyCustomizer for F
where
    F: Fn(&mut TokenPolicyBuilder) + Send + Sync,
{
    fn customize(&self, builder: &mut TokenPolicyBuilder) {
        self(builder)
    }
}

/// Customizer closure with an explicit order
pub struct OrderedCustomizer<F> {
    order: i32,
    customize: F,
}

impl<F> PolicyCustomizer for OrderedCustomizer<F>
where
    F: Fn(&mut TokenPolicyBuilder) + Send + Sync,
{
    fn customize(&self, builder: &mut TokenPolicyBuilder) {
        (self.customize)(builder)
    }

    fn order(&self) -> i32 {
        self.order
    }
}

/// Wraps a closure so it runs at the given position
pub fn ordered<F>(order: i32, customize: F) -> OrderedCustomizer<F>
where
    F: Fn(&mut TokenPolicyBuilder) + Send + Sync,
{
    OrderedCustomizer { order, customize }
}

/// Component that wants the resolved policy
///
/// Receives the policy exactly once, when the resolver has frozen it.
pub trait PolicyAware: Send + Sync {
    fn policy_ready(&self, policy: Arc<TokenPolicy>);
}

/// Builds a [`TokenPolicy`] from flat configuration properties
#[derive(Default)]
pub struct PolicyResolver {
    customizers: Vec<Box<dyn PolicyCustomizer>>,
    consumers: Vec<Arc<dyn PolicyAware>>,
}

impl PolicyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a customizer
    pub fn with_customizer(mut self, customizer: impl PolicyCustomizer + 'static) -> Self {
        self.customizers.push(Box::new(customizer));
        self
    }

    /// Registers a consumer to receive the resolved policy
    pub fn with_consumer(mut self, consumer: Arc<dyn PolicyAware>) -> Self {
        self.consumers.push(consumer);
        self
    }

    /// Resolves a policy from token settings
    pub fn resolve_settings(&self, settings: TokenSettings) -> Result<Arc<TokenPolicy>, PolicyError> {
        self.resolve(&settings.into_properties())
    }

    /// Resolves a policy from a property map
    ///
    /// Absent and blank properties are treated the same.
    ///
    /// # Returns
    ///
    /// * `Ok(Arc<TokenPolicy>)` - The frozen policy, already pushed to consumers
    /// * `Err(PolicyError)` - A required property is missing, a timeout is not
    ///   an integer, or a secret is too weak
    pub fn resolve(
        &self,
        properties: &HashMap<String, String>,
    ) -> Result<Arc<TokenPolicy>, PolicyError> {
        let mut builder = TokenPolicy::builder();

        if let Some(secret) = property(properties, TOKEN_SECRET) {
            builder.token_secret(secret);
        }
        if let Some(secret) = property(properties, ACCESS_TOKEN_SECRET) {
            builder.access_token_secret(secret);
        } else {
            debug!("{} not provided, {} will be used", ACCESS_TOKEN_SECRET, TOKEN_SECRET);
        }
        if let Some(secret) = property(properties, REFRESH_TOKEN_SECRET) {
            builder.refresh_token_secret(secret);
        } else {
            debug!("{} not provided, {} will be used", REFRESH_TOKEN_SECRET, TOKEN_SECRET);
        }

        if let Some(seconds) = timeout_property(properties, TOKEN_TIMEOUT, "token timeout")? {
            builder.token_timeout(seconds);
        }
        if let Some(seconds) = timeout_property(properties, ACCESS_TOKEN_TIMEOUT, "access token timeout")? {
            builder.access_token_timeout(seconds);
        } else {
            debug!("{} not provided, the default will be used", ACCESS_TOKEN_TIMEOUT);
        }
        if let Some(seconds) = timeout_property(properties, REFRESH_TOKEN_TIMEOUT, "refresh token timeout")? {
            builder.refresh_token_timeout(seconds);
        } else {
            debug!("{} not provided, the default will be used", REFRESH_TOKEN_TIMEOUT);
        }

        if let Some(value) = property(properties, SUGGEST_SECRET) {
            builder.suggest_replacement_secret(!value.trim().eq_ignore_ascii_case("false"));
        }

        let mut customizers: Vec<&(dyn PolicyCustomizer + 'static)> =
            self.customizers.iter().map(|c| &**c).collect();
        customizers.sort_by_key(|c| c.order());
        for customizer in customizers {
            customizer.customize(&mut builder);
        }

        let policy = Arc::new(builder.build()?);

        for consumer in &self.consumers {
            consumer.policy_ready(Arc::clone(&policy));
        }

        info!(
            token_timeout = policy.token_timeout_seconds(),
            access_timeout = policy.access_timeout_seconds(),
            refresh_timeout = policy.refresh_timeout_seconds(),
            "Initialized token policy"
        );
        Ok(policy)
    }
}

fn property<'a>(properties: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    properties
        .get(key)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}

fn timeout_property(
    properties: &HashMap<String, String>,
    key: &str,
    name: &str,
) -> Result<Option<i64>, PolicyError> {
    match property(properties, key) {
        None => Ok(None),
        Some(value) => value.trim().parse::<i64>().map(Some).map_err(|_| {
            PolicyError::configuration(format!(
                "{} is required to be a non-negative number of seconds, invalid value for {}: {}",
                name, key, value
            ))
        }),
    }
}
