//! Token policy module
//!
//! This module resolves the signing keys and timeouts for every token kind:
//! - Key derivation and weak-key detection
//! - The immutable `TokenPolicy` and its builder
//! - Property-driven resolution with customizers and policy-aware consumers
//! - The process-wide policy holder

pub mod holder;
mod key;
mod resolver;
mod token_policy;

#[cfg(test)]
mod tests;

pub use holder::GlobalPolicyHolder;
pub use key::{generate_secret, SigningKey, MIN_KEY_LENGTH};
pub use resolver::{ordered, OrderedCustomizer, PolicyAware, PolicyCustomizer, PolicyResolver};
pub use token_policy::{
    TokenPolicy, TokenPolicyBuilder, DEFAULT_ACCESS_TOKEN_TIMEOUT_SECONDS,
    DEFAULT_REFRESH_TOKEN_TIMEOUT_SECONDS,
};
