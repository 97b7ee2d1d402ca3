//! Services for policy resolution and token signing.

pub mod policy;
pub mod token;

pub use policy::{
    GlobalPolicyHolder, PolicyAware, PolicyCustomizer, PolicyResolver, SigningKey, TokenPolicy,
    TokenPolicyBuilder,
};
