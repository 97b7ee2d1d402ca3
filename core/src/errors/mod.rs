//! Domain-specific error types and error handling.

mod types;

pub use types::{PolicyError, TokenError};

pub type PolicyResult<T> = Result<T, PolicyError>;
pub type TokenResult<T> = Result<T, TokenError>;

#[cfg(test)]
mod tests;
