//! Domain entities representing issued and parsed tokens.

pub mod claims;
pub mod token;

#[cfg(test)]
mod tests;

pub use claims::Claims;
pub use token::{AccessToken, RefreshToken, Token};
