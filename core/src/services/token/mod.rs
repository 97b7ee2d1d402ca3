//! Token codec module
//!
//! Signs claims into compact HS512 tokens and verifies them back. Higher-level
//! token kinds live in `domain::entities::token`.

pub mod codec;

#[cfg(test)]
mod tests;

pub use codec::{Rejection, ALGORITHM};
