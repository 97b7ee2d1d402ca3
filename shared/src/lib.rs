//! Shared configuration for the stateless token crates
//!
//! This crate provides:
//! - Environment detection and logging setup
//! - Token settings loaded from the process environment

pub mod config;

pub use config::{AppConfig, Environment, LogFormat, LoggingConfig, TokenSettings};
