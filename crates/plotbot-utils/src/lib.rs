//! Shared utilities for plotbot
//!
//! This crate provides common functionality used across the plotbot workspace,
//! including logging setup and environment variable helpers.

pub mod config;
pub mod logging;

pub use config::{EnvError, EnvLookup, env_lookup, optional_parsed, require_all};
pub use logging::{DEFAULT_LOG_FILTER, init_tracing};
