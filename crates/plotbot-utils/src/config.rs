//! Environment-backed configuration helpers
//!
//! Lookups go through an [`EnvLookup`] so callers can swap the process
//! environment for a map in tests.

use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// One or more required variables are unset or blank
    #[error("missing environment variable(s): {}", .0.join(", "))]
    Missing(Vec<String>),

    /// A variable is set but cannot be parsed
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: String, value: String },
}

/// Source of named configuration values
pub trait EnvLookup: Fn(&str) -> Option<String> {}

impl<F: Fn(&str) -> Option<String>> EnvLookup for F {}

/// Look a variable up in the process environment
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Read every variable in `names`, failing with all missing names at once
///
/// Values consisting only of whitespace count as missing.
pub fn require_all(lookup: &impl EnvLookup, names: &[&str]) -> Result<Vec<String>, EnvError> {
    let mut values = Vec::with_capacity(names.len());
    let mut missing = Vec::new();

    for &name in names {
        match lookup(name) {
            Some(value) if !value.trim().is_empty() => values.push(value),
            _ => missing.push(name.to_string()),
        }
    }

    if missing.is_empty() {
        Ok(values)
    } else {
        Err(EnvError::Missing(missing))
    }
}

/// Read and parse an optional variable
///
/// Unset and blank both yield `Ok(None)`.
pub fn optional_parsed<T: FromStr>(
    lookup: &impl EnvLookup,
    name: &str,
) -> Result<Option<T>, EnvError> {
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| EnvError::Invalid {
                name: name.to_string(),
                value: raw,
            }),
        _ => Ok(None),
    }
}
