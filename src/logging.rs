//! Tracing subscriber initialization.
//!
//! The engine itself only emits `tracing` events; hosts that do not install
//! a subscriber of their own can call [`init`].

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Filter directive could not be parsed
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Build the filter: `RUST_LOG` wins, otherwise `fallback`.
pub fn env_filter(fallback: &str) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(fallback).map_err(|e| LoggingError::InvalidFilter {
            filter: fallback.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Install a global fmt subscriber writing to stderr.
///
/// # Errors
/// `InvalidFilter` for a malformed fallback directive and
/// `SubscriberAlreadySet` if a global subscriber is already installed.
pub fn init(filter: &str) -> Result<(), LoggingError> {
    let env_filter = env_filter(filter)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
