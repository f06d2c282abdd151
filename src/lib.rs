//! Mylime - a command-line skeleton with layered configuration and structured logging.
//!
//! This library provides the startup sequence for the `mylime` CLI tool:
//! resolving the effective configuration from flags, environment variables,
//! an optional config file and defaults, then building a logger from it.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

/// Library-level error type for Mylime operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot determine home directory: pass --config <path> instead")]
    HomeDirUnavailable,
}

/// Result type alias for Mylime operations.
pub type Result<T> = std::result::Result<T, Error>;
