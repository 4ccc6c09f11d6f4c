//! CLI error types

use mtrand_kernel::KernelError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `mtrand` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Self-check failed: {0}")]
    SelfCheckFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
