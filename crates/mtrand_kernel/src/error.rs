//! Error types for launch configuration and backend execution.

use thiserror::Error;

/// Errors from building a launch or running it on a backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    /// A launch parameter is missing or outside its valid range.
    #[error("Invalid launch parameter '{name}': {value}")]
    InvalidLaunch {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },

    /// The output buffer does not match the launch size.
    #[error("Output buffer has {actual} elements: launch requires {expected}")]
    OutputSize {
        /// Elements required by the launch.
        expected: usize,
        /// Elements supplied.
        actual: usize,
    },

    /// The backend name is not recognised.
    #[error("Unknown backend: {0}. Must be one of: host, device")]
    UnknownBackend(String),

    /// The device worker pool could not be created.
    #[error("Device pool error: {0}")]
    ThreadPool(String),
}

/// Result type for kernel operations.
pub type Result<T> = std::result::Result<T, KernelError>;
