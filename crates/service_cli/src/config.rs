//! CLI configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use mtrand_core::DEFAULT_SEED;
use mtrand_kernel::{BackendKind, KernelError, LaunchConfig};
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable overriding the seed.
pub const ENV_SEED: &str = "MTRAND_SEED";
/// Environment variable overriding the sample count.
pub const ENV_COUNT: &str = "MTRAND_COUNT";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "MTRAND_LOG_LEVEL";
/// Environment variable overriding the backend.
pub const ENV_BACKEND: &str = "MTRAND_BACKEND";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: u32, f64")]
    InvalidFormat(String),

    #[error("Invalid backend: {0}. Must be one of: host, device")]
    InvalidBackend(String),

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Printed representation of generated values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Raw tempered 32-bit words
    U32,
    /// Unit-interval reals with six decimals
    #[default]
    F64,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "u32" | "int" => Ok(OutputFormat::U32),
            "f64" | "real" | "float" => Ok(OutputFormat::F64),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::U32 => write!(f, "u32"),
            OutputFormat::F64 => write!(f, "f64"),
        }
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Generator seed (base seed for launches)
    pub seed: u32,
    /// Number of values printed by `generate`
    pub count: usize,
    /// Output format
    #[serde(deserialize_with = "deserialize_format")]
    pub format: OutputFormat,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Blocks per launch
    pub grid_dim: u32,
    /// Threads per block
    pub block_dim: u32,
    /// Values drawn by each launch thread
    pub draws_per_thread: usize,
    /// Execution target for launches
    #[serde(deserialize_with = "deserialize_backend")]
    pub backend: BackendKind,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_format<'de, D>(deserializer: D) -> Result<OutputFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OutputFormat::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_backend<'de, D>(deserializer: D) -> Result<BackendKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_backend(&s).map_err(serde::de::Error::custom)
}

fn parse_backend(s: &str) -> Result<BackendKind, ConfigError> {
    BackendKind::from_str(s).map_err(|_| ConfigError::InvalidBackend(s.to_string()))
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            count: 100,
            format: OutputFormat::F64,
            log_level: LogLevel::Info,
            grid_dim: 4,
            block_dim: 64,
            draws_per_thread: 8,
            backend: BackendKind::Device,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Overlay values from environment variables found by `lookup`.
    ///
    /// Only variables that are present override the current values.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup(ENV_SEED) {
            self.seed = seed
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("{}={} is not a u32", ENV_SEED, seed)))?;
        }

        if let Some(count) = lookup(ENV_COUNT) {
            self.count = count.trim().parse().map_err(|_| {
                ConfigError::EnvError(format!("{}={} is not a count", ENV_COUNT, count))
            })?;
        }

        if let Some(log_level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&log_level)?;
        }

        if let Some(backend) = lookup(ENV_BACKEND) {
            self.backend = parse_backend(&backend)?;
        }

        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if let Some(count) = cli.count {
            self.count = count;
        }
        if let Some(format) = &cli.format {
            self.format = OutputFormat::from_str(format)?;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(grid_dim) = cli.grid_dim {
            self.grid_dim = grid_dim;
        }
        if let Some(block_dim) = cli.block_dim {
            self.block_dim = block_dim;
        }
        if let Some(draws) = cli.draws_per_thread {
            self.draws_per_thread = draws;
        }
        if let Some(backend) = &cli.backend {
            self.backend = parse_backend(backend)?;
        }
        Ok(())
    }

    /// Builds the launch described by this configuration.
    pub fn launch_config(&self) -> Result<LaunchConfig, KernelError> {
        LaunchConfig::builder()
            .grid_dim(self.grid_dim)
            .block_dim(self.block_dim)
            .draws_per_thread(self.draws_per_thread)
            .base_seed(self.seed)
            .build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::InvalidValue {
                name: "count",
                reason: "must be at least 1".to_string(),
            });
        }

        if let Err(KernelError::InvalidLaunch { name, value }) = self.launch_config() {
            return Err(ConfigError::InvalidValue {
                name,
                reason: value,
            });
        }

        Ok(())
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Seed override
    pub seed: Option<u32>,
    /// Sample count override
    pub count: Option<usize>,
    /// Output format override
    pub format: Option<String>,
    /// Log level override
    pub log_level: Option<String>,
    /// Grid dimension override
    pub grid_dim: Option<u32>,
    /// Block dimension override
    pub block_dim: Option<u32>,
    /// Draws per thread override
    pub draws_per_thread: Option<usize>,
    /// Backend override
    pub backend: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // Start with defaults or file config
    let mut config = if let Some(config_path) = &cli.config_file {
        CliConfig::from_file(config_path)?
    } else {
        CliConfig::default()
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;

    // Final validation
    config.validate()?;

    Ok(config)
}
