//! mtrand CLI - Command Line Driver for the MT19937 Generator
//!
//! This is the operational entry point for the mtrand workspace.
//!
//! # Commands
//!
//! - `mtrand generate` - Print values from a single seeded generator
//! - `mtrand launch` - Run one generator per grid thread on a backend
//! - `mtrand check` - Self-test against known reference values
//! - `mtrand kernel-source` - Emit the CUDA source of the generator
//!
//! # Configuration
//!
//! Settings come from CLI arguments, `MTRAND_*` environment variables, a
//! TOML file given with `--config`, and built-in defaults, in that order of
//! precedence.
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate drives `mtrand_core` and
//! `mtrand_kernel` and owns logging initialisation.

use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use config::{build_config, CliArgs};
pub use error::{CliError, Result};

/// mtrand MT19937 Generator CLI
#[derive(Parser)]
#[command(name = "mtrand")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug log level unless --log-level is given)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Generator seed, or base seed for launches
    #[arg(short, long, global = true)]
    seed: Option<u32>,

    /// Execution target for launches (host, device)
    #[arg(short, long, global = true)]
    backend: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print values from a single seeded generator
    Generate {
        /// Number of values to print
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Output format (u32, f64)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Run one generator per grid thread and summarise each thread
    Launch {
        /// Number of blocks in the grid
        #[arg(short, long)]
        grid_dim: Option<u32>,

        /// Number of threads per block
        #[arg(short = 'k', long)]
        block_dim: Option<u32>,

        /// Values drawn by each thread
        #[arg(short, long)]
        draws_per_thread: Option<usize>,

        /// Output format (u32, f64)
        #[arg(short, long)]
        format: Option<String>,

        /// Repeat the launch on the other backend and compare outputs
        #[arg(long)]
        verify: bool,
    },

    /// Check the generator and both backends against known values
    Check,

    /// Write the CUDA kernel source
    KernelSource {
        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        let mut args = CliArgs {
            config_file: cli.config.clone(),
            seed: cli.seed,
            log_level: cli
                .log_level
                .clone()
                .or_else(|| cli.verbose.then(|| "debug".to_string())),
            backend: cli.backend.clone(),
            ..Default::default()
        };

        match &cli.command {
            Commands::Generate { count, format } => {
                args.count = *count;
                args.format = format.clone();
            }
            Commands::Launch {
                grid_dim,
                block_dim,
                draws_per_thread,
                format,
                ..
            } => {
                args.grid_dim = *grid_dim;
                args.block_dim = *block_dim;
                args.draws_per_thread = *draws_per_thread;
                args.format = format.clone();
            }
            Commands::Check | Commands::KernelSource { .. } => {}
        }
        args
    }
}

fn init_tracing(log_level: &str) {
    // Values go to stdout; logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&CliArgs::from(&cli))?;

    init_tracing(config.log_level.as_filter_str());

    info!("mtrand v{}", env!("CARGO_PKG_VERSION"));
    info!(
        seed = config.seed,
        backend = %config.backend,
        format = %config.format,
        log_level = %config.log_level,
        "Configuration loaded"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Generate { .. } => commands::generate::run(&config, &mut out),
        Commands::Launch { verify, .. } => commands::launch::run(&config, verify, &mut out),
        Commands::Check => commands::check::run(&config, &mut out),
        Commands::KernelSource { output } => {
            commands::kernel_source::run(output.as_deref(), &mut out)
        }
    }
}
