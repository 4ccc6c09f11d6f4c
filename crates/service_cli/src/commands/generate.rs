//! Generate command implementation
//!
//! Prints `count` values from a single generator seeded with `seed`, one
//! per line.

use std::io::Write;

use mtrand_core::Mt19937;
use tracing::info;

use crate::config::{CliConfig, OutputFormat};
use crate::Result;

/// Run the generate command
pub fn run<W: Write>(config: &CliConfig, out: &mut W) -> Result<()> {
    info!(
        seed = config.seed,
        count = config.count,
        format = %config.format,
        "Generating values"
    );

    let mut rng = Mt19937::new(config.seed);
    match config.format {
        OutputFormat::F64 => {
            for _ in 0..config.count {
                writeln!(out, "{:.6}", rng.next_f64())?;
            }
        }
        OutputFormat::U32 => {
            for _ in 0..config.count {
                writeln!(out, "{}", rng.next_u32())?;
            }
        }
    }
    out.flush()?;

    Ok(())
}
