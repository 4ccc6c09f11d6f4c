//! Launch command implementation
//!
//! Runs one generator per grid thread on the configured backend and prints
//! a per-thread summary. With `--verify` the same launch is repeated on the
//! other backend and the two buffers are compared element for element.

use std::io::Write;
use std::time::Instant;

use mtrand_kernel::{Backend, LaunchConfig, MtBackend};
use tracing::{info, warn};

use crate::config::{CliConfig, OutputFormat};
use crate::{CliError, Result};

/// Output buffer of one launch.
#[derive(Debug, Clone, PartialEq)]
enum Samples {
    U32(Vec<u32>),
    F64(Vec<f64>),
}

impl Samples {
    fn generate(backend: &Backend, launch: &LaunchConfig, format: OutputFormat) -> Result<Self> {
        Ok(match format {
            OutputFormat::U32 => Samples::U32(backend.generate_u32(launch)?),
            OutputFormat::F64 => Samples::F64(backend.generate_f64(launch)?),
        })
    }

    /// First value and mean of `thread`'s draws.
    fn thread_summary(&self, thread: usize, draws: usize) -> (String, f64) {
        let range = thread * draws..(thread + 1) * draws;
        match self {
            Samples::U32(values) => {
                let chunk = &values[range];
                let mean = chunk.iter().map(|&v| v as f64).sum::<f64>() / draws as f64;
                (chunk[0].to_string(), mean)
            }
            Samples::F64(values) => {
                let chunk = &values[range];
                let mean = chunk.iter().sum::<f64>() / draws as f64;
                (format!("{:.6}", chunk[0]), mean)
            }
        }
    }

    fn first_mismatch(&self, other: &Samples) -> Option<usize> {
        match (self, other) {
            (Samples::U32(a), Samples::U32(b)) => position_of_difference(a, b),
            (Samples::F64(a), Samples::F64(b)) => position_of_difference(a, b),
            _ => Some(0),
        }
    }
}

fn position_of_difference<T: PartialEq>(a: &[T], b: &[T]) -> Option<usize> {
    if a.len() != b.len() {
        return Some(a.len().min(b.len()));
    }
    a.iter().zip(b).position(|(x, y)| x != y)
}

/// Run the launch command
pub fn run<W: Write>(config: &CliConfig, verify: bool, out: &mut W) -> Result<()> {
    let launch = config.launch_config()?;
    let backend = Backend::from_kind(config.backend);
    let draws = launch.draws_per_thread();

    info!(
        backend = backend.name(),
        grid_dim = launch.grid_dim(),
        block_dim = launch.block_dim(),
        draws_per_thread = draws,
        base_seed = launch.base_seed(),
        "Starting launch"
    );

    let start = Instant::now();
    let samples = Samples::generate(&backend, &launch, config.format)?;
    let elapsed = start.elapsed();

    writeln!(
        out,
        "{:>8} {:>6} {:>6} {:>10} {:>12} {:>14}",
        "global", "block", "thread", "seed", "first", "mean"
    )?;
    for global in 0..launch.total_threads() {
        let index = launch.thread_index(global as u32);
        let (first, mean) = samples.thread_summary(global, draws);
        writeln!(
            out,
            "{:>8} {:>6} {:>6} {:>10} {:>12} {:>14.6}",
            global,
            index.block,
            index.thread,
            launch.thread_seed(global as u32),
            first,
            mean
        )?;
    }
    writeln!(
        out,
        "{} values from {} threads on {} in {:.3} ms",
        launch.output_len(),
        launch.total_threads(),
        backend.name(),
        elapsed.as_secs_f64() * 1_000.0
    )?;

    if verify {
        let reference = Backend::from_kind(config.backend.other());
        let expected = Samples::generate(&reference, &launch, config.format)?;

        if let Some(index) = samples.first_mismatch(&expected) {
            warn!(index, "Backend outputs differ");
            return Err(CliError::SelfCheckFailed(format!(
                "{} output differs from {} at element {}",
                backend.name(),
                reference.name(),
                index
            )));
        }
        writeln!(out, "verified: {} == {}", backend.name(), reference.name())?;
    }

    out.flush()?;
    info!("Launch complete");
    Ok(())
}
