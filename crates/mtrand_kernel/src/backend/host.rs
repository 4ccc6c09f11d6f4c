//! Sequential host backend.

use tracing::debug;

use mtrand_core::MtState;

use super::{check_output, run_thread, MtBackend};
use crate::error::Result;
use crate::launch::LaunchConfig;

/// Runs every grid thread in order on the calling thread.
///
/// This is the reference target: the device backend must match its output
/// exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostBackend;

impl MtBackend for HostBackend {
    fn name(&self) -> &'static str {
        "host"
    }

    fn launch<T, F>(&self, launch: &LaunchConfig, out: &mut [T], draw: F) -> Result<()>
    where
        T: Send,
        F: Fn(&mut MtState) -> T + Sync,
    {
        check_output(launch, out.len())?;
        debug!(
            backend = self.name(),
            grid_dim = launch.grid_dim(),
            block_dim = launch.block_dim(),
            threads = launch.total_threads(),
            draws_per_thread = launch.draws_per_thread(),
            "Launching generator grid"
        );

        for (global, chunk) in out.chunks_mut(launch.draws_per_thread()).enumerate() {
            run_thread(launch, global as u32, chunk, &draw);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtrand_core::{Mt19937, DEFAULT_SEED};

    #[test]
    fn test_single_thread_matches_generator() {
        let launch = LaunchConfig::builder()
            .grid_dim(1)
            .block_dim(1)
            .draws_per_thread(1_000)
            .build()
            .unwrap();

        let out = HostBackend.generate_u32(&launch).unwrap();
        let mut rng = Mt19937::new(DEFAULT_SEED);
        for &value in &out {
            assert_eq!(value, rng.next_u32());
        }
    }

    #[test]
    fn test_f64_output_in_range() {
        let launch = LaunchConfig::builder()
            .grid_dim(2)
            .block_dim(16)
            .draws_per_thread(64)
            .build()
            .unwrap();

        let out = HostBackend.generate_f64(&launch).unwrap();
        assert_eq!(out.len(), 2 * 16 * 64);
        assert!(out.iter().all(|v| (0.0..=1.0).contains(v)));
    }
}
