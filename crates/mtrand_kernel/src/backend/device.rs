//! Accelerator grid backend.
//!
//! Emulates a kernel launch on a Rayon worker pool: every grid thread is
//! an independent task that seeds and owns one [`MtState`] and writes only
//! its own output slice, so no two tasks ever touch the same state or the
//! same output element.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use mtrand_core::MtState;

use super::{check_output, run_thread, MtBackend};
use crate::error::{KernelError, Result};
use crate::launch::{LaunchConfig, ThreadIndex};

/// Runs grid threads concurrently, one generator per thread.
///
/// By default the global Rayon pool is used; [`DeviceBackend::with_workers`]
/// creates a dedicated pool.
///
/// # Examples
///
/// ```rust
/// use mtrand_kernel::{DeviceBackend, LaunchConfig, MtBackend};
///
/// let backend = DeviceBackend::with_workers(2).unwrap();
/// assert_eq!(backend.workers(), 2);
///
/// let launch = LaunchConfig::builder().grid_dim(4).block_dim(8).build().unwrap();
/// let out = backend.generate_f64(&launch).unwrap();
/// assert_eq!(out.len(), 32);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DeviceBackend {
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl DeviceBackend {
    /// Creates a backend on the global Rayon pool.
    pub fn new() -> Self {
        Self { pool: None }
    }

    /// Creates a backend with a dedicated pool of `workers` threads.
    ///
    /// # Errors
    ///
    /// [`KernelError::ThreadPool`] if the pool cannot be built.
    pub fn with_workers(workers: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("mtrand-device-{}", i))
            .build()
            .map_err(|e| KernelError::ThreadPool(e.to_string()))?;
        Ok(Self {
            pool: Some(Arc::new(pool)),
        })
    }

    /// Returns the number of worker threads executing grid threads.
    pub fn workers(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }
}

impl MtBackend for DeviceBackend {
    fn name(&self) -> &'static str {
        "device"
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
            workers = self.workers(),
            "Launching generator grid"
        );

        match &self.pool {
            Some(pool) => pool.install(|| run_grid(launch, out, &draw)),
            None => run_grid(launch, out, &draw),
        }
        Ok(())
    }
}

/// Blocks run concurrently; threads within a block run concurrently.
fn run_grid<T, F>(launch: &LaunchConfig, out: &mut [T], draw: &F)
where
    T: Send,
    F: Fn(&mut MtState) -> T + Sync,
{
    let draws = launch.draws_per_thread();
    let block_dim = launch.block_dim();
    let block_len = block_dim as usize * draws;

    out.par_chunks_mut(block_len)
        .enumerate()
        .for_each(|(block, block_out)| {
            block_out
                .par_chunks_mut(draws)
                .enumerate()
                .for_each(|(thread, thread_out)| {
                    let index = ThreadIndex {
                        block: block as u32,
                        thread: thread as u32,
                        block_dim,
                    };
                    run_thread(launch, index.global(), thread_out, draw);
                });
        });
}
