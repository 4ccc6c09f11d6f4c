//! Launch configuration for per-thread generator streams.
//!
//! A launch is a one-dimensional grid of blocks, each block a
//! one-dimensional group of threads. Every thread seeds and owns exactly
//! one generator and draws a fixed number of values from it.

use mtrand_core::DEFAULT_SEED;

use crate::error::{KernelError, Result};

/// Maximum number of blocks in a grid.
pub const MAX_GRID_DIM: u32 = 65_535;

/// Maximum number of threads in a block.
pub const MAX_BLOCK_DIM: u32 = 1_024;

/// Maximum number of draws per thread.
pub const MAX_DRAWS_PER_THREAD: usize = 1_000_000;

/// Maximum number of output elements in one launch.
pub const MAX_OUTPUT_LEN: usize = 1 << 28;

/// Position of one thread within a launch grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ThreadIndex {
    /// Block index within the grid.
    pub block: u32,
    /// Thread index within the block.
    pub thread: u32,
    /// Threads per block.
    pub block_dim: u32,
}

impl ThreadIndex {
    /// Returns the flat global index `block * block_dim + thread`.
    #[inline]
    pub fn global(&self) -> u32 {
        self.block * self.block_dim + self.thread
    }
}

/// Immutable launch description.
///
/// Use [`LaunchConfig::builder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use mtrand_kernel::LaunchConfig;
///
/// let launch = LaunchConfig::builder()
///     .grid_dim(4)
///     .block_dim(256)
///     .draws_per_thread(16)
///     .base_seed(42)
///     .build()
///     .expect("valid launch");
///
/// assert_eq!(launch.total_threads(), 1024);
/// assert_eq!(launch.output_len(), 16_384);
/// assert_eq!(launch.thread_seed(3), 45);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchConfig {
    grid_dim: u32,
    block_dim: u32,
    draws_per_thread: usize,
    base_seed: u32,
}

impl LaunchConfig {
    /// Creates a new launch builder.
    #[inline]
    pub fn builder() -> LaunchConfigBuilder {
        LaunchConfigBuilder::default()
    }

    /// Returns the number of blocks.
    #[inline]
    pub fn grid_dim(&self) -> u32 {
        self.grid_dim
    }

    /// Returns the number of threads per block.
    #[inline]
    pub fn block_dim(&self) -> u32 {
        self.block_dim
    }

    /// Returns the number of values each thread draws.
    #[inline]
    pub fn draws_per_thread(&self) -> usize {
        self.draws_per_thread
    }

    /// Returns the base seed combined with each thread's global index.
    #[inline]
    pub fn base_seed(&self) -> u32 {
        self.base_seed
    }

    /// Returns the number of threads in the grid.
    #[inline]
    pub fn total_threads(&self) -> usize {
        self.grid_dim as usize * self.block_dim as usize
    }

    /// Returns the number of output elements the launch writes.
    #[inline]
    pub fn output_len(&self) -> usize {
        self.total_threads() * self.draws_per_thread
    }

    /// Derives the seed of the thread at `global_index`.
    ///
    /// The seed is `base_seed + global_index` with 32-bit wraparound, so
    /// thread 0 reproduces a standalone generator seeded with `base_seed`.
    #[inline]
    pub fn thread_seed(&self, global_index: u32) -> u32 {
        self.base_seed.wrapping_add(global_index)
    }

    /// Returns the grid position of the thread at `global_index`.
    #[inline]
    pub fn thread_index(&self, global_index: u32) -> ThreadIndex {
        ThreadIndex {
            block: global_index / self.block_dim,
            thread: global_index % self.block_dim,
            block_dim: self.block_dim,
        }
    }

    /// Validates the launch.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::InvalidLaunch`] if:
    /// - `grid_dim` is 0 or greater than 65,535
    /// - `block_dim` is 0 or greater than 1,024
    /// - `draws_per_thread` is 0 or greater than 1,000,000
    /// - the total output exceeds 2^28 elements
    pub fn validate(&self) -> Result<()> {
        if self.grid_dim == 0 || self.grid_dim > MAX_GRID_DIM {
            return Err(out_of_range("grid_dim", self.grid_dim, MAX_GRID_DIM));
        }
        if self.block_dim == 0 || self.block_dim > MAX_BLOCK_DIM {
            return Err(out_of_range("block_dim", self.block_dim, MAX_BLOCK_DIM));
        }
        if self.draws_per_thread == 0 || self.draws_per_thread > MAX_DRAWS_PER_THREAD {
            return Err(out_of_range(
                "draws_per_thread",
                self.draws_per_thread,
                MAX_DRAWS_PER_THREAD,
            ));
        }
        if self.output_len() > MAX_OUTPUT_LEN {
            return Err(KernelError::InvalidLaunch {
                name: "output_len",
                value: format!(
                    "{} elements exceeds the limit of {}",
                    self.output_len(),
                    MAX_OUTPUT_LEN
                ),
            });
        }
        Ok(())
    }
}

fn out_of_range<T: std::fmt::Display>(name: &'static str, value: T, max: T) -> KernelError {
    KernelError::InvalidLaunch {
        name,
        value: format!("must be in range [1, {}], got {}", max, value),
    }
}

/// Builder for [`LaunchConfig`].
///
/// `grid_dim` and `block_dim` are required; `draws_per_thread` defaults to
/// 1 and `base_seed` to 5489.
#[derive(Clone, Debug, Default)]
pub struct LaunchConfigBuilder {
    grid_dim: Option<u32>,
    block_dim: Option<u32>,
    draws_per_thread: Option<usize>,
    base_seed: Option<u32>,
}

impl LaunchConfigBuilder {
    /// Sets the number of blocks.
    #[inline]
    pub fn grid_dim(mut self, grid_dim: u32) -> Self {
        self.grid_dim = Some(grid_dim);
        self
    }

    /// Sets the number of threads per block.
    #[inline]
    pub fn block_dim(mut self, block_dim: u32) -> Self {
        self.block_dim = Some(block_dim);
        self
    }

    /// Sets the number of draws per thread.
    #[inline]
    pub fn draws_per_thread(mut self, draws_per_thread: usize) -> Self {
        self.draws_per_thread = Some(draws_per_thread);
        self
    }

    /// Sets the base seed.
    #[inline]
    pub fn base_seed(mut self, base_seed: u32) -> Self {
        self.base_seed = Some(base_seed);
        self
    }

    /// Builds and validates the launch.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::InvalidLaunch`] if a required dimension is
    /// missing or any value is out of range.
    pub fn build(self) -> Result<LaunchConfig> {
        let grid_dim = self.grid_dim.ok_or(KernelError::InvalidLaunch {
            name: "grid_dim",
            value: "must be specified".to_string(),
        })?;
        let block_dim = self.block_dim.ok_or(KernelError::InvalidLaunch {
            name: "block_dim",
            value: "must be specified".to_string(),
        })?;

        let config = LaunchConfig {
            grid_dim,
            block_dim,
            draws_per_thread: self.draws_per_thread.unwrap_or(1),
            base_seed: self.base_seed.unwrap_or(DEFAULT_SEED),
        };
        config.validate()?;
        Ok(config)
    }
}
