//! Dual-target execution backends.
//!
//! The same per-thread body (seed one [`MtState`], draw into the thread's
//! output slice) runs on every backend; backends differ only in how they
//! schedule threads:
//!
//! - [`HostBackend`]: one host thread visits every grid thread in order
//! - [`DeviceBackend`]: grid threads run concurrently on a worker pool,
//!   each owning its state exclusively, as on an accelerator
//!
//! Static dispatch is used throughout; [`Backend`] selects a target at run
//! time without trait objects.

mod device;
mod host;

pub use device::DeviceBackend;
pub use host::HostBackend;

use std::fmt;
use std::str::FromStr;

use mtrand_core::{next_f64, next_u32, MtState};

use crate::error::{KernelError, Result};
use crate::launch::LaunchConfig;

/// A target that executes a launch grid of generator threads.
///
/// Implementations must produce thread-major output: thread `t` writes
/// `out[t * d..(t + 1) * d]` where `d` is
/// [`LaunchConfig::draws_per_thread`], seeding its generator with
/// [`LaunchConfig::thread_seed`]`(t)`.
pub trait MtBackend: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// Runs the launch, writing `draw(state)` for every slot of `out`.
    ///
    /// # Errors
    ///
    /// [`KernelError::OutputSize`] if `out.len()` differs from
    /// [`LaunchConfig::output_len`].
    fn launch<T, F>(&self, launch: &LaunchConfig, out: &mut [T], draw: F) -> Result<()>
    where
        T: Send,
        F: Fn(&mut MtState) -> T + Sync;

    /// Fills `out` with tempered 32-bit values.
    fn fill_u32(&self, launch: &LaunchConfig, out: &mut [u32]) -> Result<()> {
        self.launch(launch, out, next_u32)
    }

    /// Fills `out` with values in `[0.0, 1.0]`.
    fn fill_f64(&self, launch: &LaunchConfig, out: &mut [f64]) -> Result<()> {
        self.launch(launch, out, next_f64)
    }

    /// Allocates and fills a buffer of tempered 32-bit values.
    fn generate_u32(&self, launch: &LaunchConfig) -> Result<Vec<u32>> {
        let mut out = vec![0u32; launch.output_len()];
        self.fill_u32(launch, &mut out)?;
        Ok(out)
    }

    /// Allocates and fills a buffer of values in `[0.0, 1.0]`.
    fn generate_f64(&self, launch: &LaunchConfig) -> Result<Vec<f64>> {
        let mut out = vec![0.0; launch.output_len()];
        self.fill_f64(launch, &mut out)?;
        Ok(out)
    }
}

/// Per-thread body shared by every backend.
#[inline]
pub(crate) fn run_thread<T, F>(launch: &LaunchConfig, global_index: u32, out: &mut [T], draw: &F)
where
    F: Fn(&mut MtState) -> T,
{
    let mut state = MtState::new(launch.thread_seed(global_index));
    for slot in out.iter_mut() {
        *slot = draw(&mut state);
    }
}

pub(crate) fn check_output(launch: &LaunchConfig, actual: usize) -> Result<()> {
    let expected = launch.output_len();
    if actual != expected {
        return Err(KernelError::OutputSize { expected, actual });
    }
    Ok(())
}

/// Execution target selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Sequential host execution.
    Host,
    /// Accelerator grid execution.
    #[default]
    Device,
}

impl BackendKind {
    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Host => "host",
            BackendKind::Device => "device",
        }
    }

    /// Returns the other target, for cross-checking.
    pub fn other(&self) -> Self {
        match self {
            BackendKind::Host => BackendKind::Device,
            BackendKind::Device => BackendKind::Host,
        }
    }
}

impl FromStr for BackendKind {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "host" | "cpu" => Ok(BackendKind::Host),
            "device" | "gpu" => Ok(BackendKind::Device),
            _ => Err(KernelError::UnknownBackend(s.to_string())),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run-time selected backend.
#[derive(Clone, Debug)]
pub enum Backend {
    /// Host target.
    Host(HostBackend),
    /// Device target.
    Device(DeviceBackend),
}

impl Backend {
    /// Creates the default backend for `kind`.
    pub fn from_kind(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Host => Backend::Host(HostBackend),
            BackendKind::Device => Backend::Device(DeviceBackend::new()),
        }
    }

    /// Returns the target kind.
    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Host(_) => BackendKind::Host,
            Backend::Device(_) => BackendKind::Device,
        }
    }
}

impl MtBackend for Backend {
    fn name(&self) -> &'static str {
        match self {
            Backend::Host(b) => b.name(),
            Backend::Device(b) => b.name(),
        }
    }

    fn launch<T, F>(&self, launch: &LaunchConfig, out: &mut [T], draw: F) -> Result<()>
    where
        T: Send,
        F: Fn(&mut MtState) -> T + Sync,
    {
        match self {
            Backend::Host(b) => b.launch(launch, out, draw),
            Backend::Device(b) => b.launch(launch, out, draw),
        }
    }
}
