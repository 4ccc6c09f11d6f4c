//! # mtrand_kernel (Kernel Layer: Launch Backends)
//!
//! Runs one MT19937 stream per thread over a launch grid, on either
//! execution target.
//!
//! This crate provides:
//! - A launch description with validated dimensions and per-thread seed
//!   derivation ([`LaunchConfig`])
//! - The dual-target backend trait ([`MtBackend`]) with a host
//!   implementation ([`HostBackend`]) and an accelerator-grid
//!   implementation ([`DeviceBackend`])
//! - The CUDA C source of the same generator for external kernel drivers
//!   ([`gpu::MTRAND_KERNEL_SOURCE`])
//!
//! ## Output Layout
//!
//! Launch output is thread-major: thread `t` writes its draws to
//! `out[t * draws_per_thread..(t + 1) * draws_per_thread]`. Both backends
//! fill identical buffers for identical launches.
//!
//! ## Example
//!
//! ```rust
//! use mtrand_kernel::{DeviceBackend, HostBackend, LaunchConfig, MtBackend};
//!
//! let launch = LaunchConfig::builder()
//!     .grid_dim(2)
//!     .block_dim(32)
//!     .draws_per_thread(4)
//!     .base_seed(5489)
//!     .build()
//!     .unwrap();
//!
//! let host = HostBackend.generate_u32(&launch).unwrap();
//! let device = DeviceBackend::new().generate_u32(&launch).unwrap();
//! assert_eq!(host, device);
//! assert_eq!(host[0], 3_499_211_612);
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod error;
pub mod gpu;
pub mod launch;

pub use backend::{Backend, BackendKind, DeviceBackend, HostBackend, MtBackend};
pub use error::{KernelError, Result};
pub use launch::{LaunchConfig, LaunchConfigBuilder, ThreadIndex};
