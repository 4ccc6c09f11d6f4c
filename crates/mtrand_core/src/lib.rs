//! # mtrand_core: MT19937 Generator Shared by Host and Device
//!
//! ## Core Layer Role
//!
//! mtrand_core is the bottom layer of the workspace, providing:
//! - The generator state record: [`MtState`] (`twister::state`)
//! - The core operations: [`initialize`], [`next_u32`], [`next_f64`] (`twister::ops`)
//! - A constructor-enforced generator wrapper: [`Mt19937`] (`twister::generator`)
//! - Error types for state restoration: [`StateError`] (`error`)
//!
//! ## Bit-Exact Arithmetic
//!
//! Every operation is expressed on native `u32` words with wrapping
//! arithmetic, so the host build and the device build produce identical
//! output for the same seed. No 64-bit or platform-width integer takes part
//! in the state update.
//!
//! ## Usage Examples
//!
//! ```rust
//! use mtrand_core::{Mt19937, DEFAULT_SEED};
//!
//! let mut rng = Mt19937::new(DEFAULT_SEED);
//! assert_eq!(rng.next_u32(), 3_499_211_612);
//!
//! let u = rng.next_f64();
//! assert!((0.0..=1.0).contains(&u));
//! ```
//!
//! ## Ownership Model
//!
//! A generator never synchronises. Each execution context owns its own
//! [`Mt19937`] (or raw [`MtState`]) exclusively; parallel streams are
//! obtained by seeding one instance per context.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod twister;

pub use error::StateError;
pub use twister::{
    initialize, next_f64, next_u32, temper, Mt19937, MtState, DEFAULT_SEED, STATE_SIZE,
};
