//! # MT19937 Generator
//!
//! This module implements the 32-bit Mersenne Twister (MT19937, 2002
//! initialisation revision) as a plain state record plus free functions, so
//! that the same code paths run in a host loop and inside an accelerator
//! kernel.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: One `u32` seed fixes the entire output sequence
//! - **Bit-exactness**: `u32` words with wrapping arithmetic only
//! - **Static dispatch**: No trait objects on the extraction path
//! - **Lazy regeneration**: The state vector is twisted only when the
//!   extraction cursor is exhausted, once every 624 draws
//!
//! ## Module Structure
//!
//! - [`state`]: The 624-word state record and its restoration helpers
//! - [`ops`]: Seeding, twist, tempered extraction and float mapping
//! - [`generator`]: [`Mt19937`], an always-initialised wrapper with batch
//!   helpers and `rand` ecosystem integration
//!
//! ## Usage Example
//!
//! ```rust
//! use mtrand_core::twister::{next_u32, MtState};
//!
//! // Raw state record, as a device thread would hold it
//! let mut state = MtState::new(5489);
//! assert_eq!(next_u32(&mut state), 3_499_211_612);
//! ```
//!
//! ## State Machine
//!
//! A state is either *fresh* (`position < 624`) or *exhausted*
//! (`position == 624`). Seeding leaves it exhausted, so the first draw
//! always twists.

pub mod generator;
pub mod ops;
pub mod state;

pub use generator::Mt19937;
pub use ops::{initialize, next_f64, next_u32, temper};
pub use state::MtState;

/// Number of words in the state vector (degree of recurrence).
pub const STATE_SIZE: usize = 624;

/// Middle-word offset used by the twist.
pub const SHIFT_SIZE: usize = 397;

/// Canonical MT19937 default seed.
pub const DEFAULT_SEED: u32 = 5489;

/// Coefficients of the rational normal form twist matrix.
pub const MATRIX_A: u32 = 0x9908_B0DF;

/// Most significant bit of a word.
pub const UPPER_MASK: u32 = 0x8000_0000;

/// Least significant 31 bits of a word.
pub const LOWER_MASK: u32 = 0x7FFF_FFFF;

/// Multiplier of the seeding recurrence (Knuth TAOCP Vol. 2, 3rd ed., p. 106).
pub const INIT_MULTIPLIER: u32 = 1_812_433_253;

/// Tempering mask applied after the 7-bit left shift.
pub const TEMPER_MASK_B: u32 = 0x9D2C_5680;

/// Tempering mask applied after the 15-bit left shift.
pub const TEMPER_MASK_C: u32 = 0xEFC6_0000;

/// Scale mapping a `u32` onto the unit interval (`1 / 2^32`).
pub const U32_TO_UNIT: f64 = 1.0 / 4_294_967_296.0;

#[cfg(test)]
mod tests;
