//! Always-initialised MT19937 generator for host-side consumers.
//!
//! This module provides [`Mt19937`], a wrapper over [`MtState`] that can
//! only be obtained by seeding (or by adopting an already valid state), so
//! extraction from an uninitialised vector cannot be expressed.

use rand::{RngCore, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

use super::ops;
use super::state::MtState;
use super::DEFAULT_SEED;
use crate::error::StateError;

/// Seeded MT19937 generator.
///
/// Provides reproducible extraction of tempered `u32` values and `f64`
/// values in `[0.0, 1.0]`, with zero-allocation batch helpers.
///
/// # Ownership
///
/// A generator is `Send` but is never shared mutably; each execution
/// context owns its own instance. Cloning produces an independent fork
/// with identical future output.
///
/// # Examples
///
/// ```rust
/// use mtrand_core::Mt19937;
///
/// let mut rng = Mt19937::new(5489);
///
/// // Single values
/// let x: u32 = rng.next_u32();
/// let u: f64 = rng.next_f64();
///
/// // Batch generation (zero allocation)
/// let mut buffer = vec![0.0; 100];
/// rng.fill_f64(&mut buffer);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mt19937 {
    /// The state vector and cursor.
    state: MtState,
    /// The seed used for initialisation, if known.
    seed: Option<u32>,
}

impl Mt19937 {
    /// Creates a generator initialised with the given seed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mtrand_core::Mt19937;
    ///
    /// let mut rng1 = Mt19937::new(12345);
    /// let mut rng2 = Mt19937::new(12345);
    ///
    /// // Same seed produces identical sequences
    /// assert_eq!(rng1.next_u32(), rng2.next_u32());
    /// ```
    #[inline]
    pub fn new(seed: u32) -> Self {
        Self {
            state: MtState::new(seed),
            seed: Some(seed),
        }
    }

    /// Adopts a previously captured state after validating it.
    ///
    /// The seed of an adopted state is unknown, so [`Mt19937::seed`]
    /// returns `None`. Use [`Clone`] to fork a live generator.
    ///
    /// # Errors
    ///
    /// - [`StateError::PositionOutOfRange`] if the cursor exceeds 624
    /// - [`StateError::Degenerate`] if every word is zero (for example a
    ///   `Zeroable::zeroed` record)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mtrand_core::Mt19937;
    ///
    /// let mut original = Mt19937::new(7);
    /// original.next_u32();
    ///
    /// let mut adopted = Mt19937::from_state(*original.state()).unwrap();
    /// assert_eq!(adopted.seed(), None);
    /// assert_eq!(adopted.next_u32(), original.next_u32());
    /// ```
    pub fn from_state(state: MtState) -> Result<Self, StateError> {
        state.validate()?;
        Ok(Self { state, seed: None })
    }

    /// Returns the seed used for initialisation, or `None` for an adopted state.
    #[inline]
    pub fn seed(&self) -> Option<u32> {
        self.seed
    }

    /// Returns the current extraction cursor in `[0, 624]`.
    #[inline]
    pub fn position(&self) -> u32 {
        self.state.position()
    }

    /// Returns the underlying state record.
    #[inline]
    pub fn state(&self) -> &MtState {
        &self.state
    }

    /// Consumes the generator and returns its state record.
    #[inline]
    pub fn into_state(self) -> MtState {
        self.state
    }

    /// Extracts one tempered 32-bit value.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        ops::next_u32(&mut self.state)
    }

    /// Extracts one value mapped onto `[0.0, 1.0]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mtrand_core::Mt19937;
    ///
    /// let mut rng = Mt19937::new(42);
    /// let value = rng.next_f64();
    /// assert!((0.0..=1.0).contains(&value));
    /// ```
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        ops::next_f64(&mut self.state)
    }

    /// Fills the buffer with consecutive tempered 32-bit values.
    ///
    /// Empty buffers are a no-op.
    #[inline]
    pub fn fill_u32(&mut self, buffer: &mut [u32]) {
        for value in buffer.iter_mut() {
            *value = ops::next_u32(&mut self.state);
        }
    }

    /// Fills the buffer with consecutive values in `[0.0, 1.0]`.
    ///
    /// Empty buffers are a no-op.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mtrand_core::Mt19937;
    ///
    /// let mut rng = Mt19937::new(42);
    /// let mut buffer = vec![0.0; 1000];
    /// rng.fill_f64(&mut buffer);
    ///
    /// for &value in &buffer {
    ///     assert!((0.0..=1.0).contains(&value));
    /// }
    /// ```
    #[inline]
    pub fn fill_f64(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = ops::next_f64(&mut self.state);
        }
    }

    /// Generates a single standard normal variate (mean=0, std=1).
    ///
    /// Uses the Ziggurat algorithm via `rand_distr::StandardNormal`, drawing
    /// 64-bit inputs as two consecutive 32-bit extractions.
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(self)
    }

    /// Fills the buffer with standard normal variates.
    ///
    /// Empty buffers are a no-op.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(self);
        }
    }
}

impl Default for Mt19937 {
    /// Creates a generator seeded with [`DEFAULT_SEED`] (5489).
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RngCore for Mt19937 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        ops::next_u32(&mut self.state)
    }

    /// Low word first, matching `rand_core::impls::next_u64_via_u32`.
    #[inline]
    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_u32(self)
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mt19937 {
    /// Little-endian `u32` seed.
    type Seed = [u8; 4];

    #[inline]
    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    /// Keeps the low 32 bits of `state`, so `seed_from_u64(5489)` equals
    /// `Mt19937::new(5489)`.
    #[inline]
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}
