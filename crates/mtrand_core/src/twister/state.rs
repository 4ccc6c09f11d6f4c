//! Generator state record.
//!
//! [`MtState`] is the sole data entity of the generator: 624 words plus an
//! extraction cursor. It is `#[repr(C)]` plain-old-data so that a device
//! buffer of states can be copied to and from the host bit-for-bit.

use bytemuck::{Pod, Zeroable};
use std::fmt;

use super::ops;
use super::STATE_SIZE;
use crate::error::StateError;

/// MT19937 state vector and extraction cursor (2500 bytes, device-friendly).
///
/// # Invariants
///
/// - `words` always holds exactly 624 words
/// - `position` is in `[0, 624]`; `624` means the vector is exhausted and
///   the next extraction twists first
///
/// Every safe constructor ([`MtState::new`], [`MtState::from_words`],
/// [`MtState::from_bytes`]) establishes these invariants.
///
/// # Forking
///
/// `MtState` is `Copy`. A copy is a separate generator whose future output
/// is identical to the original's.
///
/// # Examples
///
/// ```rust
/// use mtrand_core::twister::{next_u32, MtState};
///
/// let mut a = MtState::new(42);
/// let mut b = a;
/// assert_eq!(next_u32(&mut a), next_u32(&mut b));
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct MtState {
    pub(crate) words: [u32; STATE_SIZE],
    pub(crate) position: u32,
}

// SAFETY: MtState is #[repr(C)] with only u32 fields and no padding
unsafe impl Zeroable for MtState {}
unsafe impl Pod for MtState {}

impl MtState {
    /// Creates a state seeded with `seed`.
    ///
    /// The returned state is exhausted (`position == 624`), so the first
    /// extraction regenerates the vector before reading from it.
    #[inline]
    pub fn new(seed: u32) -> Self {
        let mut state = Self::zeroed();
        ops::initialize(&mut state, seed);
        state
    }

    /// Rebuilds a state from a captured word vector and cursor.
    ///
    /// # Errors
    ///
    /// - [`StateError::InvalidLength`] if `words` is not 624 long
    /// - [`StateError::PositionOutOfRange`] if `position > 624`
    /// - [`StateError::Degenerate`] if every word is zero
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mtrand_core::MtState;
    ///
    /// let original = MtState::new(7);
    /// let restored = MtState::from_words(original.words(), original.position()).unwrap();
    /// assert_eq!(original, restored);
    ///
    /// assert!(MtState::from_words(&[1, 2, 3], 0).is_err());
    /// ```
    pub fn from_words(words: &[u32], position: u32) -> Result<Self, StateError> {
        let words: [u32; STATE_SIZE] =
            words.try_into().map_err(|_| StateError::InvalidLength {
                expected: STATE_SIZE,
                actual: words.len(),
            })?;
        let state = Self { words, position };
        state.validate()?;
        Ok(state)
    }

    /// Rebuilds a state from its raw `#[repr(C)]` byte image.
    ///
    /// The buffer need not be aligned. This is the inverse of
    /// [`MtState::as_bytes`].
    ///
    /// # Errors
    ///
    /// [`StateError::InvalidBytes`] if the buffer is not exactly
    /// `size_of::<MtState>()` bytes, otherwise the same errors as
    /// [`MtState::from_words`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StateError> {
        let state: Self = bytemuck::try_pod_read_unaligned(bytes)
            .map_err(|e| StateError::InvalidBytes(format!("{} ({} bytes)", e, bytes.len())))?;
        state.validate()?;
        Ok(state)
    }

    /// Returns the raw byte image of the state, for device transfer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Returns the 624-word state vector.
    #[inline]
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Returns the extraction cursor.
    #[inline]
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Returns `true` when the next extraction will twist first.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.position as usize == STATE_SIZE
    }

    pub(crate) fn validate(&self) -> Result<(), StateError> {
        if self.position as usize > STATE_SIZE {
            return Err(StateError::PositionOutOfRange(self.position));
        }
        if self.words.iter().all(|&w| w == 0) {
            return Err(StateError::Degenerate);
        }
        Ok(())
    }
}

impl fmt::Debug for MtState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MtState")
            .field("position", &self.position)
            .field("head", &&self.words[..4])
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_size() {
        assert_eq!(std::mem::size_of::<MtState>(), 4 * STATE_SIZE + 4);
        assert_eq!(std::mem::align_of::<MtState>(), 4);
    }

    #[test]
    fn test_new_is_exhausted() {
        let state = MtState::new(5489);
        assert!(state.is_exhausted());
        assert_eq!(state.position(), 624);
        assert_eq!(state.words()[0], 5489);
        assert_eq!(state.words().len(), STATE_SIZE);
    }

    #[test]
    fn test_from_words_rejects_bad_length() {
        let err = MtState::from_words(&[1; 623], 0).unwrap_err();
        assert_eq!(
            err,
            StateError::InvalidLength {
                expected: 624,
                actual: 623
            }
        );
    }

    #[test]
    fn test_from_words_rejects_bad_position() {
        let words = [1u32; STATE_SIZE];
        assert_eq!(
            MtState::from_words(&words, 625).unwrap_err(),
            StateError::PositionOutOfRange(625)
        );
        assert!(MtState::from_words(&words, 624).is_ok());
        assert!(MtState::from_words(&words, 0).is_ok());
    }

    #[test]
    fn test_from_words_rejects_zero_state() {
        let words = [0u32; STATE_SIZE];
        assert_eq!(
            MtState::from_words(&words, 0).unwrap_err(),
            StateError::Degenerate
        );
    }

    #[test]
    fn test_bytes_roundtrip() {
        let state = MtState::new(2024);
        let bytes = state.as_bytes().to_vec();
        assert_eq!(bytes.len(), std::mem::size_of::<MtState>());
        assert_eq!(MtState::from_bytes(&bytes).unwrap(), state);
    }

    #[test]
    fn test_from_bytes_unaligned() {
        let state = MtState::new(99);
        let mut buffer = vec![0u8; 1];
        buffer.extend_from_slice(state.as_bytes());
        assert_eq!(MtState::from_bytes(&buffer[1..]).unwrap(), state);
    }

    #[test]
    fn test_from_bytes_rejects_short_buffer() {
        let err = MtState::from_bytes(&[0u8; 16]).unwrap_err();
        assert!(matches!(err, StateError::InvalidBytes(_)));
    }

    #[test]
    fn test_from_bytes_rejects_zeroed_record() {
        let zeroed = MtState::zeroed();
        assert_eq!(
            MtState::from_bytes(zeroed.as_bytes()).unwrap_err(),
            StateError::Degenerate
        );
    }

    #[test]
    fn test_debug_is_compact() {
        let rendered = format!("{:?}", MtState::new(1));
        assert!(rendered.contains("position: 624"));
        assert!(rendered.len() < 200);
    }
}
