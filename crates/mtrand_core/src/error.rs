//! Error types for generator state restoration.
//!
//! The core operations (seeding, twist, extraction, float mapping) are
//! total and never fail. Errors only arise when a state captured elsewhere
//! (device memory, a checkpoint buffer) is turned back into an [`MtState`].
//!
//! [`MtState`]: crate::MtState

use thiserror::Error;

/// Errors from rebuilding an [`MtState`](crate::MtState) from raw parts.
///
/// # Examples
/// ```
/// use mtrand_core::StateError;
///
/// let err = StateError::PositionOutOfRange(625);
/// assert_eq!(
///     format!("{}", err),
///     "State position 625 is out of range: must be in [0, 624]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// The word slice does not hold exactly 624 words.
    #[error("Invalid state length {actual}: expected {expected} words")]
    InvalidLength {
        /// Required number of words.
        expected: usize,
        /// Number of words supplied.
        actual: usize,
    },

    /// The cursor lies beyond the end of the state vector.
    #[error("State position {0} is out of range: must be in [0, 624]")]
    PositionOutOfRange(u32),

    /// Every word is zero; the twist can never leave this state.
    #[error("Degenerate state: all words are zero")]
    Degenerate,

    /// The byte buffer cannot be read as a state record.
    #[error("Invalid state bytes: {0}")]
    InvalidBytes(String),
}
