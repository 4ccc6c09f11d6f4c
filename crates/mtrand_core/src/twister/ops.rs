//! Core generator operations.
//!
//! Four operations form a strict dependency chain:
//!
//! 1. [`initialize`]: seeds the state vector and marks it exhausted
//! 2. `twist`: regenerates all 624 words (internal)
//! 3. [`next_u32`]: reads one word, twisting first when exhausted, and
//!    tempers it
//! 4. [`next_f64`]: maps one extracted word onto `[0.0, 1.0]`
//!
//! All arithmetic is on `u32` with wrapping semantics; none of these
//! functions allocate, block or fail.

use super::state::MtState;
use super::{
    INIT_MULTIPLIER, LOWER_MASK, MATRIX_A, SHIFT_SIZE, STATE_SIZE, TEMPER_MASK_B, TEMPER_MASK_C,
    U32_TO_UNIT, UPPER_MASK,
};

/// Seeds `state` from `seed` and marks it exhausted.
///
/// Applies the 2002 seeding recurrence
/// `w[i] = 1812433253 * (w[i-1] ^ (w[i-1] >> 30)) + i (mod 2^32)`.
/// Every seed is valid, including 0.
///
/// # Examples
///
/// ```rust
/// use mtrand_core::twister::{initialize, next_u32, MtState};
///
/// let mut state = MtState::new(1);
/// initialize(&mut state, 5489);
/// assert_eq!(next_u32(&mut state), 3_499_211_612);
/// ```
#[inline]
pub fn initialize(state: &mut MtState, seed: u32) {
    let words = &mut state.words;
    words[0] = seed;
    for i in 1..STATE_SIZE {
        let prev = words[i - 1];
        words[i] = INIT_MULTIPLIER
            .wrapping_mul(prev ^ (prev >> 30))
            .wrapping_add(i as u32);
    }
    state.position = STATE_SIZE as u32;
}

/// Combines the upper bit of `u` with the lower 31 bits of `v`, shifts, and
/// conditionally applies the twist matrix on the low bit of `v`.
#[inline(always)]
fn twiddle(u: u32, v: u32) -> u32 {
    (((u & UPPER_MASK) | (v & LOWER_MASK)) >> 1) ^ ((v & 1).wrapping_neg() & MATRIX_A)
}

/// Regenerates all 624 words in place and rewinds the cursor.
///
/// Word `i` becomes `w[(i + 397) % 624] ^ twiddle(w[i], w[(i + 1) % 624])`;
/// the wraparound is split into three ranges so no iteration needs a modulo.
// Once per 624 draws; out of line so `next_u32` stays small.
#[inline(never)]
pub(crate) fn twist(state: &mut MtState) {
    let w = &mut state.words;
    for i in 0..STATE_SIZE - SHIFT_SIZE {
        w[i] = w[i + SHIFT_SIZE] ^ twiddle(w[i], w[i + 1]);
    }
    for i in STATE_SIZE - SHIFT_SIZE..STATE_SIZE - 1 {
        w[i] = w[i + SHIFT_SIZE - STATE_SIZE] ^ twiddle(w[i], w[i + 1]);
    }
    w[STATE_SIZE - 1] = w[SHIFT_SIZE - 1] ^ twiddle(w[STATE_SIZE - 1], w[0]);
    state.position = 0;
}

/// Applies the MT19937 output tempering to a raw state word.
///
/// # Examples
///
/// ```rust
/// use mtrand_core::temper;
///
/// assert_eq!(temper(0), 0);
/// ```
#[inline]
pub const fn temper(mut x: u32) -> u32 {
    x ^= x >> 11;
    x ^= (x << 7) & TEMPER_MASK_B;
    x ^= (x << 15) & TEMPER_MASK_C;
    x ^= x >> 18;
    x
}

/// Extracts one tempered 32-bit value, twisting first if the vector is
/// exhausted.
///
/// A cursor at or beyond 624 counts as exhausted, so a state decoded
/// directly through `bytemuck` with an out-of-range cursor regenerates
/// instead of reading past the vector.
///
/// # Examples
///
/// ```rust
/// use mtrand_core::{next_u32, MtState};
///
/// let mut state = MtState::new(5489);
/// assert_eq!(next_u32(&mut state), 3_499_211_612);
/// assert_eq!(next_u32(&mut state), 581_869_302);
/// ```
#[inline]
pub fn next_u32(state: &mut MtState) -> u32 {
    if state.position as usize >= STATE_SIZE {
        twist(state);
    }
    let x = state.words[state.position as usize];
    state.position += 1;
    temper(x)
}

/// Extracts one value and scales it by `1 / 2^32` into `[0.0, 1.0]`.
///
/// The upper bound is inclusive by convention; the largest value actually
/// produced is `(2^32 - 1) / 2^32`.
///
/// # Examples
///
/// ```rust
/// use mtrand_core::{next_f64, MtState};
///
/// let mut state = MtState::new(5489);
/// let u = next_f64(&mut state);
/// assert!((u - 0.814_723_691_903_054_7).abs() < 1e-15);
/// ```
#[inline]
pub fn next_f64(state: &mut MtState) -> f64 {
    next_u32(state) as f64 * U32_TO_UNIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_recurrence() {
        let mut state = MtState::new(0);
        initialize(&mut state, 1);
        assert_eq!(state.words[0], 1);
        // 1812433253 * (1 ^ 0) + 1
        assert_eq!(state.words[1], 1_812_433_254);
        assert_eq!(state.position, 624);
    }

    #[test]
    fn test_initialize_zero_seed() {
        let state = MtState::new(0);
        assert_eq!(state.words[0], 0);
        assert_eq!(state.words[1], 1);
        assert!(state.words.iter().any(|&w| w != 0));
    }

    #[test]
    fn test_initialize_max_seed_wraps() {
        let state = MtState::new(u32::MAX);
        assert_eq!(state.words[0], u32::MAX);
        let expected = INIT_MULTIPLIER
            .wrapping_mul(u32::MAX ^ (u32::MAX >> 30))
            .wrapping_add(1);
        assert_eq!(state.words[1], expected);
    }

    #[test]
    fn test_twiddle_low_bit() {
        assert_eq!(twiddle(0, 0), 0);
        assert_eq!(twiddle(0, 1), MATRIX_A);
        assert_eq!(twiddle(UPPER_MASK, 0), 0x4000_0000);
        assert_eq!(twiddle(0, 2), 1);
        // Upper bits of the second operand are discarded
        assert_eq!(twiddle(0, UPPER_MASK), 0);
    }

    #[test]
    fn test_twist_resets_position() {
        let mut state = MtState::new(5489);
        twist(&mut state);
        assert_eq!(state.position, 0);
        assert!(!state.is_exhausted());
    }

    #[test]
    fn test_twist_matches_modular_form() {
        let mut state = MtState::new(31337);
        let before = state.words;
        twist(&mut state);

        // Reference form: sequential update with explicit modulo
        let mut expected = before;
        for i in 0..STATE_SIZE {
            let next = expected[(i + 1) % STATE_SIZE];
            let y = (expected[i] & UPPER_MASK) | (next & LOWER_MASK);
            let mag = if next & 1 == 1 { MATRIX_A } else { 0 };
            expected[i] = expected[(i + SHIFT_SIZE) % STATE_SIZE] ^ (y >> 1) ^ mag;
        }
        assert_eq!(state.words, expected);
    }

    #[test]
    fn test_temper_known_word() {
        // First word after twisting seed 5489
        let mut state = MtState::new(5489);
        twist(&mut state);
        assert_eq!(temper(state.words[0]), 3_499_211_612);
    }

    #[test]
    fn test_next_u32_only_twists_when_exhausted() {
        let mut state = MtState::new(5489);
        next_u32(&mut state);
        let snapshot = state.words;
        for _ in 1..STATE_SIZE {
            next_u32(&mut state);
        }
        assert_eq!(state.words, snapshot);
        assert!(state.is_exhausted());

        next_u32(&mut state);
        assert_ne!(state.words, snapshot);
        assert_eq!(state.position, 1);
    }

    #[test]
    fn test_next_u32_twists_when_cursor_past_end() {
        let seeded = MtState::new(5489);
        let mut bytes = seeded.as_bytes().to_vec();
        let cursor = bytes.len() - 4;
        bytes[cursor..].copy_from_slice(&700u32.to_le_bytes());

        // Raw Pod decode skips the range check on the cursor
        let mut decoded: MtState = bytemuck::pod_read_unaligned(&bytes);
        assert_eq!(decoded.position, 700);

        let mut expected = seeded;
        assert_eq!(next_u32(&mut decoded), next_u32(&mut expected));
        assert_eq!(decoded.position, 1);
        assert_eq!(decoded.words, expected.words);
    }
}
