//! Unit tests for the MT19937 generator.
//!
//! This module contains tests verifying:
//! - Reference output vectors for known seeds
//! - Seed reproducibility and stream independence
//! - Twist boundary behaviour (lazy versus forced regeneration)
//! - Output range of the float mapping
//! - `rand` ecosystem integration
//! - Statistical properties via property-based testing

use super::*;
use crate::error::StateError;
use approx::assert_abs_diff_eq;
use rand::{Rng, RngCore, SeedableRng};

/// First five outputs of the reference implementation for seed 5489.
const REFERENCE_5489: [u32; 5] = [
    3_499_211_612,
    581_869_302,
    3_890_346_734,
    3_586_334_585,
    545_404_204,
];

fn draws(seed: u32, count: usize) -> Vec<u32> {
    let mut rng = Mt19937::new(seed);
    (0..count).map(|_| rng.next_u32()).collect()
}

// ============================================================================
// Reference Vectors
// ============================================================================

#[test]
fn test_default_seed_first_output() {
    let mut rng = Mt19937::default();
    assert_eq!(rng.seed(), Some(DEFAULT_SEED));
    assert_eq!(rng.next_u32(), 3_499_211_612);
}

#[test]
fn test_default_seed_reference_prefix() {
    assert_eq!(draws(DEFAULT_SEED, 5), REFERENCE_5489);
}

/// The 10000th draw for seed 5489 is the value required of `std::mt19937`.
#[test]
fn test_default_seed_ten_thousandth_output() {
    let values = draws(DEFAULT_SEED, 10_000);
    assert_eq!(values[9_999], 4_123_659_995);
}

#[test]
fn test_other_seed_reference_outputs() {
    assert_eq!(draws(0, 3), [2_357_136_044, 2_546_248_239, 3_071_714_933]);
    assert_eq!(draws(1, 3), [1_791_095_845, 4_282_876_139, 3_093_770_124]);
    assert_eq!(draws(42, 3), [1_608_637_542, 3_421_126_067, 4_083_286_876]);
}

#[test]
fn test_first_f64_matches_scaled_u32() {
    let mut rng = Mt19937::default();
    let u = rng.next_f64();
    assert_eq!(u, 3_499_211_612.0 / 4_294_967_296.0);
    assert_eq!(format!("{:.6}", u), "0.814724");
}

// ============================================================================
// Twist Boundary
// ============================================================================

/// Draws 624 and 625 straddle the first twist after the initial one.
#[test]
fn test_twist_boundary_values() {
    let values = draws(DEFAULT_SEED, 626);
    assert_eq!(values[623], 4_020_325_887);
    assert_eq!(values[624], 4_178_893_912);
}

/// Forcing the cursor to 624 mid-vector and drawing once yields the 625th
/// value of the unbroken sequence.
#[test]
fn test_forced_twist_equals_lazy_twist() {
    let unbroken = draws(DEFAULT_SEED, 625);

    let mut state = MtState::new(DEFAULT_SEED);
    for _ in 0..10 {
        next_u32(&mut state);
    }
    let forced = MtState::from_words(state.words(), STATE_SIZE as u32).unwrap();
    let mut forced = Mt19937::from_state(forced).unwrap();

    assert_eq!(forced.next_u32(), unbroken[624]);
}

#[test]
fn test_position_cycles_through_twist() {
    let mut rng = Mt19937::new(3);
    assert_eq!(rng.position(), 624);

    rng.next_u32();
    assert_eq!(rng.position(), 1);

    for _ in 1..STATE_SIZE {
        rng.next_u32();
    }
    assert_eq!(rng.position(), 624);
    assert!(rng.state().is_exhausted());

    rng.next_u32();
    assert_eq!(rng.position(), 1);
}

// ============================================================================
// Reproducibility and Independence
// ============================================================================

#[test]
fn test_seed_reproducibility() {
    let mut rng1 = Mt19937::new(12345);
    let mut rng2 = Mt19937::new(12345);

    for _ in 0..2_000 {
        assert_eq!(rng1.next_u32(), rng2.next_u32());
    }
}

#[test]
fn test_different_seeds_differ() {
    let seeds = [0u32, 1, 2, 42, 5489, 65_536, u32::MAX - 1, u32::MAX];
    let sequences: Vec<Vec<u32>> = seeds.iter().map(|&s| draws(s, 16)).collect();

    for i in 0..sequences.len() {
        for j in (i + 1)..sequences.len() {
            assert_ne!(
                sequences[i], sequences[j],
                "Seeds {} and {} produced identical sequences",
                seeds[i], seeds[j]
            );
        }
    }
}

#[test]
fn test_full_vector_not_constant() {
    let values = draws(DEFAULT_SEED, STATE_SIZE);
    let first = values[0];
    assert!(values.iter().any(|&v| v != first));
}

#[test]
fn test_clone_forks_sequence() {
    let mut original = Mt19937::new(77);
    for _ in 0..100 {
        original.next_u32();
    }
    let mut fork = original.clone();

    for _ in 0..1_000 {
        assert_eq!(original.next_u32(), fork.next_u32());
    }
}

#[test]
fn test_byte_copy_forks_sequence() {
    let mut original = Mt19937::new(11);
    original.next_u32();

    let bytes = original.state().as_bytes().to_vec();
    let mut fork = Mt19937::from_state(MtState::from_bytes(&bytes).unwrap()).unwrap();

    for _ in 0..700 {
        assert_eq!(original.next_u32(), fork.next_u32());
    }
}

#[test]
fn test_from_state_rejects_invalid_records() {
    use bytemuck::Zeroable;

    assert!(matches!(
        Mt19937::from_state(MtState::zeroed()),
        Err(StateError::Degenerate)
    ));

    let mut bytes = MtState::new(11).as_bytes().to_vec();
    let cursor = bytes.len() - 4;
    bytes[cursor..].copy_from_slice(&625u32.to_le_bytes());
    let unchecked: MtState = bytemuck::pod_read_unaligned(&bytes);
    assert!(matches!(
        Mt19937::from_state(unchecked),
        Err(StateError::PositionOutOfRange(625))
    ));
}

// ============================================================================
// Float Mapping and Batches
// ============================================================================

#[test]
fn test_f64_range() {
    let mut rng = Mt19937::new(42);

    for _ in 0..10_000 {
        let value = rng.next_f64();
        assert!(value >= 0.0, "Value {} is below 0", value);
        assert!(value <= 1.0, "Value {} is above 1", value);
    }
}

#[test]
fn test_f64_extremes() {
    assert_eq!(0u32 as f64 * U32_TO_UNIT, 0.0);
    let top = u32::MAX as f64 * U32_TO_UNIT;
    assert!(top < 1.0);
    assert_abs_diff_eq!(top, 1.0, epsilon = 1e-9);
}

#[test]
fn test_fill_matches_single_draws() {
    let mut batch = Mt19937::new(9);
    let mut single = Mt19937::new(9);

    let mut buffer = vec![0u32; 1_500];
    batch.fill_u32(&mut buffer);
    for &value in &buffer {
        assert_eq!(value, single.next_u32());
    }

    let mut floats = vec![0.0; 10];
    batch.fill_f64(&mut floats);
    for &value in &floats {
        assert_eq!(value, single.next_f64());
    }
}

#[test]
fn test_empty_buffer() {
    let mut rng = Mt19937::new(42);
    let before = rng.clone();

    rng.fill_u32(&mut []);
    rng.fill_f64(&mut []);
    rng.fill_normal(&mut []);

    assert_eq!(rng, before);
}

#[test]
fn test_uniform_mean() {
    let mut rng = Mt19937::new(99);
    let mut buffer = vec![0.0; 100_000];
    rng.fill_f64(&mut buffer);

    let mean = buffer.iter().sum::<f64>() / buffer.len() as f64;
    assert_abs_diff_eq!(mean, 0.5, epsilon = 0.01);
}

#[test]
fn test_normal_moments() {
    let mut rng = Mt19937::new(2024);
    let mut buffer = vec![0.0; 100_000];
    rng.fill_normal(&mut buffer);

    let n = buffer.len() as f64;
    let mean = buffer.iter().sum::<f64>() / n;
    let variance = buffer.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / n;

    assert_abs_diff_eq!(mean, 0.0, epsilon = 0.05);
    assert_abs_diff_eq!(variance, 1.0, epsilon = 0.1);
}

// ============================================================================
// rand Integration
// ============================================================================

#[test]
fn test_rng_core_next_u32_matches_inherent() {
    let mut via_trait = Mt19937::new(5);
    let mut inherent = Mt19937::new(5);

    for _ in 0..100 {
        assert_eq!(RngCore::next_u32(&mut via_trait), inherent.next_u32());
    }
}

#[test]
fn test_rng_core_next_u64_low_word_first() {
    let mut rng = Mt19937::default();
    let value = RngCore::next_u64(&mut rng);
    assert_eq!(value as u32, REFERENCE_5489[0]);
    assert_eq!((value >> 32) as u32, REFERENCE_5489[1]);
}

#[test]
fn test_fill_bytes_little_endian() {
    let mut rng = Mt19937::default();
    let mut bytes = [0u8; 8];
    rng.fill_bytes(&mut bytes);

    assert_eq!(&bytes[..4], &REFERENCE_5489[0].to_le_bytes());
    assert_eq!(&bytes[4..], &REFERENCE_5489[1].to_le_bytes());
}

#[test]
fn test_seedable_rng() {
    let mut from_bytes = Mt19937::from_seed(DEFAULT_SEED.to_le_bytes());
    let mut from_u64 = Mt19937::seed_from_u64(DEFAULT_SEED as u64);
    let mut truncated = Mt19937::seed_from_u64((1u64 << 32) | DEFAULT_SEED as u64);

    assert_eq!(from_bytes.next_u32(), REFERENCE_5489[0]);
    assert_eq!(from_u64.next_u32(), REFERENCE_5489[0]);
    assert_eq!(truncated.next_u32(), REFERENCE_5489[0]);
}

#[test]
fn test_rng_extension_methods() {
    let mut rng = Mt19937::new(8);
    for _ in 0..1_000 {
        let roll: u32 = rng.gen_range(1..=6);
        assert!((1..=6).contains(&roll));
    }
}

// ============================================================================
// Property-Based Tests with Proptest
// ============================================================================

use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property test: all float values lie in [0, 1] for any seed.
    #[test]
    fn prop_f64_in_range(seed in any::<u32>(), size in 1..2_000usize) {
        let mut rng = Mt19937::new(seed);
        let mut buffer = vec![0.0; size];
        rng.fill_f64(&mut buffer);

        for (i, &v) in buffer.iter().enumerate() {
            prop_assert!(
                (0.0..=1.0).contains(&v),
                "Value at index {} is out of range: {} (seed={})",
                i, v, seed
            );
        }
    }

    /// Property test: the same seed produces identical sequences.
    #[test]
    fn prop_seed_determinism(seed in any::<u32>(), count in 1..1_500usize) {
        let mut rng1 = Mt19937::new(seed);
        let mut rng2 = Mt19937::new(seed);

        for _ in 0..count {
            prop_assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    /// Property test: forcing a twist at any cursor equals the lazy twist.
    #[test]
    fn prop_forced_twist_any_position(seed in any::<u32>(), consumed in 1..624usize) {
        let mut lazy = Mt19937::new(seed);
        for _ in 0..STATE_SIZE {
            lazy.next_u32();
        }
        let expected = lazy.next_u32();

        let mut state = MtState::new(seed);
        for _ in 0..consumed {
            next_u32(&mut state);
        }
        let mut forced = MtState::from_words(state.words(), STATE_SIZE as u32).unwrap();

        prop_assert_eq!(next_u32(&mut forced), expected);
    }

    /// Property test: a restored state continues the original sequence.
    #[test]
    fn prop_restore_continues_sequence(seed in any::<u32>(), consumed in 0..1_300usize) {
        let mut original = Mt19937::new(seed);
        for _ in 0..consumed {
            original.next_u32();
        }
        let state = original.state();
        let restored = MtState::from_words(state.words(), state.position()).unwrap();
        let mut restored = Mt19937::from_state(restored).unwrap();

        for _ in 0..64 {
            prop_assert_eq!(original.next_u32(), restored.next_u32());
        }
    }
}
