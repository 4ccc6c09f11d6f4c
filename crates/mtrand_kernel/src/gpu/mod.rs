//! CUDA source of the generator for accelerator drivers.
//!
//! The kernel source implements the same four operations as
//! [`mtrand_core::twister::ops`] on 32-bit `unsigned int` words, the same
//! per-thread seed derivation as [`LaunchConfig::thread_seed`] and the same
//! thread-major output layout as the [`MtBackend`] implementations. A
//! driver compiles it (for example with NVRTC) and launches one of the
//! entry points below with a grid matching its [`LaunchConfig`].
//!
//! The device `mtrand_state` struct has the same layout as
//! [`MtState`], so a buffer of states can be copied between host and
//! device with [`MtState::as_bytes`] / [`MtState::from_bytes`].
//!
//! [`LaunchConfig`]: crate::LaunchConfig
//! [`LaunchConfig::thread_seed`]: crate::LaunchConfig::thread_seed
//! [`MtBackend`]: crate::MtBackend
//! [`MtState`]: mtrand_core::MtState
//! [`MtState::as_bytes`]: mtrand_core::MtState::as_bytes
//! [`MtState::from_bytes`]: mtrand_core::MtState::from_bytes

/// Entry point filling `unsigned int* output` from fresh per-thread seeds.
///
/// Signature: `(unsigned int* output, unsigned int draws_per_thread,
/// unsigned int base_seed)`.
pub const FILL_U32_ENTRY: &str = "mtrand_fill_u32";

/// Entry point filling `double* output` from fresh per-thread seeds.
///
/// Signature: `(double* output, unsigned int draws_per_thread,
/// unsigned int base_seed)`.
pub const FILL_F64_ENTRY: &str = "mtrand_fill_f64";

/// Entry point continuing captured per-thread states.
///
/// Signature: `(mtrand_state* states, unsigned int* output,
/// unsigned int draws_per_thread)`. Each state is read, advanced and
/// written back in place.
pub const RESUME_U32_ENTRY: &str = "mtrand_resume_u32";

/// All kernel entry points defined by [`MTRAND_KERNEL_SOURCE`].
pub const ENTRY_POINTS: [&str; 3] = [FILL_U32_ENTRY, FILL_F64_ENTRY, RESUME_U32_ENTRY];

/// CUDA kernel source for the MT19937 generator.
pub const MTRAND_KERNEL_SOURCE: &str = r#"
// MT19937 period parameters
#define MT_N 624
#define MT_M 397
#define MT_MATRIX_A 0x9908B0DFu
#define MT_UPPER_MASK 0x80000000u
#define MT_LOWER_MASK 0x7FFFFFFFu
#define MT_INIT_MULTIPLIER 1812433253u
#define MT_TEMPER_B 0x9D2C5680u
#define MT_TEMPER_C 0xEFC60000u

// Same layout as the host state record (2500 bytes)
typedef struct {
    unsigned int words[MT_N];
    unsigned int position;
} mtrand_state;

__device__ __forceinline__ void mtrand_initialize(mtrand_state* s, unsigned int seed) {
    s->words[0] = seed;
    for (unsigned int i = 1; i < MT_N; ++i) {
        unsigned int prev = s->words[i - 1];
        s->words[i] = MT_INIT_MULTIPLIER * (prev ^ (prev >> 30)) + i;
    }
    s->position = MT_N;
}

__device__ __forceinline__ unsigned int mtrand_twiddle(unsigned int u, unsigned int v) {
    return (((u & MT_UPPER_MASK) | (v & MT_LOWER_MASK)) >> 1)
        ^ ((0u - (v & 1u)) & MT_MATRIX_A);
}

// Once per 624 draws; kept out of line so mtrand_next_u32 stays small
__device__ __noinline__ void mtrand_twist(mtrand_state* s) {
    unsigned int* w = s->words;
    for (int i = 0; i < MT_N - MT_M; ++i) {
        w[i] = w[i + MT_M] ^ mtrand_twiddle(w[i], w[i + 1]);
    }
    for (int i = MT_N - MT_M; i < MT_N - 1; ++i) {
        w[i] = w[i + MT_M - MT_N] ^ mtrand_twiddle(w[i], w[i + 1]);
    }
    w[MT_N - 1] = w[MT_M - 1] ^ mtrand_twiddle(w[MT_N - 1], w[0]);
    s->position = 0;
}

__device__ __forceinline__ unsigned int mtrand_next_u32(mtrand_state* s) {
    if (s->position >= MT_N) {
        mtrand_twist(s);
    }
    unsigned int x = s->words[s->position++];
    x ^= x >> 11;
    x ^= (x << 7) & MT_TEMPER_B;
    x ^= (x << 15) & MT_TEMPER_C;
    x ^= x >> 18;
    return x;
}

__device__ __forceinline__ double mtrand_next_f64(mtrand_state* s) {
    return (double)mtrand_next_u32(s) * (1.0 / 4294967296.0);
}

// Thread t seeds with base_seed + t and writes output[t * d .. (t + 1) * d]
extern "C" __global__ void mtrand_fill_u32(
    unsigned int* output,
    unsigned int draws_per_thread,
    unsigned int base_seed
) {
    unsigned int idx = blockIdx.x * blockDim.x + threadIdx.x;
    mtrand_state s;
    mtrand_initialize(&s, base_seed + idx);

    unsigned int* out = output + (size_t)idx * draws_per_thread;
    for (unsigned int i = 0; i < draws_per_thread; ++i) {
        out[i] = mtrand_next_u32(&s);
    }
}

extern "C" __global__ void mtrand_fill_f64(
    double* output,
    unsigned int draws_per_thread,
    unsigned int base_seed
) {
    unsigned int idx = blockIdx.x * blockDim.x + threadIdx.x;
    mtrand_state s;
    mtrand_initialize(&s, base_seed + idx);

    double* out = output + (size_t)idx * draws_per_thread;
    for (unsigned int i = 0; i < draws_per_thread; ++i) {
        out[i] = mtrand_next_f64(&s);
    }
}

extern "C" __global__ void mtrand_resume_u32(
    mtrand_state* states,
    unsigned int* output,
    unsigned int draws_per_thread
) {
    unsigned int idx = blockIdx.x * blockDim.x + threadIdx.x;
    mtrand_state s = states[idx];

    unsigned int* out = output + (size_t)idx * draws_per_thread;
    for (unsigned int i = 0; i < draws_per_thread; ++i) {
        out[i] = mtrand_next_u32(&s);
    }
    states[idx] = s;
}
"#;
