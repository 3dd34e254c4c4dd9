//! Deterministic pseudo-random source for the noise kernels.

use rand::{Error, RngCore, SeedableRng};

/*
xoroshiro128+
=============

128 bits of state, 64 bits of output per step. The `+` scrambler leaves the
lowest bits weak, which is why `next_f64` keeps only the HIGH 53 bits:

    next_f64 = (next_u64 >> 11) * 2^-53        in [0, 1)

The noise kernels then map that onto [-1, 1) with `2x - 1`.

Every noise node owns its own generator. The graph hands each one a copy of
a master generator and then `jump()`s the master by 2^64 steps, so no two
nodes ever walk the same part of the sequence.
*/

/// Non-zero state used when a seed would leave the generator stuck at zero.
const FALLBACK_STATE: [u64; 2] = [0x9e37_79b9_7f4a_7c15, 0xbf58_476d_1ce4_e5b9];

/// `rand_xoshiro`'s generator with a fixed zero-state fallback and the
/// 53-bit float conversion the noise kernels use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xoroshiro128Plus(rand_xoshiro::Xoroshiro128Plus);

impl Xoroshiro128Plus {
    pub fn from_state(state: [u64; 2]) -> Self {
        let [s0, s1] = if state == [0, 0] { FALLBACK_STATE } else { state };
        let mut seed = [0u8; 16];
        seed[..8].copy_from_slice(&s0.to_le_bytes());
        seed[8..].copy_from_slice(&s1.to_le_bytes());
        Self(rand_xoshiro::Xoroshiro128Plus::from_seed(seed))
    }

    #[inline]
    pub fn next(&mut self) -> u64 {
        self.0.next_u64()
    }

    /// Uniform double in [0, 1) built from the high 53 bits.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Advance by 2^64 steps.
    pub fn jump(&mut self) {
        self.0.jump();
    }
}

impl RngCore for Xoroshiro128Plus {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl SeedableRng for Xoroshiro128Plus {
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut lo = [0u8; 8];
        let mut hi = [0u8; 8];
        lo.copy_from_slice(&seed[..8]);
        hi.copy_from_slice(&seed[8..]);
        Self::from_state([u64::from_le_bytes(lo), u64::from_le_bytes(hi)])
    }

    /// SplitMix64 expansion of `seed`.
    fn seed_from_u64(seed: u64) -> Self {
        Self(rand_xoshiro::Xoroshiro128Plus::seed_from_u64(seed))
    }
}
