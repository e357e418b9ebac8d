//! Linear congruential generators.
//!
//! All three follow `X[n+1] = (a * X[n] + c) mod m` with `m` a power of two,
//! `c` odd and `a - 1` divisible by four, so each one has full period `m`
//! from any seed.

use super::{DEFAULT_SEED, GeneratorKind, NoiseSource};
use crate::error::NoiseError;

const LCG32_MUL: u32 = 196_314_165;
const LCG32_INC: u32 = 907_633_515;

const RAND48_MUL: u64 = 0x5_DEEC_E66D;
const RAND48_INC: u64 = 0xB;
const RAND48_MASK: u64 = (1 << 48) - 1;
/// Initial `rand48` state when no seed is supplied (`0x1234ABCD330E`).
pub const RAND48_DEFAULT_SEED: u64 = 20_017_429_951_246;

const KNUTH_MUL: u64 = 6_364_136_223_846_793_005;
const KNUTH_INC: u64 = 1_442_695_040_888_963_407;

/// Compose the affine step `x -> mul * x + inc` with itself `delta` times,
/// modulo `mask + 1`. Returns the composite `(mul, inc)`.
fn jump(mul: u64, inc: u64, mut delta: u64, mask: u64) -> (u64, u64) {
    let (mut cur_mul, mut cur_inc) = (mul, inc);
    let (mut acc_mul, mut acc_inc) = (1u64, 0u64);
    while delta > 0 {
        if delta & 1 == 1 {
            acc_mul = acc_mul.wrapping_mul(cur_mul);
            acc_inc = acc_inc.wrapping_mul(cur_mul).wrapping_add(cur_inc);
        }
        cur_inc = cur_mul.wrapping_add(1).wrapping_mul(cur_inc);
        cur_mul = cur_mul.wrapping_mul(cur_mul);
        delta >>= 1;
    }
    (acc_mul & mask, acc_inc & mask)
}

/// 32-bit LCG; the whole state is the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg32 {
    state: u32,
}

impl Default for Lcg32 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED as u32)
    }
}

impl Lcg32 {
    pub const BITS: u32 = 32;

    /// Every 32-bit seed is valid.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(LCG32_MUL).wrapping_add(LCG32_INC);
        self.state
    }

    /// Skip `delta` steps in O(log delta).
    pub fn advance(&mut self, delta: u64) {
        let (mul, inc) = jump(
            LCG32_MUL as u64,
            LCG32_INC as u64,
            delta,
            u32::MAX as u64,
        );
        self.state = (mul as u32).wrapping_mul(self.state).wrapping_add(inc as u32);
    }
}

impl NoiseSource for Lcg32 {
    fn next_raw(&mut self) -> u64 {
        self.next_u32() as u64
    }

    fn output_bits(&self) -> u32 {
        Self::BITS
    }
}

/// The POSIX `drand48` family generator: 48 bits of state, 31 output bits
/// taken from the top of the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rand48 {
    state: u64,
}

impl Default for Rand48 {
    fn default() -> Self {
        Self {
            state: RAND48_DEFAULT_SEED,
        }
    }
}

impl Rand48 {
    pub const BITS: u32 = 31;
    pub const STATE_BITS: u32 = 48;

    /// Start from a raw 48-bit state.
    pub fn new(state: u64) -> Result<Self, NoiseError> {
        if state > RAND48_MASK {
            return Err(NoiseError::SeedOutOfRange {
                kind: GeneratorKind::Rand48,
                seed: state,
                bits: Self::STATE_BITS,
            });
        }
        Ok(Self { state })
    }

    /// Keep the low 48 bits of `state`.
    pub(crate) fn from_masked(state: u64) -> Self {
        Self {
            state: state & RAND48_MASK,
        }
    }

    /// Seed the way `srand48` does: the seed fills the high 32 bits and the
    /// low 16 bits are set to `0x330E`.
    pub fn from_srand48(seed: u32) -> Self {
        Self {
            state: ((seed as u64) << 16) | 0x330E,
        }
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    #[inline]
    pub fn next_u31(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(RAND48_MUL)
            .wrapping_add(RAND48_INC)
            & RAND48_MASK;
        (self.state >> 17) as u32
    }

    pub fn advance(&mut self, delta: u64) {
        let (mul, inc) = jump(RAND48_MUL, RAND48_INC, delta, RAND48_MASK);
        self.state = mul.wrapping_mul(self.state).wrapping_add(inc) & RAND48_MASK;
    }
}

impl NoiseSource for Rand48 {
    fn next_raw(&mut self) -> u64 {
        self.next_u31() as u64
    }

    fn output_bits(&self) -> u32 {
        Self::BITS
    }
}

/// Knuth's MMIX 64-bit LCG. Output is the full state, so the low bits have
/// short periods; the float and range helpers only use the high bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Knuth64 {
    state: u64,
}

impl Default for Knuth64 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Knuth64 {
    pub const BITS: u32 = 64;

    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(KNUTH_MUL).wrapping_add(KNUTH_INC);
        self.state
    }

    pub fn advance(&mut self, delta: u64) {
        let (mul, inc) = jump(KNUTH_MUL, KNUTH_INC, delta, u64::MAX);
        self.state = mul.wrapping_mul(self.state).wrapping_add(inc);
    }
}

impl NoiseSource for Knuth64 {
    fn next_raw(&mut self) -> u64 {
        self.next_u64()
    }

    fn output_bits(&self) -> u32 {
        Self::BITS
    }
}
