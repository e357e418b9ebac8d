//! Marsaglia xorshift generators with 64 bits of state.

use std::num::NonZeroU64;

use super::{DEFAULT_SEED, GeneratorKind, NoiseSource};
use crate::error::NoiseError;

const STAR_MULTIPLIER: u64 = 0x2545_F491_4F6C_DD1D;

fn nonzero(kind: GeneratorKind, seed: u64) -> Result<u64, NoiseError> {
    if seed == 0 {
        Err(NoiseError::InvalidSeed { kind, seed })
    } else {
        Ok(seed)
    }
}

/// Plain xorshift with the (13, 7, 17) shift triple. Output is the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xorshift64 {
    state: u64,
}

impl Default for Xorshift64 {
    fn default() -> Self {
        Self { state: DEFAULT_SEED }
    }
}

impl Xorshift64 {
    pub const BITS: u32 = 64;

    /// Zero is absorbing and rejected.
    pub fn new(seed: u64) -> Result<Self, NoiseError> {
        Ok(Self {
            state: nonzero(GeneratorKind::Xorshift64, seed)?,
        })
    }

    pub fn from_nonzero(seed: NonZeroU64) -> Self {
        Self { state: seed.get() }
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl NoiseSource for Xorshift64 {
    fn next_raw(&mut self) -> u64 {
        self.next_u64()
    }

    fn output_bits(&self) -> u32 {
        Self::BITS
    }
}

/// Xorshift64* (Vigna): xorshift with the (12, 25, 27) triple followed by a
/// multiplicative scramble of the output. The state itself is not exposed
/// through the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xorshift64Star {
    state: u64,
}

impl Default for Xorshift64Star {
    fn default() -> Self {
        Self { state: DEFAULT_SEED }
    }
}

impl Xorshift64Star {
    pub const BITS: u32 = 64;

    pub fn new(seed: u64) -> Result<Self, NoiseError> {
        Ok(Self {
            state: nonzero(GeneratorKind::Xorshift64Star, seed)?,
        })
    }

    pub fn from_nonzero(seed: NonZeroU64) -> Self {
        Self { state: seed.get() }
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(STAR_MULTIPLIER)
    }
}

impl NoiseSource for Xorshift64Star {
    fn next_raw(&mut self) -> u64 {
        self.next_u64()
    }

    fn output_bits(&self) -> u32 {
        Self::BITS
    }
}
