//! 32-bit Galois linear feedback shift register.

use std::num::NonZeroU32;

use super::{GeneratorKind, NoiseSource};
use crate::error::NoiseError;

/// Feedback taps for a maximal-length register (period 2^32 - 1).
const TAPS: u32 = 0x8000_0062;

pub const LFSR32_DEFAULT_SEED: u32 = 0x5555_5555;

/// Galois LFSR. Zero is a fixed point of the update, so it is never a valid
/// state; from any other seed the register cycles through every nonzero
/// 32-bit value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lfsr32 {
    state: u32,
}

impl Default for Lfsr32 {
    fn default() -> Self {
        Self {
            state: LFSR32_DEFAULT_SEED,
        }
    }
}

impl Lfsr32 {
    pub const BITS: u32 = 32;

    pub fn new(seed: u32) -> Result<Self, NoiseError> {
        if seed == 0 {
            return Err(NoiseError::InvalidSeed {
                kind: GeneratorKind::Lfsr32,
                seed: 0,
            });
        }
        Ok(Self { state: seed })
    }

    /// Infallible constructor for seeds already known to be nonzero.
    pub fn from_nonzero(seed: NonZeroU32) -> Self {
        Self { state: seed.get() }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let feedback = (self.state & 1).wrapping_neg() & TAPS;
        self.state = (self.state >> 1) ^ feedback;
        self.state
    }
}

impl NoiseSource for Lfsr32 {
    fn next_raw(&mut self) -> u64 {
        self.next_u32() as u64
    }

    fn output_bits(&self) -> u32 {
        Self::BITS
    }
}
