//! Raw generator output to integers in `[lower, upper)`.
//!
//! Both reductions run in constant time. There is no rejection loop, so a
//! small skew of at most `span / 2^bits` remains whenever the span does not
//! divide `2^bits`. See [`BoundedRange::max_skew`].

use serde::{Deserialize, Serialize};

use crate::error::NoiseError;

/// Below this many kept bits the modulo reduction would mostly see
/// low-quality bits, so it never discards more than this leaves.
const MODULO_MIN_KEEP: u32 = 32;

/// How a raw value is folded into a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reduction {
    /// Treat the raw value as a fraction in `[0, 1)` and multiply by the span.
    #[default]
    FixedPoint,
    /// `high_bits % span`.
    Modulo,
}

/// A validated, non-empty half-open integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedRange {
    lower: i64,
    span: u64,
}

impl BoundedRange {
    pub fn new(lower: i64, upper: i64) -> Result<Self, NoiseError> {
        if upper <= lower {
            return Err(NoiseError::Range { lower, upper });
        }
        Ok(Self {
            lower,
            span: upper.abs_diff(lower),
        })
    }

    pub fn lower(&self) -> i64 {
        self.lower
    }

    pub fn upper(&self) -> i64 {
        self.lower.wrapping_add_unsigned(self.span)
    }

    pub fn span(&self) -> u64 {
        self.span
    }

    pub fn reduce(&self, reduction: Reduction, raw: u64, bits: u32) -> i64 {
        match reduction {
            Reduction::FixedPoint => self.scale(raw, bits),
            Reduction::Modulo => self.modulo(raw, bits),
        }
    }

    /// Fixed-point multiply: `lower + (raw * span) >> bits`, with a 128-bit
    /// intermediate. Distributes like a float multiply of a `[0, 1)` draw.
    #[inline]
    pub fn scale(&self, raw: u64, bits: u32) -> i64 {
        let (raw, bits) = significant(raw, bits);
        let offset = ((raw as u128 * self.span as u128) >> bits) as u64;
        self.lower.wrapping_add_unsigned(offset)
    }

    /// Modulo of the high bits. Drops the low bits down to whatever the span
    /// needs (at least 32), since those are the weakest in an LCG.
    #[inline]
    pub fn modulo(&self, raw: u64, bits: u32) -> i64 {
        let (raw, bits) = significant(raw, bits);
        let needed = (u64::BITS - (self.span - 1).leading_zeros()).max(MODULO_MIN_KEEP);
        let high = raw >> bits.saturating_sub(needed);
        self.lower.wrapping_add_unsigned(high % self.span)
    }

    /// Upper bound on how far any outcome's probability can stray from
    /// `1 / span` when reducing `bits`-bit values. Zero when the span
    /// divides `2^bits`.
    pub fn max_skew(&self, bits: u32) -> f64 {
        let bits = bits.clamp(1, u64::BITS);
        let divides = self.span.is_power_of_two() && self.span.trailing_zeros() <= bits;
        if divides {
            0.0
        } else {
            self.span as f64 / 2f64.powi(bits as i32)
        }
    }
}

#[inline]
fn significant(raw: u64, bits: u32) -> (u64, u32) {
    let bits = bits.clamp(1, u64::BITS);
    (raw & (u64::MAX >> (u64::BITS - bits)), bits)
}
