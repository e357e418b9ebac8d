//! Seedable pseudorandom generators for noise synthesis.
//!
//! Every variant owns a single integer of state and produces one raw value
//! per step in O(1), with no allocation, locking, or I/O:
//!
//! - **LCG**: [`Lcg32`], [`Rand48`] and [`Knuth64`] linear congruential generators
//! - **LFSR**: [`Lfsr32`], a maximal-length Galois shift register
//! - **Xorshift**: [`Xorshift64`] and the scrambled [`Xorshift64Star`]
//!
//! [`Generator`] picks one of them at construction time from a [`GeneratorKind`].
//!
//! # Examples
//! ```
//! use synth_noise::convert::Interval;
//! use synth_noise::noise::{Generator, GeneratorKind, NoiseSource};
//!
//! let mut noise = Generator::new(GeneratorKind::Xorshift64, Some(161803398)).unwrap();
//! let sample = noise.next_f32(Interval::Bipolar);
//! assert!((-1.0..1.0).contains(&sample));
//! ```

pub mod generator;
pub mod lcg;
pub mod lfsr;
#[cfg(feature = "rand")]
mod rand_compat;
pub mod xorshift;

pub use generator::{Generator, GeneratorKind};
pub use lcg::{Knuth64, Lcg32, Rand48};
pub use lfsr::Lfsr32;
pub use xorshift::{Xorshift64, Xorshift64Star};

use crate::convert::{Interval, Sample};
use crate::error::NoiseError;
use crate::range::BoundedRange;

/// Seed used by the LCG32, Knuth64 and xorshift variants when none is given.
pub const DEFAULT_SEED: u64 = 161_803_398;

/// The capability shared by every generator: step the state, emit a raw value.
///
/// Only [`next_raw`](Self::next_raw) and [`output_bits`](Self::output_bits)
/// are variant-specific. The float and integer-range helpers are built on top
/// of them and are safe to call once per audio sample.
pub trait NoiseSource {
    /// Advance the state and return the new output. Only the low
    /// [`output_bits`](Self::output_bits) bits can be set.
    fn next_raw(&mut self) -> u64;

    /// Number of usable bits in each value returned by [`next_raw`](Self::next_raw).
    fn output_bits(&self) -> u32;

    fn next_f32(&mut self, interval: Interval) -> f32 {
        let bits = self.output_bits();
        interval.convert(self.next_raw(), bits)
    }

    fn next_f64(&mut self, interval: Interval) -> f64 {
        let bits = self.output_bits();
        interval.convert(self.next_raw(), bits)
    }

    /// Draw an integer in `[lower, upper)` with the fixed-point reduction.
    ///
    /// Validates the range on every call; hot loops should build a
    /// [`BoundedRange`] once and use [`next_in`](Self::next_in).
    fn next_bounded(&mut self, lower: i64, upper: i64) -> Result<i64, NoiseError> {
        let range = BoundedRange::new(lower, upper)?;
        Ok(self.next_in(&range))
    }

    fn next_in(&mut self, range: &BoundedRange) -> i64 {
        let bits = self.output_bits();
        range.scale(self.next_raw(), bits)
    }

    fn next_in_modulo(&mut self, range: &BoundedRange) -> i64 {
        let bits = self.output_bits();
        range.modulo(self.next_raw(), bits)
    }

    /// Assemble a `width`-bit word (at most 64) from the high bits of as many
    /// draws as needed. Narrow generators such as [`Rand48`] take two draws for
    /// a 32-bit word.
    fn next_word(&mut self, width: u32) -> u64 {
        let width = width.min(u64::BITS);
        let bits = self.output_bits();
        let mut acc = 0u64;
        let mut have = 0;
        while have < width {
            let take = bits.min(width - have);
            let chunk = self.next_raw() >> (bits - take);
            acc = acc.checked_shl(take).unwrap_or(0) | chunk;
            have += take;
        }
        acc
    }

    /// Overwrite `dst` with samples in `interval`.
    fn fill_f32(&mut self, dst: &mut [f32], interval: Interval) {
        fill(self, dst, interval);
    }

    fn fill_f64(&mut self, dst: &mut [f64], interval: Interval) {
        fill(self, dst, interval);
    }
}

fn fill<S: NoiseSource + ?Sized, F: Sample>(source: &mut S, dst: &mut [F], interval: Interval) {
    let bits = source.output_bits();
    for d in dst.iter_mut() {
        *d = interval.convert(source.next_raw(), bits);
    }
}
