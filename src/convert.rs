//! Raw generator output to bounded floating-point samples.
//!
//! A generator with `W` usable bits feeding a float type with `M` mantissa
//! bits keeps only its top `min(W, M)` bits (the low bits of an LCG are the
//! weakest) and scales them by a power of two, so every conversion is exact
//! and the result can never touch the open end of its interval.
//!
//! When `W < M` the output lands on a coarser grid than the float type could
//! represent. [`Rand48`](crate::noise::Rand48) into `f64` is the usual case;
//! this is accepted rather than padded with extra draws.

use std::fmt::Debug;
use std::ops::{Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Floating-point sample types the conversions can target.
pub trait Sample:
    Copy + Debug + PartialOrd + Mul<Output = Self> + Sub<Output = Self> + Div<Output = Self>
{
    /// Significand precision including the implicit leading bit.
    const MANTISSA_BITS: u32;
    const ONE: Self;

    /// Exact for any `x` below `2^MANTISSA_BITS`.
    fn from_u64(x: u64) -> Self;
    fn from_i64(x: i64) -> Self;
}

macro_rules! impl_sample {
    ($t:ty) => {
        impl Sample for $t {
            const MANTISSA_BITS: u32 = <$t>::MANTISSA_DIGITS;
            const ONE: Self = 1.0;

            #[inline]
            fn from_u64(x: u64) -> Self {
                x as $t
            }

            #[inline]
            fn from_i64(x: i64) -> Self {
                x as $t
            }
        }
    };
}

impl_sample!(f32);
impl_sample!(f64);

/// Target interval for a float draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interval {
    /// `[0, 1)`
    Unit,
    /// `[0, 1]`
    UnitClosed,
    /// `[-1, 1)`, reading the top `M + 1` bits as a signed integer so the
    /// sign bit carries entropy too.
    #[default]
    Bipolar,
    /// `[-1, 1)` as `2x - 1` from [`Interval::Unit`]; one bit coarser than
    /// [`Interval::Bipolar`].
    BipolarAffine,
}

impl Interval {
    #[inline]
    pub fn convert<F: Sample>(self, raw: u64, bits: u32) -> F {
        match self {
            Interval::Unit => unit(raw, bits),
            Interval::UnitClosed => unit_closed(raw, bits),
            Interval::Bipolar => bipolar(raw, bits),
            Interval::BipolarAffine => bipolar_affine(raw, bits),
        }
    }
}

/// Keep the top `keep` of the `bits` meaningful bits of `raw`.
/// Returns the kept value and its width.
#[inline]
fn top_bits(raw: u64, bits: u32, keep: u32) -> (u64, u32) {
    let bits = bits.clamp(1, u64::BITS);
    let raw = raw & (u64::MAX >> (u64::BITS - bits));
    if bits > keep {
        (raw >> (bits - keep), keep)
    } else {
        (raw, bits)
    }
}

/// `2^-exp`, exact for `exp < 64`.
#[inline]
fn inv_pow2<F: Sample>(exp: u32) -> F {
    F::ONE / F::from_u64(1u64 << exp)
}

/// `[0, 1)` with the largest grid the float type and the generator allow.
#[inline]
pub fn unit<F: Sample>(raw: u64, bits: u32) -> F {
    let (x, w) = top_bits(raw, bits, F::MANTISSA_BITS);
    F::from_u64(x) * inv_pow2(w)
}

/// `[0, 1]`. Divides by `2^w - 1`, so the quotient is rounded but both ends
/// are reachable exactly.
#[inline]
pub fn unit_closed<F: Sample>(raw: u64, bits: u32) -> F {
    let (x, w) = top_bits(raw, bits, F::MANTISSA_BITS);
    F::from_u64(x) / F::from_u64((1u64 << w) - 1)
}

/// `[-1, 1)` from the top `M + 1` bits read as two's complement.
#[inline]
pub fn bipolar<F: Sample>(raw: u64, bits: u32) -> F {
    let (x, w) = top_bits(raw, bits, F::MANTISSA_BITS + 1);
    let shift = u64::BITS - w;
    let signed = ((x << shift) as i64) >> shift;
    F::from_i64(signed) * inv_pow2(w - 1)
}

/// `[-1, 1)` as `2 * unit - 1`.
#[inline]
pub fn bipolar_affine<F: Sample>(raw: u64, bits: u32) -> F {
    let x: F = unit(raw, bits);
    F::from_u64(2) * x - F::ONE
}

/// `[0, 1)` assembled directly from the IEEE-754 binary32 layout: the top 23
/// bits become the fraction of a float in `[1, 2)`, then 1 is subtracted.
///
/// `f32::from_bits` is defined on every Rust target, so this is portable,
/// but it keeps one bit less than [`unit`].
#[inline]
pub fn unit_f32_bitcast(raw: u64, bits: u32) -> f32 {
    const FRACTION_BITS: u32 = f32::MANTISSA_DIGITS - 1;
    let (x, w) = top_bits(raw, bits, FRACTION_BITS);
    let fraction = (x << (FRACTION_BITS - w)) as u32;
    f32::from_bits(0x3F80_0000 | fraction) - 1.0
}

/// Binary64 counterpart of [`unit_f32_bitcast`], keeping 52 bits.
#[inline]
pub fn unit_f64_bitcast(raw: u64, bits: u32) -> f64 {
    const FRACTION_BITS: u32 = f64::MANTISSA_DIGITS - 1;
    let (x, w) = top_bits(raw, bits, FRACTION_BITS);
    let fraction = x << (FRACTION_BITS - w);
    f64::from_bits(0x3FF0_0000_0000_0000 | fraction) - 1.0
}
