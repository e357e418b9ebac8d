//! Variant selection: one tagged value per generator instance.

use std::fmt;
use std::num::{NonZeroU32, NonZeroU64};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::lcg::RAND48_DEFAULT_SEED;
use super::lfsr::LFSR32_DEFAULT_SEED;
use super::{
    DEFAULT_SEED, Knuth64, Lcg32, Lfsr32, NoiseSource, Rand48, Xorshift64, Xorshift64Star,
};
use crate::error::NoiseError;

/// Which algorithm backs a [`Generator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    Lcg32,
    Rand48,
    Knuth64,
    Lfsr32,
    Xorshift64,
    Xorshift64Star,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 6] = [
        GeneratorKind::Lcg32,
        GeneratorKind::Rand48,
        GeneratorKind::Knuth64,
        GeneratorKind::Lfsr32,
        GeneratorKind::Xorshift64,
        GeneratorKind::Xorshift64Star,
    ];

    /// Usable bits per output value.
    pub fn output_bits(self) -> u32 {
        match self {
            GeneratorKind::Lcg32 => Lcg32::BITS,
            GeneratorKind::Rand48 => Rand48::BITS,
            GeneratorKind::Knuth64 => Knuth64::BITS,
            GeneratorKind::Lfsr32 => Lfsr32::BITS,
            GeneratorKind::Xorshift64 => Xorshift64::BITS,
            GeneratorKind::Xorshift64Star => Xorshift64Star::BITS,
        }
    }

    /// Width of the internal state, which bounds the accepted seeds.
    pub fn state_bits(self) -> u32 {
        match self {
            GeneratorKind::Lcg32 | GeneratorKind::Lfsr32 => 32,
            GeneratorKind::Rand48 => Rand48::STATE_BITS,
            GeneratorKind::Knuth64 | GeneratorKind::Xorshift64 | GeneratorKind::Xorshift64Star => {
                64
            }
        }
    }

    pub fn default_seed(self) -> u64 {
        match self {
            GeneratorKind::Rand48 => RAND48_DEFAULT_SEED,
            GeneratorKind::Lfsr32 => LFSR32_DEFAULT_SEED as u64,
            _ => DEFAULT_SEED,
        }
    }

    /// True when the all-zero state is absorbing for this variant.
    pub fn forbids_zero(self) -> bool {
        matches!(
            self,
            GeneratorKind::Lfsr32 | GeneratorKind::Xorshift64 | GeneratorKind::Xorshift64Star
        )
    }

    fn state_mask(self) -> u64 {
        u64::MAX >> (u64::BITS - self.state_bits())
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeneratorKind::Lcg32 => "lcg32",
            GeneratorKind::Rand48 => "rand48",
            GeneratorKind::Knuth64 => "knuth64",
            GeneratorKind::Lfsr32 => "lfsr32",
            GeneratorKind::Xorshift64 => "xorshift64",
            GeneratorKind::Xorshift64Star => "xorshift64_star",
        };
        f.write_str(name)
    }
}

/// A noise generator whose algorithm is chosen at runtime.
///
/// Each instance owns its state outright; two generators never share or
/// observe each other's state, so one per audio stream (or thread) is safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generator {
    Lcg32(Lcg32),
    Rand48(Rand48),
    Knuth64(Knuth64),
    Lfsr32(Lfsr32),
    Xorshift64(Xorshift64),
    Xorshift64Star(Xorshift64Star),
}

impl Generator {
    /// Create a generator of `kind`, using the variant's documented default
    /// seed when `seed` is `None`.
    ///
    /// Fails with [`NoiseError::SeedOutOfRange`] when the seed is wider than
    /// the state and with [`NoiseError::InvalidSeed`] when it is absorbing.
    pub fn new(kind: GeneratorKind, seed: Option<u64>) -> Result<Self, NoiseError> {
        let seed = seed.unwrap_or(kind.default_seed());
        if seed & !kind.state_mask() != 0 {
            return Err(NoiseError::SeedOutOfRange {
                kind,
                seed,
                bits: kind.state_bits(),
            });
        }

        let generator = match kind {
            GeneratorKind::Lcg32 => Generator::Lcg32(Lcg32::new(seed as u32)),
            GeneratorKind::Rand48 => Generator::Rand48(Rand48::new(seed)?),
            GeneratorKind::Knuth64 => Generator::Knuth64(Knuth64::new(seed)),
            GeneratorKind::Lfsr32 => Generator::Lfsr32(Lfsr32::new(seed as u32)?),
            GeneratorKind::Xorshift64 => Generator::Xorshift64(Xorshift64::new(seed)?),
            GeneratorKind::Xorshift64Star => {
                Generator::Xorshift64Star(Xorshift64Star::new(seed)?)
            }
        };
        debug!(%kind, seed, "created noise generator");
        Ok(generator)
    }

    /// Seed from the wall clock. For setup code only: reading the clock is
    /// too slow and too unpredictable for a per-sample path.
    ///
    /// The clock value is masked to the state width. If that leaves an
    /// absorbing zero state, the variant's default seed is used instead.
    pub fn from_entropy(kind: GeneratorKind) -> Self {
        let nanos = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        Self::from_clock_seed(kind, mix64(nanos))
    }

    fn from_clock_seed(kind: GeneratorKind, raw: u64) -> Self {
        let seed = raw & kind.state_mask();
        let generator = match kind {
            GeneratorKind::Lcg32 => Generator::Lcg32(Lcg32::new(seed as u32)),
            GeneratorKind::Rand48 => Generator::Rand48(Rand48::from_masked(seed)),
            GeneratorKind::Knuth64 => Generator::Knuth64(Knuth64::new(seed)),
            GeneratorKind::Lfsr32 => Generator::Lfsr32(match NonZeroU32::new(seed as u32) {
                Some(seed) => Lfsr32::from_nonzero(seed),
                None => {
                    warn_absorbing(kind);
                    Lfsr32::default()
                }
            }),
            GeneratorKind::Xorshift64 => Generator::Xorshift64(match NonZeroU64::new(seed) {
                Some(seed) => Xorshift64::from_nonzero(seed),
                None => {
                    warn_absorbing(kind);
                    Xorshift64::default()
                }
            }),
            GeneratorKind::Xorshift64Star => {
                Generator::Xorshift64Star(match NonZeroU64::new(seed) {
                    Some(seed) => Xorshift64Star::from_nonzero(seed),
                    None => {
                        warn_absorbing(kind);
                        Xorshift64Star::default()
                    }
                })
            }
        };
        debug!(%kind, state = generator.state(), "seeded noise generator from clock");
        generator
    }

    pub fn kind(&self) -> GeneratorKind {
        match self {
            Generator::Lcg32(_) => GeneratorKind::Lcg32,
            Generator::Rand48(_) => GeneratorKind::Rand48,
            Generator::Knuth64(_) => GeneratorKind::Knuth64,
            Generator::Lfsr32(_) => GeneratorKind::Lfsr32,
            Generator::Xorshift64(_) => GeneratorKind::Xorshift64,
            Generator::Xorshift64Star(_) => GeneratorKind::Xorshift64Star,
        }
    }

    /// Current internal state, zero-extended to 64 bits.
    pub fn state(&self) -> u64 {
        match self {
            Generator::Lcg32(g) => g.state() as u64,
            Generator::Rand48(g) => g.state(),
            Generator::Knuth64(g) => g.state(),
            Generator::Lfsr32(g) => g.state() as u64,
            Generator::Xorshift64(g) => g.state(),
            Generator::Xorshift64Star(g) => g.state(),
        }
    }
}

impl NoiseSource for Generator {
    #[inline]
    fn next_raw(&mut self) -> u64 {
        match self {
            Generator::Lcg32(g) => g.next_raw(),
            Generator::Rand48(g) => g.next_raw(),
            Generator::Knuth64(g) => g.next_raw(),
            Generator::Lfsr32(g) => g.next_raw(),
            Generator::Xorshift64(g) => g.next_raw(),
            Generator::Xorshift64Star(g) => g.next_raw(),
        }
    }

    fn output_bits(&self) -> u32 {
        self.kind().output_bits()
    }
}

fn warn_absorbing(kind: GeneratorKind) {
    warn!(%kind, "clock entropy produced an absorbing seed, using default");
}

/// SplitMix64 finalizer; spreads clock bits across the whole word.
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Interval;

    #[test]
    fn default_seeds() {
        for kind in GeneratorKind::ALL {
            let g = Generator::new(kind, None).unwrap();
            assert_eq!(g.kind(), kind);
            assert_eq!(g.state(), kind.default_seed());
            assert_eq!(g.output_bits(), kind.output_bits());
        }
    }

    #[test]
    fn zero_seed_rejected_for_absorbing_variants() {
        for kind in GeneratorKind::ALL {
            let result = Generator::new(kind, Some(0));
            if kind.forbids_zero() {
                assert!(
                    matches!(result, Err(NoiseError::InvalidSeed { seed: 0, .. })),
                    "{kind} accepted a zero seed"
                );
            } else {
                assert!(result.is_ok(), "{kind} should accept a zero seed");
            }
        }
    }

    #[test]
    fn seeds_wider_than_state_rejected() {
        let err = Generator::new(GeneratorKind::Lcg32, Some(1 << 32)).unwrap_err();
        assert!(matches!(err, NoiseError::SeedOutOfRange { bits: 32, .. }));
        let err = Generator::new(GeneratorKind::Rand48, Some(1 << 48)).unwrap_err();
        assert!(matches!(err, NoiseError::SeedOutOfRange { bits: 48, .. }));
        assert!(Generator::new(GeneratorKind::Knuth64, Some(u64::MAX)).is_ok());
    }

    #[test]
    fn dispatch_matches_concrete_types() {
        let mut g = Generator::new(GeneratorKind::Lfsr32, Some(0x5555_5555)).unwrap();
        assert_eq!(g.next_raw(), 2_863_311_560);
        assert_eq!(g.next_raw(), 1_431_655_780);

        let mut g = Generator::new(GeneratorKind::Rand48, None).unwrap();
        assert_eq!(g.next_raw(), 851_401_618);
    }

    #[test]
    fn same_seed_same_sequence_for_every_variant() {
        for kind in GeneratorKind::ALL {
            let mut a = Generator::new(kind, Some(0xC0FFEE)).unwrap();
            let mut b = Generator::new(kind, Some(0xC0FFEE)).unwrap();
            for i in 0..1000 {
                assert_eq!(a.next_raw(), b.next_raw(), "{kind} diverged at step {i}");
            }
        }
    }

    #[test]
    fn independent_instances_do_not_interact() {
        let mut a = Generator::new(GeneratorKind::Xorshift64, Some(7)).unwrap();
        let mut lone = a.clone();
        let mut b = Generator::new(GeneratorKind::Xorshift64, Some(7)).unwrap();
        for _ in 0..100 {
            b.next_raw();
        }
        for _ in 0..100 {
            assert_eq!(a.next_raw(), lone.next_raw());
        }
    }

    #[test]
    fn entropy_seeds_are_valid() {
        for kind in GeneratorKind::ALL {
            let g = Generator::from_entropy(kind);
            assert_eq!(g.kind(), kind);
            if kind.forbids_zero() {
                assert_ne!(g.state(), 0);
            }
            assert_eq!(g.state() & !kind.state_mask(), 0);
        }
    }

    #[test]
    fn clock_seeds_are_masked_and_never_absorbing() {
        for kind in GeneratorKind::ALL {
            let g = Generator::from_clock_seed(kind, 0);
            assert_eq!(g.kind(), kind);
            if kind.forbids_zero() {
                assert_eq!(g.state(), kind.default_seed(), "{kind} kept a zero state");
            } else {
                assert_eq!(g.state(), 0);
            }

            let g = Generator::from_clock_seed(kind, u64::MAX);
            assert_eq!(g.state(), kind.state_mask(), "{kind} state not masked");
        }

        // Low 32 bits zero: absorbing once masked for the 32-bit register.
        let g = Generator::from_clock_seed(GeneratorKind::Lfsr32, 0xFFFF_FFFF_0000_0000);
        assert_eq!(g.state(), LFSR32_DEFAULT_SEED as u64);
    }

    #[test]
    fn unit_floats_stay_in_range() {
        for kind in GeneratorKind::ALL {
            let mut g = Generator::new(kind, Some(1)).unwrap();
            for _ in 0..1_000_000 {
                let x = g.next_f64(Interval::Unit);
                assert!((0.0..1.0).contains(&x), "{kind} produced {x}");
            }
            for _ in 0..1_000_000 {
                let x = g.next_f32(Interval::Unit);
                assert!((0.0..1.0).contains(&x), "{kind} produced {x}");
            }
        }
    }

    #[test]
    fn bipolar_floats_never_reach_one() {
        for kind in GeneratorKind::ALL {
            let mut g = Generator::new(kind, Some(3)).unwrap();
            for _ in 0..200_000 {
                for interval in [Interval::Bipolar, Interval::BipolarAffine] {
                    let x = g.next_f32(interval);
                    assert!((-1.0..1.0).contains(&x), "{kind} {interval:?} produced {x}");
                }
            }
        }
    }

    #[test]
    fn bounded_draws_are_close_to_uniform() {
        let mut g = Generator::new(GeneratorKind::Xorshift64, Some(161_803_398)).unwrap();
        let mut counts = [0u32; 10];
        let draws = 100_000;
        for _ in 0..draws {
            let v = g.next_bounded(0, 10).unwrap();
            counts[v as usize] += 1;
        }
        let expected = draws as f64 / 10.0;
        for (outcome, &count) in counts.iter().enumerate() {
            let deviation = (count as f64 - expected).abs() / expected;
            assert!(
                deviation <= 0.05,
                "outcome {outcome} drawn {count} times, {:.1}% off",
                deviation * 100.0
            );
        }
    }

    #[test]
    fn kind_serde_names() {
        assert_eq!(
            serde_json::to_string(&GeneratorKind::Xorshift64Star).unwrap(),
            "\"xorshift64_star\""
        );
        let kind: GeneratorKind = serde_json::from_str("\"rand48\"").unwrap();
        assert_eq!(kind, GeneratorKind::Rand48);
        for kind in GeneratorKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }
}
