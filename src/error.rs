use crate::noise::GeneratorKind;
use thiserror::Error;

/// Everything that can go wrong while setting up a noise source.
///
/// None of these arise on the per-sample path: seeds and ranges are
/// validated once when a generator or [`BoundedRange`](crate::range::BoundedRange)
/// is built.
#[derive(Debug, Error)]
pub enum NoiseError {
    /// The seed is an absorbing state for the variant (all-zero LFSR/xorshift state).
    #[error("seed {seed:#x} is an absorbing state for {kind}")]
    InvalidSeed { kind: GeneratorKind, seed: u64 },

    #[error("seed {seed:#x} does not fit the {bits}-bit state of {kind}")]
    SeedOutOfRange {
        kind: GeneratorKind,
        seed: u64,
        bits: u32,
    },

    /// Empty integer range: `upper` must be strictly greater than `lower`.
    #[error("empty range [{lower}, {upper}): upper bound must exceed lower bound")]
    Range { lower: i64, upper: i64 },

    #[error("invalid noise config: {0}")]
    Config(String),

    #[error("malformed noise config: {0}")]
    Json(#[from] serde_json::Error),
}
