//! Render settings, loadable from JSON.

use serde::{Deserialize, Serialize};

use crate::convert::Interval;
use crate::error::NoiseError;
use crate::noise::{Generator, GeneratorKind};

/// Largest mono 16-bit sample count whose WAV sizes fit the 32-bit RIFF
/// length fields (`36 + 2 * n <= u32::MAX`).
pub const MAX_SAMPLES: u64 = (u32::MAX as u64 - 36) / 2;

/// Settings for rendering a block of noise.
///
/// Every field has a default, so `{}` is a valid config:
///
/// ```json
/// { "generator": "lfsr32", "seed": 1431655765, "amplitude": 0.25 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoiseConfig {
    pub generator: GeneratorKind,
    /// `None` uses the generator's default seed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub interval: Interval,
    /// Linear gain applied to every sample, in `[0, 1]`.
    pub amplitude: f32,
    pub sample_rate: u32,
    pub length_in_seconds: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        NoiseConfig {
            generator: GeneratorKind::Xorshift64,
            seed: None,
            interval: Interval::Bipolar,
            amplitude: 0.5, // -6 dB
            sample_rate: 48_000,
            length_in_seconds: 10.0,
        }
    }
}

impl NoiseConfig {
    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self, NoiseError> {
        let config: NoiseConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, NoiseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), NoiseError> {
        if !self.amplitude.is_finite() || !(0.0..=1.0).contains(&self.amplitude) {
            return Err(NoiseError::Config(format!(
                "amplitude {} is outside [0, 1]",
                self.amplitude
            )));
        }
        if self.sample_rate == 0 {
            return Err(NoiseError::Config("sample rate must be positive".into()));
        }
        // The WAV header stores the byte rate (rate * 2 for mono 16-bit) as u32.
        if self.sample_rate.checked_mul(2).is_none() {
            return Err(NoiseError::Config(format!(
                "sample rate {} Hz overflows the WAV byte rate",
                self.sample_rate
            )));
        }
        if !self.length_in_seconds.is_finite() || self.length_in_seconds < 0.0 {
            return Err(NoiseError::Config(format!(
                "length {} s is not a finite, non-negative duration",
                self.length_in_seconds
            )));
        }
        self.sample_count()?;
        Ok(())
    }

    pub fn build_generator(&self) -> Result<Generator, NoiseError> {
        Generator::new(self.generator, self.seed)
    }

    /// Number of mono samples to render, truncated toward zero.
    ///
    /// Fails when the result would not fit a WAV file ([`MAX_SAMPLES`]).
    pub fn sample_count(&self) -> Result<usize, NoiseError> {
        let samples = self.sample_rate as f64 * self.length_in_seconds;
        if samples.is_nan() || samples > MAX_SAMPLES as f64 {
            return Err(NoiseError::Config(format!(
                "{} s at {} Hz exceeds {MAX_SAMPLES} samples",
                self.length_in_seconds, self.sample_rate
            )));
        }
        usize::try_from(samples as u64).map_err(|_| {
            NoiseError::Config(format!("{samples} samples do not fit in memory"))
        })
    }
}
