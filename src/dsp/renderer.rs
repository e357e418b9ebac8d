//! WAV renderer — renders a NoiseConfig to samples or a WAV byte buffer.

use tracing::debug;

use crate::config::NoiseConfig;
use crate::error::NoiseError;
use crate::noise::NoiseSource;

/// Render the configured noise as mono f32 samples, scaled by amplitude.
pub fn render_samples(config: &NoiseConfig) -> Result<Vec<f32>, NoiseError> {
    config.validate()?;
    let mut generator = config.build_generator()?;

    let mut samples = vec![0.0f32; config.sample_count()?];
    generator.fill_f32(&mut samples, config.interval);
    for s in samples.iter_mut() {
        *s *= config.amplitude;
    }

    debug!(
        generator = %config.generator,
        samples = samples.len(),
        sample_rate = config.sample_rate,
        "rendered noise buffer"
    );
    Ok(samples)
}

/// Render the configured noise to a WAV file as bytes (16-bit mono PCM).
pub fn render_wav(config: &NoiseConfig) -> Result<Vec<u8>, NoiseError> {
    let samples = render_samples(config)?;
    let pcm = to_pcm_i16(&samples);
    encode_wav(&pcm, config.sample_rate, 1)
}

/// Convert float samples to 16-bit PCM. Out-of-range samples are clamped
/// and NaN becomes silence.
pub fn to_pcm_i16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| {
            let s = if s.is_nan() { 0.0 } else { s.clamp(-1.0, 1.0) };
            (s * 32767.0) as i16
        })
        .collect()
}

/// Encode interleaved i16 PCM samples to a WAV byte buffer.
///
/// The RIFF size field holds the file length minus the 8-byte `RIFF` tag and
/// size field, i.e. `36 + data`. Some writers store `44 + data` there; readers
/// such as hound expect the RIFF definition used here.
///
/// Fails with [`NoiseError::Config`] when the byte rate or any size field
/// would not fit in 32 bits.
pub fn encode_wav(
    samples: &[i16],
    sample_rate: u32,
    channels: u16,
) -> Result<Vec<u8>, NoiseError> {
    let bits_per_sample: u16 = 16;
    let block_align = channels
        .checked_mul(bits_per_sample / 8)
        .ok_or_else(|| NoiseError::Config(format!("{channels} channels overflow block align")))?;
    let byte_rate = sample_rate.checked_mul(block_align as u32).ok_or_else(|| {
        NoiseError::Config(format!(
            "{sample_rate} Hz x {channels} channels overflows the WAV byte rate"
        ))
    })?;
    let too_long =
        || NoiseError::Config(format!("{} samples exceed the WAV size limit", samples.len()));
    let data_size = samples
        .len()
        .checked_mul(2)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(too_long)?;
    let file_size = data_size.checked_add(36).ok_or_else(too_long)?;

    let mut buf = Vec::with_capacity(44 + data_size as usize);

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    buf.extend_from_slice(&channels.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    for &sample in samples {
        buf.extend_from_slice(&sample.to_le_bytes());
    }

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Interval;
    use crate::noise::GeneratorKind;
    use std::io::Cursor;

    fn short_config() -> NoiseConfig {
        NoiseConfig {
            generator: GeneratorKind::Lfsr32,
            seed: Some(0x5555_5555),
            sample_rate: 8000,
            length_in_seconds: 0.25,
            ..NoiseConfig::default()
        }
    }

    #[test]
    fn wav_header_valid() {
        let wav = render_wav(&short_config()).unwrap();

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");

        let sr = u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]);
        assert_eq!(sr, 8000);
        let ch = u16::from_le_bytes([wav[22], wav[23]]);
        assert_eq!(ch, 1);
        let byte_rate = u32::from_le_bytes([wav[28], wav[29], wav[30], wav[31]]);
        assert_eq!(byte_rate, 16_000);
    }

    #[test]
    fn wav_size_correct() {
        let wav = render_wav(&short_config()).unwrap();

        // 0.25 s at 8 kHz = 2000 mono samples * 2 bytes
        let riff_size = u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]);
        let data_size = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
        assert_eq!(data_size, 4000);
        assert_eq!(riff_size, 36 + 4000);
        assert_eq!(wav.len(), 44 + 4000);
    }

    #[test]
    fn riff_size_excludes_riff_tag_and_size_field() {
        let wav = encode_wav(&[1, -1, 2], 44_100, 1).unwrap();
        let riff_size = u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]);
        assert_eq!(riff_size as usize, wav.len() - 8);
        assert_eq!(riff_size, 36 + 6);
    }

    #[test]
    fn oversized_headers_are_errors() {
        assert!(matches!(
            encode_wav(&[0; 4], 3_000_000_000, 1),
            Err(NoiseError::Config(_))
        ));
        assert!(matches!(
            encode_wav(&[0; 4], 48_000, u16::MAX),
            Err(NoiseError::Config(_))
        ));
        assert!(matches!(
            render_wav(&NoiseConfig {
                sample_rate: 3_000_000_000,
                length_in_seconds: 0.0,
                ..NoiseConfig::default()
            }),
            Err(NoiseError::Config(_))
        ));
        assert!(matches!(
            render_samples(&NoiseConfig {
                length_in_seconds: 1e30,
                ..short_config()
            }),
            Err(NoiseError::Config(_))
        ));
    }

    #[test]
    fn hound_reads_back_rendered_samples() {
        let config = short_config();
        let samples = render_samples(&config).unwrap();
        let wav = render_wav(&config).unwrap();

        let mut reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 8000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);

        let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded, to_pcm_i16(&samples));
    }

    #[test]
    fn samples_respect_amplitude_and_interval() {
        let config = NoiseConfig {
            amplitude: 0.25,
            interval: Interval::Unit,
            ..short_config()
        };
        let samples = render_samples(&config).unwrap();
        assert_eq!(samples.len(), 2000);
        assert!(samples.iter().all(|&s| (0.0..0.25).contains(&s)));
        assert!(samples.iter().any(|&s| s > 0.0), "noise should not be silent");
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = render_wav(&short_config()).unwrap();
        let b = render_wav(&short_config()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn pcm_conversion_clamps_and_silences_nan() {
        let pcm = to_pcm_i16(&[0.0, 1.0, -1.0, 2.0, -3.0, f32::NAN, 0.5]);
        assert_eq!(pcm, vec![0, 32767, -32767, 32767, -32767, 0, 16383]);
    }

    #[test]
    fn invalid_config_is_reported() {
        let config = NoiseConfig {
            seed: Some(0),
            ..short_config()
        };
        assert!(matches!(
            render_wav(&config),
            Err(NoiseError::InvalidSeed { .. })
        ));
    }
}
