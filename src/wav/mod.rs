use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use log::debug;
use std::path::Path;

/// Full-scale multiplier for 16-bit output
pub const I16_SCALE: f32 = 32767.0;

/// WAV layout shared by every generated file
pub fn mono_pcm16(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Convert a float sample to 16-bit PCM.
///
/// The scaled value is truncated toward zero and then narrowed with
/// two's-complement wrap-around: samples beyond full scale wrap instead of
/// clipping. NaN becomes 0.
pub fn quantize(sample: f32) -> i16 {
    ((sample * I16_SCALE) as i64) as i16
}

/// Write `samples` as a mono 16-bit PCM WAV file at `path`
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let mut writer = WavWriter::create(path, mono_pcm16(sample_rate))
        .with_context(|| format!("Failed to create {}", path.display()))?;

    for &sample in samples {
        writer
            .write_sample(quantize(sample))
            .with_context(|| format!("Failed to write samples to {}", path.display()))?;
    }

    writer
        .finalize()
        .with_context(|| format!("Failed to finalize {}", path.display()))?;

    debug!(
        "Wrote {} samples at {} Hz to {}",
        samples.len(),
        sample_rate,
        path.display()
    );
    Ok(())
}
