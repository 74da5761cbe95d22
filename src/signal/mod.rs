use log::debug;
use rand::Rng;
use std::f64::consts::PI;
use std::fmt;

use crate::config::Config;
use crate::filter::butterworth;

/// Peak level a multi-tone mixture is scaled to when its sum would clip
pub const MULTI_TONE_HEADROOM_PEAK: f64 = 0.9;

/// Recipe for one test signal
#[derive(Debug, Clone, PartialEq)]
pub enum SignalSpec {
    PureTone { frequency: f64 },
    LowpassNoise { cutoff: f64 },
    MultiTone {
        frequencies: Vec<f64>,
        amplitudes: Vec<f64>,
    },
    Sweep { start_freq: f64, end_freq: f64 },
    Silence,
}

impl SignalSpec {
    /// Render this signal with the run parameters in `config`
    pub fn render<R: Rng>(&self, config: &Config, rng: &mut R) -> Vec<f32> {
        let sample_rate = config.sample_rate;
        let duration = config.duration_secs;

        match self {
            SignalSpec::PureTone { frequency } => {
                pure_tone(*frequency, sample_rate, duration, config.tone_amplitude)
            }
            SignalSpec::LowpassNoise { cutoff } => lowpass_noise(
                *cutoff,
                sample_rate,
                duration,
                config.noise_amplitude,
                config.filter_order,
                rng,
            ),
            SignalSpec::MultiTone {
                frequencies,
                amplitudes,
            } => multi_tone(frequencies, amplitudes, sample_rate, duration),
            SignalSpec::Sweep {
                start_freq,
                end_freq,
            } => sweep(
                *start_freq,
                *end_freq,
                sample_rate,
                duration,
                config.sweep_amplitude,
            ),
            SignalSpec::Silence => silence(sample_rate, duration),
        }
    }
}

impl fmt::Display for SignalSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalSpec::PureTone { frequency } => write!(f, "pure tone {} Hz", frequency),
            SignalSpec::LowpassNoise { cutoff } => {
                write!(f, "Gaussian noise, low-pass {} Hz", cutoff)
            }
            SignalSpec::MultiTone {
                frequencies,
                amplitudes,
            } => {
                let parts: Vec<String> = frequencies
                    .iter()
                    .zip(amplitudes)
                    .map(|(freq, amp)| format!("{} Hz @ {}", freq, amp))
                    .collect();
                write!(f, "multi-tone [{}]", parts.join(", "))
            }
            SignalSpec::Sweep {
                start_freq,
                end_freq,
            } => write!(f, "linear sweep {} Hz -> {} Hz", start_freq, end_freq),
            SignalSpec::Silence => write!(f, "silence"),
        }
    }
}

/// Number of samples in a clip of `duration` seconds
pub fn num_samples(sample_rate: u32, duration: f64) -> usize {
    (sample_rate as f64 * duration).round() as usize
}

/// Generate a sine wave at `frequency` Hz.
///
/// Samples sit on the grid `t = i / sample_rate`, so the last sample falls one
/// period of the sample clock short of `duration`. Frequencies above Nyquist
/// are not rejected and alias.
pub fn pure_tone(frequency: f64, sample_rate: u32, duration: f64, amplitude: f64) -> Vec<f32> {
    let sr = sample_rate as f64;
    (0..num_samples(sample_rate, duration))
        .map(|i| {
            let t = i as f64 / sr;
            (amplitude * (2.0 * PI * frequency * t).sin()) as f32
        })
        .collect()
}

/// Generate Gaussian noise with standard deviation `amplitude`, low-pass
/// filtered at `cutoff` Hz with a zero-phase Butterworth filter.
///
/// The output is not re-normalized, so its level drops by whatever the
/// filter removes.
pub fn lowpass_noise<R: Rng>(
    cutoff: f64,
    sample_rate: u32,
    duration: f64,
    amplitude: f64,
    order: usize,
    rng: &mut R,
) -> Vec<f32> {
    let noise = gaussian_noise(num_samples(sample_rate, duration), amplitude, rng);

    let nyquist = sample_rate as f64 / 2.0;
    let filter = butterworth::lowpass(order, cutoff / nyquist);
    filter
        .filtfilt(&noise)
        .into_iter()
        .map(|s| s as f32)
        .collect()
}

/// Draw `len` independent samples from N(0, amplitude^2) using the Box-Muller transform
pub fn gaussian_noise<R: Rng>(len: usize, amplitude: f64, rng: &mut R) -> Vec<f64> {
    let mut samples = Vec::with_capacity(len);
    while samples.len() < len {
        // 1 - [0, 1) keeps u1 away from ln(0)
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = rng.gen::<f64>();
        let radius = (-2.0 * u1.ln()).sqrt();
        let angle = 2.0 * PI * u2;

        samples.push(amplitude * radius * angle.cos());
        if samples.len() < len {
            samples.push(amplitude * radius * angle.sin());
        }
    }
    samples
}

/// Generate the sum of sine components `amplitudes[j] * sin(2π frequencies[j] t)`.
///
/// When the sum peaks above 1.0 the whole buffer is scaled so the peak lands
/// at 0.9; otherwise it is returned as is.
pub fn multi_tone(
    frequencies: &[f64],
    amplitudes: &[f64],
    sample_rate: u32,
    duration: f64,
) -> Vec<f32> {
    let sr = sample_rate as f64;
    let mut wave = vec![0.0f64; num_samples(sample_rate, duration)];

    for (&freq, &amp) in frequencies.iter().zip(amplitudes) {
        for (i, sample) in wave.iter_mut().enumerate() {
            let t = i as f64 / sr;
            *sample += amp * (2.0 * PI * freq * t).sin();
        }
    }

    let peak = wave.iter().fold(0.0f64, |max, s| max.max(s.abs()));
    if peak > 1.0 {
        debug!(
            "Multi-tone peak {:.3} exceeds full scale, normalizing to {}",
            peak, MULTI_TONE_HEADROOM_PEAK
        );
        for sample in wave.iter_mut() {
            *sample = *sample / peak * MULTI_TONE_HEADROOM_PEAK;
        }
    }

    wave.into_iter().map(|s| s as f32).collect()
}

/// Generate a linear chirp from `start_freq` at t = 0 to `end_freq` at t = `duration`
pub fn sweep(
    start_freq: f64,
    end_freq: f64,
    sample_rate: u32,
    duration: f64,
    amplitude: f64,
) -> Vec<f32> {
    let sr = sample_rate as f64;
    let rate = (end_freq - start_freq) / (2.0 * duration);
    (0..num_samples(sample_rate, duration))
        .map(|i| {
            let t = i as f64 / sr;
            let phase = 2.0 * PI * (start_freq * t + rate * t * t);
            (amplitude * phase.sin()) as f32
        })
        .collect()
}

/// Generate digital silence
pub fn silence(sample_rate: u32, duration: f64) -> Vec<f32> {
    vec![0.0; num_samples(sample_rate, duration)]
}
