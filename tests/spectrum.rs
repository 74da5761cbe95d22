use rustfft::{num_complex::Complex, FftPlanner};

/// Magnitude of the positive-frequency half of the DFT (bins 0..=n/2)
pub fn magnitude_spectrum(samples: &[f32]) -> Vec<f32> {
    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(samples.len());

    let mut buffer: Vec<Complex<f32>> = samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
    fft.process(&mut buffer);

    buffer[..samples.len() / 2 + 1]
        .iter()
        .map(|c| c.norm())
        .collect()
}

/// Index of the strongest bin, ignoring DC
pub fn peak_bin(spectrum: &[f32]) -> usize {
    spectrum
        .iter()
        .enumerate()
        .skip(1)
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Spectral energy (below, above) `cutoff` Hz
#[allow(dead_code)]
pub fn energy_split(samples: &[f32], sample_rate: u32, cutoff: f32) -> (f64, f64) {
    let spectrum = magnitude_spectrum(samples);
    let bin_hz = sample_rate as f32 / samples.len() as f32;

    let mut below = 0.0;
    let mut above = 0.0;
    for (i, mag) in spectrum.iter().enumerate() {
        let power = (*mag as f64).powi(2);
        if i as f32 * bin_hz <= cutoff {
            below += power;
        } else {
            above += power;
        }
    }
    (below, above)
}

/// Average frequency over a window, estimated from its zero crossings
#[allow(dead_code)]
pub fn zero_crossing_frequency(window: &[f32], sample_rate: u32) -> f32 {
    let crossings = window
        .windows(2)
        .filter(|pair| (pair[0] < 0.0) != (pair[1] < 0.0))
        .count();
    let seconds = window.len() as f32 / sample_rate as f32;
    crossings as f32 / (2.0 * seconds)
}
