pub mod butterworth;

/// IIR transfer function coefficients in `z^-1` form.
///
/// `b` and `a` are kept at the same length with `a[0] == 1`, which is the
/// layout the transposed direct form II recursion below expects.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    /// Numerator (feedforward) coefficients
    pub b: Vec<f64>,
    /// Denominator (feedback) coefficients
    pub a: Vec<f64>,
}

impl FilterCoefficients {
    /// Build a filter from raw coefficients, normalizing by `a[0]`
    #[cfg(test)]
    pub(crate) fn new(b: Vec<f64>, a: Vec<f64>) -> anyhow::Result<Self> {
        if b.is_empty() || a.is_empty() {
            anyhow::bail!("filter coefficients must not be empty");
        }
        if a[0] == 0.0 {
            anyhow::bail!("leading denominator coefficient must be non-zero");
        }
        Ok(Self::from_normalized(b, a))
    }

    /// Filter that passes its input through unchanged
    pub fn identity() -> Self {
        Self {
            b: vec![1.0],
            a: vec![1.0],
        }
    }

    /// Filter that outputs silence for any input
    pub fn blocking() -> Self {
        Self {
            b: vec![0.0],
            a: vec![1.0],
        }
    }

    fn from_normalized(mut b: Vec<f64>, mut a: Vec<f64>) -> Self {
        let a0 = a[0];
        let len = b.len().max(a.len());
        b.resize(len, 0.0);
        a.resize(len, 0.0);
        for coeff in b.iter_mut().chain(a.iter_mut()) {
            *coeff /= a0;
        }
        Self { b, a }
    }

    /// Number of taps (`max(len(b), len(a))`)
    fn taps(&self) -> usize {
        self.b.len()
    }

    /// Apply the filter forward and then backward so the net phase shift is zero.
    ///
    /// Both ends are extended by `3 * taps` samples of odd reflection about
    /// the end sample (capped at `len - 1`), and each pass starts from the
    /// steady state scaled by its first input sample. Constant and slow
    /// in-band signals come through without edge error. For white noise the
    /// first and last outputs keep an excursion on the order of a raw input
    /// sample, decaying over a few filter time constants. The effective
    /// magnitude response is the square of the filter's own response.
    pub fn filtfilt(&self, samples: &[f64]) -> Vec<f64> {
        if samples.is_empty() {
            return Vec::new();
        }

        let n = samples.len();
        let pad = (3 * self.taps()).min(n - 1);
        let extended = odd_extension(samples, pad);
        let zi = self.steady_state();

        let x0 = extended[0];
        let mut forward = self.run(&extended, zi.iter().map(|z| z * x0).collect());
        forward.reverse();

        let y0 = forward[0];
        let mut backward = self.run(&forward, zi.iter().map(|z| z * y0).collect());
        backward.reverse();

        backward.truncate(pad + n);
        backward.drain(..pad);
        backward
    }

    /// Initial state giving the step response's steady state.
    ///
    /// Solves `zi = A * zi + B` for the transposed direct form II
    /// companion system in closed form.
    pub fn steady_state(&self) -> Vec<f64> {
        let n = self.taps();
        if n < 2 {
            return Vec::new();
        }

        let (b, a) = (&self.b, &self.a);
        let mut zi = vec![0.0; n - 1];

        let a_sum: f64 = a.iter().sum();
        let b_sum: f64 = (1..n).map(|k| b[k] - a[k] * b[0]).sum();
        zi[0] = b_sum / a_sum;

        let mut asum = 1.0;
        let mut csum = 0.0;
        for k in 1..n - 1 {
            asum += a[k];
            csum += b[k] - a[k] * b[0];
            zi[k] = asum * zi[0] - csum;
        }
        zi
    }

    /// Transposed direct form II recursion
    fn run(&self, input: &[f64], mut state: Vec<f64>) -> Vec<f64> {
        let (b, a) = (&self.b, &self.a);
        let order = state.len();
        let mut output = Vec::with_capacity(input.len());

        for &x in input {
            let y = b[0] * x + state.first().copied().unwrap_or(0.0);
            for i in 0..order {
                let next = if i + 1 < order { state[i + 1] } else { 0.0 };
                state[i] = b[i + 1] * x - a[i + 1] * y + next;
            }
            output.push(y);
        }
        output
    }
}

/// Extend `samples` by `pad` points at each end, reflecting oddly about the end samples
fn odd_extension(samples: &[f64], pad: usize) -> Vec<f64> {
    let n = samples.len();
    let first = samples[0];
    let last = samples[n - 1];

    let mut extended = Vec::with_capacity(n + 2 * pad);
    extended.extend((1..=pad).rev().map(|i| 2.0 * first - samples[i]));
    extended.extend_from_slice(samples);
    extended.extend((1..=pad).map(|i| 2.0 * last - samples[n - 1 - i]));
    extended
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn one_pole() -> FilterCoefficients {
        FilterCoefficients::new(vec![0.5], vec![1.0, -0.5]).unwrap()
    }

    /// Seeded pseudo-random input without pulling in an RNG
    fn jitter(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| ((i as f64 * 12.9898).sin() * 43758.5453).fract() - 0.5)
            .collect()
    }

    #[test]
    fn test_new_normalizes_and_pads() {
        let filter = FilterCoefficients::new(vec![2.0], vec![2.0, -1.0]).unwrap();
        assert_eq!(filter.b, vec![1.0, 0.0]);
        assert_eq!(filter.a, vec![1.0, -0.5]);
    }

    #[test]
    fn test_new_rejects_zero_leading_denominator() {
        assert!(FilterCoefficients::new(vec![1.0], vec![0.0, 1.0]).is_err());
        assert!(FilterCoefficients::new(vec![], vec![1.0]).is_err());
    }

    #[test]
    fn test_steady_state_holds_constant_input() {
        let filter = one_pole();
        let zi = filter.steady_state();
        assert_relative_eq!(zi[0], 0.5, epsilon = 1e-12);

        // Starting from the steady state, a unit step produces no transient
        let output = filter.run(&[1.0; 16], zi);
        for y in output {
            assert_relative_eq!(y, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_impulse_response_from_zero_state() {
        let filter = one_pole();
        let output = filter.run(&[1.0, 0.0, 0.0, 0.0], vec![0.0]);
        assert_eq!(output, vec![0.5, 0.25, 0.125, 0.0625]);
    }

    #[test]
    fn test_odd_extension() {
        let extended = odd_extension(&[1.0, 2.0, 4.0, 7.0], 2);
        assert_eq!(extended, vec![-2.0, 0.0, 1.0, 2.0, 4.0, 7.0, 10.0, 12.0]);
    }

    #[test]
    fn test_pad_is_three_times_taps() {
        let filter = butterworth::lowpass(4, 0.1);
        assert_eq!(filter.taps(), 5);

        // Index 15 is the deepest input sample reflected into the padding
        let mut spiked = vec![0.0; 40];
        spiked[15] = 1.0;
        let extended = odd_extension(&spiked, 3 * filter.taps());
        assert_eq!(extended.len(), 40 + 30);
        assert_eq!(extended[0], -1.0);
    }

    #[test]
    fn test_filtfilt_preserves_length_and_constant() {
        let filter = butterworth::lowpass(4, 0.1);
        let input = vec![0.25; 500];
        let output = filter.filtfilt(&input);
        assert_eq!(output.len(), input.len());
        // Edges included: a constant has no boundary error
        for y in output {
            assert_relative_eq!(y, 0.25, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_filtfilt_offset_passes_through_at_edges() {
        let filter = butterworth::lowpass(4, 0.05);
        let noise = jitter(1000);
        let shifted: Vec<f64> = noise.iter().map(|x| x + 0.2).collect();

        let base = filter.filtfilt(&noise);
        let moved = filter.filtfilt(&shifted);
        for (b, m) in base.iter().zip(&moved) {
            assert_relative_eq!(m - b, 0.2, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_filtfilt_is_linear() {
        let filter = butterworth::lowpass(4, 0.05);
        let noise = jitter(800);
        let scaled: Vec<f64> = noise.iter().map(|x| x * -3.0).collect();

        let base = filter.filtfilt(&noise);
        let out = filter.filtfilt(&scaled);
        for (b, o) in base.iter().zip(&out) {
            assert_relative_eq!(*o, -3.0 * b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_filtfilt_handles_short_buffers() {
        let filter = butterworth::lowpass(4, 0.1);
        assert!(filter.filtfilt(&[]).is_empty());
        assert_eq!(filter.filtfilt(&[0.5]).len(), 1);
        assert_eq!(filter.filtfilt(&[0.1, 0.2, 0.3]).len(), 3);
    }

    #[test]
    fn test_filtfilt_has_no_phase_shift() {
        // A slow sine well inside the passband comes back aligned with the input
        let input: Vec<f64> = (0..2000)
            .map(|i| (2.0 * std::f64::consts::PI * i as f64 / 400.0).sin())
            .collect();
        let filter = butterworth::lowpass(4, 0.2);
        let output = filter.filtfilt(&input);
        for (i, (x, y)) in input.iter().zip(&output).enumerate() {
            let tolerance = if (50..1950).contains(&i) { 1e-3 } else { 2e-2 };
            assert!((x - y).abs() < tolerance, "sample {}: expected {}, got {}", i, x, y);
        }
    }

    #[test]
    fn test_identity_and_blocking() {
        let input = [0.3, -0.2, 0.9, 0.0];
        assert_eq!(FilterCoefficients::identity().filtfilt(&input), input.to_vec());
        assert!(FilterCoefficients::blocking()
            .filtfilt(&input)
            .iter()
            .all(|&s| s == 0.0));
    }
}
