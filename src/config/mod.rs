use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sample rate of every generated file (Hz)
    pub sample_rate: u32,

    /// Length of every generated clip (in seconds)
    pub duration_secs: f64,

    /// Directory the WAV files are written to
    pub output_dir: PathBuf,

    /// Peak amplitude of pure tones
    pub tone_amplitude: f64,

    /// Standard deviation of the Gaussian noise before low-pass filtering
    pub noise_amplitude: f64,

    /// Peak amplitude of frequency sweeps
    pub sweep_amplitude: f64,

    /// Order of the Butterworth low-pass used for filtered noise
    pub filter_order: usize,

    /// Fixed seed for the noise source (None for a fresh seed every run)
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            duration_secs: 5.0,
            output_dir: PathBuf::from("test_audio"),
            tone_amplitude: 0.5,
            noise_amplitude: 0.3,
            sweep_amplitude: 0.5,
            filter_order: 4,
            seed: None,
        }
    }
}

impl Config {
    /// Load configuration from JSON file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        self.validate()?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Number of samples in every generated buffer
    pub fn num_samples(&self) -> usize {
        crate::signal::num_samples(self.sample_rate, self.duration_secs)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.sample_rate == 0 {
            anyhow::bail!("sample_rate must be greater than zero");
        }
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            anyhow::bail!(
                "duration_secs ({}) must be a positive, finite number of seconds",
                self.duration_secs
            );
        }
        if self.filter_order == 0 {
            anyhow::bail!("filter_order must be at least 1");
        }
        for (name, value) in [
            ("tone_amplitude", self.tone_amplitude),
            ("noise_amplitude", self.noise_amplitude),
            ("sweep_amplitude", self.sweep_amplitude),
        ] {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("{} ({}) must be a non-negative, finite number", name, value);
            }
        }
        Ok(())
    }
}
