use anyhow::{Context, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::PathBuf;

use crate::catalog::{Catalog, Group};
use crate::config::Config;
use crate::wav;

/// Files written by a completed run, in generation order
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub files: Vec<PathBuf>,
}

pub struct BatteryGenerator<R: Rng = StdRng> {
    config: Config,
    catalog: Catalog,
    rng: R,
}

impl BatteryGenerator<StdRng> {
    /// Create a generator for the standard catalog.
    ///
    /// Noise is seeded from `config.seed` when set, otherwise from OS entropy.
    pub fn new(config: Config) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> BatteryGenerator<R> {
    /// Create a generator drawing noise from `rng`
    pub fn with_rng(config: Config, rng: R) -> Result<Self> {
        config.validate()?;
        let catalog = Catalog::standard();
        catalog.validate()?;

        Ok(Self {
            config,
            catalog,
            rng,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Generate and write every catalog entry in order, stopping at the first error
    pub fn run(&mut self) -> Result<RunSummary> {
        self.ensure_output_dir()?;

        info!("Generating test audio files...");
        info!("Sample rate: {} Hz", self.config.sample_rate);
        info!("Duration: {} seconds", self.config.duration_secs);
        info!("Output directory: {}", self.config.output_dir.display());

        let mut summary = RunSummary::default();
        let mut current_group: Option<Group> = None;
        let mut section = 0;

        for entry in &self.catalog {
            if current_group != Some(entry.group) {
                section += 1;
                info!("{}. Generating {}...", section, entry.group);
                current_group = Some(entry.group);
            }

            let samples = entry.spec.render(&self.config, &mut self.rng);
            debug!("{}: {} ({} samples)", entry.filename, entry.spec, samples.len());

            let path = self.config.output_dir.join(&entry.filename);
            wav::write_wav(&path, &samples, self.config.sample_rate)?;
            info!("Generated: {}", path.display());

            summary.files.push(path);
        }

        info!(
            "All {} test files generated in '{}'",
            summary.files.len(),
            self.config.output_dir.display()
        );
        log_expected_results();

        Ok(summary)
    }

    fn ensure_output_dir(&self) -> Result<()> {
        let dir = &self.config.output_dir;
        if dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        info!("Created directory: {}", dir.display());
        Ok(())
    }
}

fn log_expected_results() {
    info!("Expected FFT results:");
    info!("  - Pure tones: Should show peak at corresponding frequency bin");
    info!("  - Low-pass noise: Should show energy only below cutoff frequency");
    info!("  - Multi-tone: Should show peaks at all component frequencies");
    info!("  - Sweeps: Should show energy across the swept frequency range");
    info!("  - Silence: Should show minimal/no energy across all frequencies");
}
