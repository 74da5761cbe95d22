use std::collections::HashSet;
use std::fmt;

use crate::signal::SignalSpec;

/// Section of the catalog an entry belongs to, used for progress output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    PureTones,
    LowpassNoise,
    MultiTone,
    Sweeps,
    Silence,
    LowFrequency,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Group::PureTones => "pure sine waves",
            Group::LowpassNoise => "low-pass filtered noise",
            Group::MultiTone => "multi-tone signals",
            Group::Sweeps => "frequency sweeps",
            Group::Silence => "silence (baseline)",
            Group::LowFrequency => "very low frequency signals",
        };
        write!(f, "{}", label)
    }
}

/// One file of the test battery
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub group: Group,
    pub spec: SignalSpec,
    pub filename: String,
}

impl CatalogEntry {
    fn new(group: Group, spec: SignalSpec, filename: impl Into<String>) -> Self {
        Self {
            group,
            spec,
            filename: filename.into(),
        }
    }
}

/// Ordered list of every signal the generator writes
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// The standard 23-file battery
    pub fn standard() -> Self {
        let mut entries = Vec::new();

        for freq in [50, 100, 200, 440, 1000, 5000] {
            entries.push(CatalogEntry::new(
                Group::PureTones,
                SignalSpec::PureTone {
                    frequency: freq as f64,
                },
                format!("{}hz_pure_tone.wav", freq),
            ));
        }

        for cutoff in [50, 100, 200, 500] {
            entries.push(CatalogEntry::new(
                Group::LowpassNoise,
                SignalSpec::LowpassNoise {
                    cutoff: cutoff as f64,
                },
                format!("lowpass_{}hz_noise.wav", cutoff),
            ));
        }

        let multi_tones: [(&[f64], &[f64], &str); 3] = [
            (
                &[100.0, 200.0, 300.0],
                &[0.3, 0.2, 0.1],
                "multi_tone_100_200_300hz.wav",
            ),
            (
                &[50.0, 100.0, 500.0, 1000.0],
                &[0.25, 0.25, 0.15, 0.1],
                "multi_tone_50_100_500_1000hz.wav",
            ),
            // Harmonic series on A4
            (
                &[440.0, 880.0, 1320.0],
                &[0.3, 0.2, 0.15],
                "multi_tone_harmonic_440hz.wav",
            ),
        ];
        for (frequencies, amplitudes, filename) in multi_tones {
            entries.push(CatalogEntry::new(
                Group::MultiTone,
                SignalSpec::MultiTone {
                    frequencies: frequencies.to_vec(),
                    amplitudes: amplitudes.to_vec(),
                },
                filename,
            ));
        }

        for (start, end, filename) in [
            (20.0, 200.0, "sweep_20_to_200hz.wav"),
            (100.0, 5000.0, "sweep_100_to_5000hz.wav"),
            (5000.0, 20000.0, "sweep_5k_to_20khz.wav"),
        ] {
            entries.push(CatalogEntry::new(
                Group::Sweeps,
                SignalSpec::Sweep {
                    start_freq: start,
                    end_freq: end,
                },
                filename,
            ));
        }

        entries.push(CatalogEntry::new(
            Group::Silence,
            SignalSpec::Silence,
            "silence.wav",
        ));

        for freq in [20, 30, 40, 60, 80, 90] {
            entries.push(CatalogEntry::new(
                Group::LowFrequency,
                SignalSpec::PureTone {
                    frequency: freq as f64,
                },
                format!("{}hz_pure_tone.wav", freq),
            ));
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Output filenames in generation order
    pub fn filenames(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.filename.as_str()).collect()
    }

    /// Check that filenames are unique and multi-tone lists are paired
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.filename.as_str()) {
                anyhow::bail!("Duplicate catalog filename: {}", entry.filename);
            }
            if let SignalSpec::MultiTone {
                frequencies,
                amplitudes,
            } = &entry.spec
            {
                if frequencies.len() != amplitudes.len() {
                    anyhow::bail!(
                        "{}: {} frequencies but {} amplitudes",
                        entry.filename,
                        frequencies.len(),
                        amplitudes.len()
                    );
                }
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_size() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), 23);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_group_counts() {
        let catalog = Catalog::standard();
        let count = |group: Group| catalog.entries().iter().filter(|e| e.group == group).count();
        assert_eq!(count(Group::PureTones), 6);
        assert_eq!(count(Group::LowpassNoise), 4);
        assert_eq!(count(Group::MultiTone), 3);
        assert_eq!(count(Group::Sweeps), 3);
        assert_eq!(count(Group::Silence), 1);
        assert_eq!(count(Group::LowFrequency), 6);
    }

    #[test]
    fn test_order_starts_and_ends() {
        let names = Catalog::standard().filenames().join(",");
        assert!(names.starts_with("50hz_pure_tone.wav,100hz_pure_tone.wav"));
        assert!(names.ends_with("80hz_pure_tone.wav,90hz_pure_tone.wav"));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut catalog = Catalog::standard();
        let first = catalog.entries[0].clone();
        catalog.entries.push(first);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unpaired_multi_tone() {
        let catalog = Catalog {
            entries: vec![CatalogEntry::new(
                Group::MultiTone,
                SignalSpec::MultiTone {
                    frequencies: vec![100.0, 200.0],
                    amplitudes: vec![0.5],
                },
                "bad.wav",
            )],
        };
        assert!(catalog.validate().is_err());
    }
}
