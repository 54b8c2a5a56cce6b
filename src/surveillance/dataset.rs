//! Session dataset
//!
//! The generated table, held read-only for the lifetime of the process.

use serde::Serialize;

use crate::surveillance::error::SurveillanceResult;
use crate::surveillance::generator::{Generator, GeneratorConfig, SamplingProfile};
use crate::surveillance::types::{DateRange, SurveillanceRecord};

/// Immutable snapshot of generated records plus the parameters that produced it
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<SurveillanceRecord>,
    window: DateRange,
    seed: u64,
    profile: SamplingProfile,
}

/// Descriptive statistics for logging and health output
#[derive(Debug, Clone, Serialize)]
pub struct DatasetInfo {
    pub records: usize,
    pub seed: u64,
    pub profile: SamplingProfile,
    pub window_start: chrono::NaiveDate,
    pub window_end: chrono::NaiveDate,
}

impl Dataset {
    /// Generate `n` records with `seed` under `config`
    pub fn generate(n: usize, seed: u64, config: GeneratorConfig) -> SurveillanceResult<Self> {
        let window = config.window;
        let profile = config.profile;
        let records = Generator::new(config)?.generate(n, seed)?;

        tracing::info!(
            records = records.len(),
            seed,
            window = %window,
            "Surveillance dataset ready"
        );

        Ok(Self {
            records,
            window,
            seed,
            profile,
        })
    }

    /// All records, in id order
    pub fn records(&self) -> &[SurveillanceRecord] {
        &self.records
    }

    /// Historical window the records were drawn from
    pub fn window(&self) -> DateRange {
        self.window
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            records: self.records.len(),
            seed: self.seed,
            profile: self.profile,
            window_start: self.window.start,
            window_end: self.window.end,
        }
    }
}

impl std::fmt::Display for DatasetInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} records (seed {}, {} profile) from {} to {}",
            self.records, self.seed, self.profile, self.window_start, self.window_end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_generation() {
        let dataset = Dataset::generate(100, 5, GeneratorConfig::default()).unwrap();

        assert_eq!(dataset.len(), 100);
        assert!(!dataset.is_empty());
        assert_eq!(dataset.seed(), 5);
        assert_eq!(dataset.window(), DateRange::default());
        assert_eq!(
            dataset.records(),
            &crate::surveillance::generate(100, 5).unwrap()[..]
        );

        let info = dataset.info();
        assert_eq!(info.records, 100);
        assert_eq!(
            info.to_string(),
            "100 records (seed 5, uniform profile) from 2024-01-02 to 2024-12-31"
        );
    }

    #[test]
    fn test_dataset_rejects_empty() {
        assert!(Dataset::generate(0, 5, GeneratorConfig::default()).is_err());
    }
}
