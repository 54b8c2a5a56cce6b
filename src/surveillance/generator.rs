//! Synthetic Data Generator
//!
//! Produces the synthetic surveillance table. Every record is sampled from
//! its own RNG stream derived from `(seed, id)`, so records never depend on
//! each other: output is deterministic per seed, and a shorter run is always
//! a prefix of a longer one.
//!
//! # Sampling
//!
//! ```text
//! region   uniform over 8
//! date     uniform over the window
//! species  uniform over 10            (Field: fixed abundance weights)
//! syndrome uniform over 8             (Field: seasonal weights by month)
//! severity Low 40 / Moderate 35 / High 20 / Critical 5
//! animals  Low 1-3 / Moderate 1-5 / High 3-10 / Critical 5-20
//! status   recency weights, Active boosted for High (x2) and Critical (x3)
//! lat/lon  region anchor +- 0.2 degrees, rounded to 4 places
//! ```

use chrono::Datelike;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::surveillance::error::{SurveillanceError, SurveillanceResult};
use crate::surveillance::types::{
    CaseStatus, DateRange, Region, Severity, Species, SurveillanceRecord, Syndrome,
};

/// Largest dataset the generator will produce
pub const MAX_RECORDS: usize = 1_000_000;

/// Maximum coordinate offset from a region anchor, in degrees
pub const JITTER_DEGREES: f64 = 0.2;

const SEVERITY_WEIGHTS: [u32; 4] = [40, 35, 20, 5];

const FIELD_SPECIES_WEIGHTS: [u32; 10] = [15, 8, 20, 12, 18, 15, 5, 2, 3, 7];

const DRY_SEASON_SYNDROMES: [u32; 8] = [25, 15, 10, 15, 10, 10, 5, 10];
const WET_SEASON_SYNDROMES: [u32; 8] = [15, 25, 10, 10, 10, 15, 10, 5];
const OFF_SEASON_SYNDROMES: [u32; 8] = [15, 15, 15, 15, 10, 15, 10, 5];

/// (Active, Resolved, Under Investigation) by days before window end:
/// < 14, < 60, older
const STATUS_BY_RECENCY: [[u32; 3]; 3] = [[60, 20, 20], [30, 50, 20], [10, 80, 10]];

/// Multiplier on the Active weight, indexed by severity
const ACTIVE_SKEW: [u32; 4] = [1, 1, 2, 3];

/// How categorical fields other than region and severity are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingProfile {
    /// Species and syndrome drawn uniformly from their catalogs
    #[default]
    Uniform,
    /// Species by field abundance, syndromes by wet/dry season
    Field,
}

impl std::fmt::Display for SamplingProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SamplingProfile::Uniform => write!(f, "uniform"),
            SamplingProfile::Field => write!(f, "field"),
        }
    }
}

impl std::str::FromStr for SamplingProfile {
    type Err = SurveillanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uniform" => Ok(SamplingProfile::Uniform),
            "field" => Ok(SamplingProfile::Field),
            other => Err(SurveillanceError::unknown("sampling profile", other)),
        }
    }
}

/// Configuration for the generator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratorConfig {
    /// Historical window all report dates fall into
    pub window: DateRange,
    /// Species/syndrome sampling profile
    pub profile: SamplingProfile,
}

/// Synthetic surveillance record generator
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    severity: WeightedIndex<u32>,
    field_species: WeightedIndex<u32>,
    /// Dry, wet, off-season
    seasonal_syndromes: Vec<WeightedIndex<u32>>,
    /// Indexed by `recency_band * 4 + severity`
    status: Vec<WeightedIndex<u32>>,
}

fn weighted(weights: &[u32]) -> SurveillanceResult<WeightedIndex<u32>> {
    WeightedIndex::new(weights).map_err(|e| {
        SurveillanceError::InvalidArgument(format!("invalid sampling weights: {}", e))
    })
}

impl Generator {
    /// Create a generator for the given window and profile
    pub fn new(config: GeneratorConfig) -> SurveillanceResult<Self> {
        // windows built by hand or deserialized skip the start <= end check
        DateRange::new(config.window.start, config.window.end)?;

        let seasonal_syndromes = [
            DRY_SEASON_SYNDROMES,
            WET_SEASON_SYNDROMES,
            OFF_SEASON_SYNDROMES,
        ]
        .iter()
        .map(|w| weighted(w))
        .collect::<SurveillanceResult<Vec<_>>>()?;

        let mut status = Vec::with_capacity(STATUS_BY_RECENCY.len() * ACTIVE_SKEW.len());
        for base in STATUS_BY_RECENCY {
            for skew in ACTIVE_SKEW {
                status.push(weighted(&[base[0] * skew, base[1], base[2]])?);
            }
        }

        Ok(Self {
            config,
            severity: weighted(&SEVERITY_WEIGHTS)?,
            field_species: weighted(&FIELD_SPECIES_WEIGHTS)?,
            seasonal_syndromes,
            status,
        })
    }

    /// Generate exactly `n` records in id order
    pub fn generate(&self, n: usize, seed: u64) -> SurveillanceResult<Vec<SurveillanceRecord>> {
        if n == 0 {
            return Err(SurveillanceError::InvalidArgument(
                "record count must be positive".to_string(),
            ));
        }
        if n > MAX_RECORDS {
            return Err(SurveillanceError::InvalidArgument(format!(
                "record count {} exceeds maximum of {}",
                n, MAX_RECORDS
            )));
        }

        let started = Instant::now();
        let records: Vec<SurveillanceRecord> =
            (0..n as u32).map(|id| self.record(id, seed)).collect();

        tracing::debug!(
            records = records.len(),
            seed,
            window = %self.config.window,
            profile = %self.config.profile,
            elapsed_us = started.elapsed().as_micros() as u64,
            "Generated surveillance records"
        );

        Ok(records)
    }

    /// Sample the record at position `id` for `seed`
    pub fn record(&self, id: u32, seed: u64) -> SurveillanceRecord {
        let mut rng = StdRng::seed_from_u64(stream_seed(seed, u64::from(id)));
        let window = self.config.window;

        let region = Region::ALL[rng.gen_range(0..Region::ALL.len())];

        let offset = rng.gen_range(0..window.days());
        let date = window.start + chrono::Duration::days(i64::from(offset));

        let species = match self.config.profile {
            SamplingProfile::Uniform => Species::ALL[rng.gen_range(0..Species::ALL.len())],
            SamplingProfile::Field => Species::ALL[self.field_species.sample(&mut rng)],
        };

        let syndrome = match self.config.profile {
            SamplingProfile::Uniform => Syndrome::ALL[rng.gen_range(0..Syndrome::ALL.len())],
            SamplingProfile::Field => {
                let season = match date.month() {
                    6..=8 => 0,
                    3..=5 | 11 => 1,
                    _ => 2,
                };
                Syndrome::ALL[self.seasonal_syndromes[season].sample(&mut rng)]
            }
        };

        let severity_idx = self.severity.sample(&mut rng);
        let severity = Severity::ALL[severity_idx];

        let animal_count = match severity {
            Severity::Low => rng.gen_range(1..=3),
            Severity::Moderate => rng.gen_range(1..=5),
            Severity::High => rng.gen_range(3..=10),
            Severity::Critical => rng.gen_range(5..=20),
        };

        let days_before_end = (window.end - date).num_days();
        let band = if days_before_end < 14 {
            0
        } else if days_before_end < 60 {
            1
        } else {
            2
        };
        let status = CaseStatus::ALL[self.status[band * ACTIVE_SKEW.len() + severity_idx]
            .sample(&mut rng)];

        let anchor = region.anchor();
        let latitude = round4(anchor.latitude + rng.gen_range(-JITTER_DEGREES..=JITTER_DEGREES));
        let longitude =
            round4(anchor.longitude + rng.gen_range(-JITTER_DEGREES..=JITTER_DEGREES));

        SurveillanceRecord {
            id,
            case_id: format!("WHW-{}-{:04}", window.end.year(), id + 1),
            date,
            region,
            species,
            syndrome,
            severity,
            animal_count,
            status,
            latitude,
            longitude,
        }
    }
}

/// Generate `n` records over the default window with the uniform profile
pub fn generate(n: usize, seed: u64) -> SurveillanceResult<Vec<SurveillanceRecord>> {
    Generator::new(GeneratorConfig::default())?.generate(n, seed)
}

/// SplitMix64 over (seed, id): independent, well-spread per-record seeds
fn stream_seed(seed: u64, id: u64) -> u64 {
    let mut z = seed.wrapping_add(id.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
