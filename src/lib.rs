//! # Wildlife Health Watch
//!
//! Syndromic surveillance dashboard backend: a seeded generator of synthetic
//! wildlife-health records and the filter/aggregate pipeline that turns them
//! into map, chart and headline-metric payloads.
//!
//! ## Modules
//!
//! - [`surveillance`]: Catalogs, records and the synthetic data generator
//! - [`pipeline`]: Filtering, aggregation and presentation shapes
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use wildwatch::pipeline::{Dashboard, FilterCriteria};
//! use wildwatch::surveillance::{Dataset, GeneratorConfig, Region};
//!
//! let dataset = Dataset::generate(500, 42, GeneratorConfig::default()).unwrap();
//!
//! let criteria = FilterCriteria::new().region(Region::Amboseli);
//! let dashboard = Dashboard::build(&dataset, &criteria).unwrap();
//!
//! let species_total: usize = dashboard.species.iter().map(|c| c.count).sum();
//! assert_eq!(species_total, dashboard.summary.total_cases);
//! ```

pub mod api;
pub mod config;
pub mod pipeline;
pub mod surveillance;

// Re-export top-level types for convenience
pub use surveillance::{
    generate, CaseStatus, Dataset, DateRange, Generator, GeneratorConfig, Region,
    SamplingProfile, Severity, Species, SurveillanceError, SurveillanceRecord,
    SurveillanceResult, Syndrome,
};

pub use pipeline::{filter, Aggregates, Dashboard, FilterCriteria, Summary};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, DatasetConfig, LoggingConfig};
