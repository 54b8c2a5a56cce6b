//! Wildlife Surveillance Data
//!
//! This module provides the synthetic surveillance table:
//!
//! - **types**: Catalogs (Region, Species, Syndrome, Severity, CaseStatus) and records
//! - **generator**: Seeded synthetic record generator
//! - **dataset**: Immutable session snapshot of generated records
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use wildwatch::surveillance::{generate, Severity};
//!
//! let records = generate(500, 42).unwrap();
//! let critical = records.iter().filter(|r| r.severity == Severity::Critical).count();
//! assert!(critical < records.len());
//! ```

pub mod dataset;
pub mod error;
pub mod generator;
pub mod types;

pub use dataset::{Dataset, DatasetInfo};
pub use error::{SurveillanceError, SurveillanceResult};
pub use generator::{
    generate, Generator, GeneratorConfig, SamplingProfile, JITTER_DEGREES, MAX_RECORDS,
};
pub use types::{
    parse_date, CaseStatus, DateRange, GeoPoint, Region, Severity, Species, SurveillanceRecord,
    Syndrome,
};
