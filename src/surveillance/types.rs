//! Core data types for the surveillance dataset
//!
//! This module defines the fixed catalogs and the record shape:
//! - `Region`, `Species`, `Syndrome`: closed category catalogs
//! - `Severity` and `CaseStatus`: ordinal/status labels
//! - `SurveillanceRecord`: one row of the synthetic table
//! - `DateRange`: an inclusive calendar-date interval

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::surveillance::error::{SurveillanceError, SurveillanceResult};

/// Lowercase alphanumerics only, so "Nairobi NP", "nairobi-np" and
/// "NAIROBI_NP" all compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

macro_rules! catalog {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant, )+
        }

        impl $name {
            /// Every entry of the catalog, in catalog order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Human-readable name, as shown in the dashboard
            pub fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.pad(self.name())
            }
        }

        impl std::str::FromStr for $name {
            type Err = SurveillanceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = normalize(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|entry| normalize(entry.name()) == wanted)
                    .ok_or_else(|| SurveillanceError::unknown($kind, s.trim()))
            }
        }
    };
}

catalog! {
    /// Monitoring region used to bucket and map records
    pub enum Region("region") {
        MaasaiMara => "Maasai Mara",
        Amboseli => "Amboseli",
        TsavoEast => "Tsavo East",
        TsavoWest => "Tsavo West",
        Samburu => "Samburu",
        LakeNakuru => "Lake Nakuru",
        NairobiNp => "Nairobi NP",
        Meru => "Meru",
    }
}

catalog! {
    /// Wildlife species observed in a case
    pub enum Species("species") {
        AfricanElephant => "African Elephant",
        Lion => "Lion",
        Zebra => "Zebra",
        Giraffe => "Giraffe",
        Buffalo => "Buffalo",
        Wildebeest => "Wildebeest",
        Hippopotamus => "Hippopotamus",
        Rhino => "Rhino",
        Cheetah => "Cheetah",
        Hyena => "Hyena",
    }
}

catalog! {
    /// Syndromic category: a clinical grouping of observed symptoms
    pub enum Syndrome("syndrome") {
        Respiratory => "Respiratory",
        Gastrointestinal => "Gastrointestinal",
        Neurological => "Neurological",
        Dermatological => "Dermatological",
        Musculoskeletal => "Musculoskeletal",
        SuddenDeath => "Sudden Death",
        Reproductive => "Reproductive",
        Ocular => "Ocular",
    }
}

catalog! {
    /// Ordinal case urgency (Low < Moderate < High < Critical)
    pub enum Severity("severity") {
        Low => "Low",
        Moderate => "Moderate",
        High => "High",
        Critical => "Critical",
    }
}

catalog! {
    /// Case status
    pub enum CaseStatus("status") {
        /// Unresolved, raises an active alert
        Active => "Active",
        Resolved => "Resolved",
        UnderInvestigation => "Under Investigation",
    }
}

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl Region {
    /// Approximate centre of the monitoring region
    pub fn anchor(&self) -> GeoPoint {
        let (latitude, longitude) = match self {
            Region::MaasaiMara => (-1.4833, 35.1333),
            Region::Amboseli => (-2.6527, 37.2606),
            Region::TsavoEast => (-2.6857, 38.7578),
            Region::TsavoWest => (-3.0167, 38.0667),
            Region::Samburu => (0.5833, 37.5333),
            Region::LakeNakuru => (-0.3667, 36.0833),
            Region::NairobiNp => (-1.3733, 36.8581),
            Region::Meru => (0.0500, 38.1833),
        };
        GeoPoint {
            latitude,
            longitude,
        }
    }
}

impl Severity {
    /// Map marker colour for this severity
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Low => "#95D5B2",
            Severity::Moderate => "#74C69D",
            Severity::High => "#F4A261",
            Severity::Critical => "#E63946",
        }
    }
}

/// Inclusive calendar-date interval: [start, end]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day (inclusive)
    pub start: NaiveDate,
    /// Last day (inclusive)
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> SurveillanceResult<Self> {
        if start > end {
            return Err(SurveillanceError::InvalidArgument(format!(
                "date range start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// The `days` calendar days ending at (and including) `end`
    pub fn ending(end: NaiveDate, days: u32) -> SurveillanceResult<Self> {
        if days == 0 {
            return Err(SurveillanceError::InvalidArgument(
                "window must span at least one day".to_string(),
            ));
        }
        let start = end
            .checked_sub_signed(Duration::days(i64::from(days) - 1))
            .ok_or_else(|| {
                SurveillanceError::InvalidArgument(format!(
                    "window of {} days ending {} is out of the supported date range",
                    days, end
                ))
            })?;
        Ok(Self { start, end })
    }

    /// Check if a date falls within this range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, counting both ends
    pub fn days(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }
}

impl Default for DateRange {
    /// The 365 days ending 2024-12-31
    fn default() -> Self {
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or(NaiveDate::MIN);
        Self {
            start: end - Duration::days(364),
            end,
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> SurveillanceResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| SurveillanceError::InvalidDate(s.trim().to_string()))
}

/// One row of the synthetic surveillance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveillanceRecord {
    /// Sequence position within the generated dataset
    pub id: u32,
    /// Display identifier, e.g. `WHW-2024-0001`
    pub case_id: String,
    /// Report date
    pub date: NaiveDate,
    pub region: Region,
    pub species: Species,
    pub syndrome: Syndrome,
    pub severity: Severity,
    /// Animals affected in the event (always >= 1)
    pub animal_count: u32,
    pub status: CaseStatus,
    pub latitude: f64,
    pub longitude: f64,
}

impl SurveillanceRecord {
    /// Whether this case raises an active alert
    pub fn is_active(&self) -> bool {
        self.status == CaseStatus::Active
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}
