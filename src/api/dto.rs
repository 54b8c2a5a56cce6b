//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::pipeline::{parse_selection, CategoryCount, FilterCriteria, MapPoint, Summary, WeeklyCount};
use crate::surveillance::{
    parse_date, CaseStatus, DatasetInfo, DateRange, GeoPoint, Region, Severity, Species,
    SurveillanceRecord, SurveillanceResult, Syndrome,
};

// ============================================
// FILTER DTOs
// ============================================

/// Filter query parameters shared by every data endpoint
///
/// List fields are comma-separated catalog names, e.g.
/// `?regions=Amboseli,Meru&severities=High,Critical&start=2024-03-01`.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    /// First report date (YYYY-MM-DD), inclusive
    #[serde(default)]
    pub start: Option<String>,
    /// Last report date (YYYY-MM-DD), inclusive
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub regions: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub syndromes: Option<String>,
    #[serde(default)]
    pub severities: Option<String>,
    #[serde(default)]
    pub statuses: Option<String>,
}

impl FilterParams {
    /// Convert to criteria; a missing date bound defaults to the window edge
    pub fn to_criteria(&self, window: DateRange) -> SurveillanceResult<FilterCriteria> {
        let start = non_blank(&self.start).map(parse_date).transpose()?;
        let end = non_blank(&self.end).map(parse_date).transpose()?;

        // A lone bound never inverts the range on its own
        let date_range = match (start, end) {
            (None, None) => None,
            (Some(start), None) => Some(DateRange::new(start, window.end.max(start))?),
            (None, Some(end)) => Some(DateRange::new(window.start.min(end), end)?),
            (Some(start), Some(end)) => Some(DateRange::new(start, end)?),
        };

        Ok(FilterCriteria {
            date_range,
            regions: parse_selection::<Region>(self.regions.as_deref())?,
            species: parse_selection::<Species>(self.species.as_deref())?,
            syndromes: parse_selection::<Syndrome>(self.syndromes.as_deref())?,
            severities: parse_selection::<Severity>(self.severities.as_deref())?,
            statuses: parse_selection::<CaseStatus>(self.statuses.as_deref())?,
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// ============================================
// RECORD DTOs
// ============================================

/// Pagination parameters for the records listing
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

/// Filtered records page
#[derive(Debug, Serialize)]
pub struct RecordsResponse {
    /// Records matching the filter (before paging)
    pub total: usize,
    pub offset: usize,
    pub records: Vec<SurveillanceRecord>,
}

// ============================================
// DASHBOARD DTOs
// ============================================

/// Headline metrics response
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: Summary,
    /// Records in the whole dataset, for "x of y" display
    pub dataset_size: usize,
}

/// Map markers response
#[derive(Debug, Serialize)]
pub struct MapResponse {
    /// Suggested initial map centre
    pub center: GeoPoint,
    pub points: Vec<MapPoint>,
}

/// Weekly series response
#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub weeks: Vec<WeeklyCount>,
}

/// Category chart response
#[derive(Debug, Serialize)]
pub struct BreakdownResponse {
    pub species: Vec<CategoryCount>,
    pub syndromes: Vec<CategoryCount>,
}

// ============================================
// CATALOG DTOs
// ============================================

/// Region option with its map anchor
#[derive(Debug, Serialize)]
pub struct RegionOption {
    pub name: Region,
    pub anchor: GeoPoint,
}

/// Options for every filter control
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub regions: Vec<RegionOption>,
    pub species: Vec<Species>,
    pub syndromes: Vec<Syndrome>,
    pub severities: Vec<Severity>,
    pub statuses: Vec<CaseStatus>,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
}

// ============================================
// EXPORT DTOs
// ============================================

/// Export query parameters
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// Format: json, csv, ndjson
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "csv".to_string()
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, unhealthy
    pub status: String,
    pub dataset: DatasetInfo,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> DateRange {
        DateRange::default()
    }

    #[test]
    fn test_empty_params_are_identity() {
        let criteria = FilterParams::default().to_criteria(window()).unwrap();
        assert!(criteria.is_unrestricted());
    }

    #[test]
    fn test_params_to_criteria() {
        let params = FilterParams {
            start: Some("2024-03-01".into()),
            regions: Some("Amboseli,Tsavo East".into()),
            severities: Some("critical".into()),
            statuses: Some("under_investigation".into()),
            ..Default::default()
        };
        let criteria = params.to_criteria(window()).unwrap();

        let range = criteria.date_range.unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(range.end, window().end);
        assert_eq!(criteria.regions.len(), 2);
        assert!(criteria.severities.contains(&Severity::Critical));
        assert!(criteria.statuses.contains(&CaseStatus::UnderInvestigation));
        assert!(criteria.species.is_empty());
    }

    #[test]
    fn test_malformed_params_are_rejected() {
        let bad_date = FilterParams {
            end: Some("yesterday".into()),
            ..Default::default()
        };
        assert!(bad_date.to_criteria(window()).is_err());

        let inverted = FilterParams {
            start: Some("2024-06-01".into()),
            end: Some("2024-05-01".into()),
            ..Default::default()
        };
        assert!(inverted.to_criteria(window()).is_err());

        let unknown = FilterParams {
            species: Some("Lion,Unicorn".into()),
            ..Default::default()
        };
        assert!(unknown.to_criteria(window()).is_err());
    }

    #[test]
    fn test_lone_bound_outside_window_is_valid() {
        let params = FilterParams {
            start: Some("2030-01-01".into()),
            ..Default::default()
        };
        let range = params.to_criteria(window()).unwrap().date_range.unwrap();
        assert_eq!(range.start, range.end);
    }

    #[test]
    fn test_blank_dates_are_ignored() {
        let params = FilterParams {
            start: Some("  ".into()),
            end: Some(String::new()),
            ..Default::default()
        };
        assert!(params.to_criteria(window()).unwrap().date_range.is_none());
    }
}
