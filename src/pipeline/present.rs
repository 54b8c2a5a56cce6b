//! Presentation shapes
//!
//! Turns a filtered selection and its aggregates into the payloads the
//! dashboard widgets consume: map markers, weekly series, ranked category
//! counts, headline metrics and the recent-cases table.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::pipeline::aggregate::{cases_since, Aggregates};
use crate::pipeline::filter::{filter, FilterCriteria};
use crate::surveillance::{
    Dataset, Region, Severity, Species, SurveillanceRecord, SurveillanceResult, Syndrome,
};

/// Rows in the recent-cases table
pub const RECENT_CASES_LIMIT: usize = 10;

/// Look-back for the "cases this month" headline
pub const RECENT_WINDOW_DAYS: u32 = 30;

/// One map marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub case_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub severity: Severity,
    /// Marker colour for the severity
    pub color: &'static str,
    pub region: Region,
    pub species: Species,
    pub syndrome: Syndrome,
    /// Marker size
    pub animal_count: u32,
    pub date: NaiveDate,
}

/// One bar of the weekly time series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyCount {
    /// ISO week label, e.g. `2024-W05`
    pub week: String,
    /// Monday of the week
    pub week_start: Option<NaiveDate>,
    pub cases: usize,
    pub animals: u64,
}

/// One slice of a category chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// Headline metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_cases: usize,
    pub active_alerts: usize,
    pub critical_cases: usize,
    pub animals_affected: u64,
    pub regions_affected: usize,
    /// Cases reported in the 30 days up to the reference date
    pub cases_last_30_days: usize,
}

/// Complete dashboard payload for one filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub summary: Summary,
    pub map: Vec<MapPoint>,
    pub timeline: Vec<WeeklyCount>,
    pub species: Vec<CategoryCount>,
    pub syndromes: Vec<CategoryCount>,
    pub recent_cases: Vec<SurveillanceRecord>,
}

impl Dashboard {
    /// Filter the dataset and shape every widget payload
    pub fn build(dataset: &Dataset, criteria: &FilterCriteria) -> SurveillanceResult<Self> {
        let selection = filter(dataset.records(), criteria)?;
        Ok(Self::from_selection(&selection, dataset.window().end))
    }

    /// Shape an already-filtered selection; `as_of` anchors the recent-cases metric
    pub fn from_selection(selection: &[&SurveillanceRecord], as_of: NaiveDate) -> Self {
        let agg = Aggregates::compute(selection.iter().copied());

        Self {
            summary: summarize(&agg, selection, as_of),
            map: map_points(selection),
            timeline: timeline(&agg),
            species: ranked(&agg.by_species),
            syndromes: ranked(&agg.by_syndrome),
            recent_cases: recent_cases(selection, RECENT_CASES_LIMIT),
        }
    }
}

/// Headline metrics for a selection
pub fn summarize(agg: &Aggregates, selection: &[&SurveillanceRecord], as_of: NaiveDate) -> Summary {
    Summary {
        total_cases: agg.total_cases,
        active_alerts: agg.active_alerts,
        critical_cases: agg.critical_cases,
        animals_affected: agg.animals_affected,
        regions_affected: agg.regions_affected,
        cases_last_30_days: cases_since(selection.iter().copied(), as_of, RECENT_WINDOW_DAYS),
    }
}

pub fn map_points(selection: &[&SurveillanceRecord]) -> Vec<MapPoint> {
    selection
        .iter()
        .map(|r| MapPoint {
            case_id: r.case_id.clone(),
            latitude: r.latitude,
            longitude: r.longitude,
            severity: r.severity,
            color: r.severity.color(),
            region: r.region,
            species: r.species,
            syndrome: r.syndrome,
            animal_count: r.animal_count,
            date: r.date,
        })
        .collect()
}

/// Weekly series in chronological order
pub fn timeline(agg: &Aggregates) -> Vec<WeeklyCount> {
    agg.weekly
        .iter()
        .map(|(week, bucket)| WeeklyCount {
            week: week.to_string(),
            week_start: week.monday(),
            cases: bucket.cases,
            animals: bucket.animals,
        })
        .collect()
}

/// Counts sorted by count descending; ties keep catalog order
pub fn ranked<T>(counts: &BTreeMap<T, usize>) -> Vec<CategoryCount>
where
    T: Ord + std::fmt::Display,
{
    let mut out: Vec<CategoryCount> = counts
        .iter()
        .map(|(key, count)| CategoryCount {
            label: key.to_string(),
            count: *count,
        })
        .collect();
    // stable sort
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

/// Most recent records first (same day: higher id first)
pub fn recent_cases(selection: &[&SurveillanceRecord], limit: usize) -> Vec<SurveillanceRecord> {
    let mut sorted: Vec<&SurveillanceRecord> = selection.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    sorted.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surveillance::{CaseStatus, DateRange, GeneratorConfig};

    fn dataset() -> Dataset {
        Dataset::generate(500, 42, GeneratorConfig::default()).unwrap()
    }

    #[test]
    fn test_dashboard_unfiltered() {
        let dataset = dataset();
        let dash = Dashboard::build(&dataset, &FilterCriteria::default()).unwrap();

        assert_eq!(dash.summary.total_cases, 500);
        assert_eq!(dash.map.len(), 500);
        assert_eq!(dash.recent_cases.len(), RECENT_CASES_LIMIT);
        assert_eq!(
            dash.species.iter().map(|c| c.count).sum::<usize>(),
            dash.summary.total_cases
        );
        assert_eq!(
            dash.timeline.iter().map(|w| w.cases).sum::<usize>(),
            dash.summary.total_cases
        );
        assert!(dash.summary.cases_last_30_days > 0);
        assert!(dash.summary.cases_last_30_days < 500);
    }

    #[test]
    fn test_dashboard_empty_selection() {
        let dataset = dataset();
        let day = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let criteria = FilterCriteria::new()
            .species(Species::Rhino)
            .date_range(DateRange::new(day, day).unwrap());
        let dash = Dashboard::build(&dataset, &criteria).unwrap();

        assert_eq!(dash.summary, Summary::default());
        assert!(dash.map.is_empty());
        assert!(dash.timeline.is_empty());
        assert!(dash.species.is_empty());
        assert!(dash.syndromes.is_empty());
        assert!(dash.recent_cases.is_empty());
    }

    #[test]
    fn test_active_filter_summary() {
        let dataset = dataset();
        let criteria = FilterCriteria::new().status(CaseStatus::Active);
        let dash = Dashboard::build(&dataset, &criteria).unwrap();

        assert_eq!(dash.summary.active_alerts, dash.summary.total_cases);
        assert!(dash.recent_cases.iter().all(|r| r.is_active()));
    }

    #[test]
    fn test_map_points_carry_severity_color() {
        let dataset = dataset();
        let selection: Vec<_> = dataset.records().iter().collect();
        for point in map_points(&selection) {
            assert_eq!(point.color, point.severity.color());
        }
    }

    #[test]
    fn test_ranked_orders_by_count_then_catalog() {
        let counts = BTreeMap::from([
            (Syndrome::Respiratory, 2),
            (Syndrome::Neurological, 5),
            (Syndrome::Ocular, 2),
        ]);
        let labels: Vec<_> = ranked(&counts).into_iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["Neurological", "Respiratory", "Ocular"]);
    }

    #[test]
    fn test_recent_cases_are_newest_first() {
        let dataset = dataset();
        let selection: Vec<_> = dataset.records().iter().collect();
        let recent = recent_cases(&selection, 10);

        assert_eq!(recent.len(), 10);
        assert!(recent.windows(2).all(|w| w[0].date >= w[1].date));

        let newest = dataset.records().iter().map(|r| r.date).max().unwrap();
        assert_eq!(recent[0].date, newest);

        assert_eq!(recent_cases(&selection[..3], 10).len(), 3);
    }

    #[test]
    fn test_summary_serializes_flat() {
        let json = serde_json::to_value(Summary::default()).unwrap();
        assert_eq!(json["total_cases"], 0);
        assert_eq!(json["cases_last_30_days"], 0);
    }
}
