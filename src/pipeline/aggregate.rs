//! Aggregation over a filtered selection
//!
//! All figures are recomputed from scratch for every selection. An empty
//! selection is a valid state and aggregates to zeros and empty mappings.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::{BTreeMap, BTreeSet};

use crate::surveillance::{Species, SurveillanceRecord, Syndrome};

/// ISO-8601 week (year, week number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IsoWeek {
    pub year: i32,
    pub week: u32,
}

impl IsoWeek {
    /// The ISO week containing `date`
    pub fn of(date: NaiveDate) -> Self {
        let week = date.iso_week();
        Self {
            year: week.year(),
            week: week.week(),
        }
    }

    /// Monday starting this week
    pub fn monday(&self) -> Option<NaiveDate> {
        NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon)
    }
}

impl std::fmt::Display for IsoWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// Cases and animals reported in one week
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekBucket {
    pub cases: usize,
    pub animals: u64,
}

/// Headline metrics and breakdowns for one selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregates {
    /// Number of records
    pub total_cases: usize,
    /// Sum of `animal_count`
    pub animals_affected: u64,
    /// Records with Active status
    pub active_alerts: usize,
    /// Records with Critical severity
    pub critical_cases: usize,
    /// Distinct regions with at least one record
    pub regions_affected: usize,
    pub weekly: BTreeMap<IsoWeek, WeekBucket>,
    pub by_species: BTreeMap<Species, usize>,
    pub by_syndrome: BTreeMap<Syndrome, usize>,
}

impl Aggregates {
    /// Compute every aggregate in a single pass
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a SurveillanceRecord>,
    {
        let mut agg = Aggregates::default();
        let mut regions = BTreeSet::new();

        for record in records {
            agg.total_cases += 1;
            agg.animals_affected += u64::from(record.animal_count);
            if record.is_active() {
                agg.active_alerts += 1;
            }
            if record.is_critical() {
                agg.critical_cases += 1;
            }
            regions.insert(record.region);

            let bucket = agg.weekly.entry(IsoWeek::of(record.date)).or_default();
            bucket.cases += 1;
            bucket.animals += u64::from(record.animal_count);

            *agg.by_species.entry(record.species).or_insert(0) += 1;
            *agg.by_syndrome.entry(record.syndrome).or_insert(0) += 1;
        }

        agg.regions_affected = regions.len();
        agg
    }

    pub fn is_empty(&self) -> bool {
        self.total_cases == 0
    }
}

/// Records reported in the `days` days up to and including `as_of`
pub fn cases_since<'a, I>(records: I, as_of: NaiveDate, days: u32) -> usize
where
    I: IntoIterator<Item = &'a SurveillanceRecord>,
{
    let cutoff = as_of - Duration::days(i64::from(days));
    records
        .into_iter()
        .filter(|r| r.date > cutoff && r.date <= as_of)
        .count()
}
