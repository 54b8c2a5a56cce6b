//! Record filtering
//!
//! `FilterCriteria` mirrors the dashboard controls: an optional inclusive
//! date range plus a multi-select per categorical field. Fields combine with
//! AND; the selected values within one field combine with OR. An empty
//! selection places no restriction on its field.

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::surveillance::{
    CaseStatus, DateRange, Region, Severity, Species, SurveillanceError, SurveillanceRecord,
    SurveillanceResult, Syndrome,
};

/// User-selected restrictions on the dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Inclusive report-date range
    pub date_range: Option<DateRange>,
    pub regions: BTreeSet<Region>,
    pub species: BTreeSet<Species>,
    pub syndromes: BTreeSet<Syndrome>,
    pub severities: BTreeSet<Severity>,
    pub statuses: BTreeSet<CaseStatus>,
}

impl FilterCriteria {
    /// The identity filter
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn region(mut self, region: Region) -> Self {
        self.regions.insert(region);
        self
    }

    pub fn species(mut self, species: Species) -> Self {
        self.species.insert(species);
        self
    }

    pub fn syndrome(mut self, syndrome: Syndrome) -> Self {
        self.syndromes.insert(syndrome);
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severities.insert(severity);
        self
    }

    pub fn status(mut self, status: CaseStatus) -> Self {
        self.statuses.insert(status);
        self
    }

    /// True when no field is restricted
    pub fn is_unrestricted(&self) -> bool {
        self.date_range.is_none()
            && self.regions.is_empty()
            && self.species.is_empty()
            && self.syndromes.is_empty()
            && self.severities.is_empty()
            && self.statuses.is_empty()
    }

    /// Reject criteria that cannot describe any real selection
    pub fn validate(&self) -> SurveillanceResult<()> {
        if let Some(range) = self.date_range {
            DateRange::new(range.start, range.end)?;
        }
        Ok(())
    }

    /// Check if a record satisfies every restriction
    pub fn matches(&self, record: &SurveillanceRecord) -> bool {
        if let Some(range) = self.date_range {
            if !range.contains(record.date) {
                return false;
            }
        }

        selected(&self.regions, &record.region)
            && selected(&self.species, &record.species)
            && selected(&self.syndromes, &record.syndrome)
            && selected(&self.severities, &record.severity)
            && selected(&self.statuses, &record.status)
    }
}

fn selected<T: Ord>(selection: &BTreeSet<T>, value: &T) -> bool {
    selection.is_empty() || selection.contains(value)
}

/// Narrow `records` to those matching `criteria`, preserving order
pub fn filter<'a>(
    records: &'a [SurveillanceRecord],
    criteria: &FilterCriteria,
) -> SurveillanceResult<Vec<&'a SurveillanceRecord>> {
    criteria.validate()?;

    if criteria.is_unrestricted() {
        return Ok(records.iter().collect());
    }

    Ok(records.iter().filter(|r| criteria.matches(r)).collect())
}

/// Parse a comma-separated list of catalog names; blank input selects nothing
pub fn parse_selection<T>(raw: Option<&str>) -> SurveillanceResult<BTreeSet<T>>
where
    T: FromStr<Err = SurveillanceError> + Ord,
{
    let Some(raw) = raw else {
        return Ok(BTreeSet::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(T::from_str)
        .collect()
}
