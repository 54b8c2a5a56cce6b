//! Filter-and-Present Pipeline
//!
//! Narrows the session dataset to the user's selection and shapes the
//! result for display. Every stage is a pure function of its input and is
//! re-run in full on each filter change.
//!
//! ```text
//! Dataset → filter(criteria) → Aggregates::compute → Dashboard
//! ```
//!
//! # Example
//!
//! ```rust
//! use wildwatch::pipeline::{filter, Aggregates, FilterCriteria};
//! use wildwatch::surveillance::{generate, Severity};
//!
//! let records = generate(500, 42).unwrap();
//! let criteria = FilterCriteria::new().severity(Severity::Critical);
//! let selection = filter(&records, &criteria).unwrap();
//! let agg = Aggregates::compute(selection.iter().copied());
//!
//! assert_eq!(agg.critical_cases, selection.len());
//! ```

pub mod aggregate;
pub mod filter;
pub mod present;

pub use aggregate::{cases_since, Aggregates, IsoWeek, WeekBucket};
pub use filter::{filter, parse_selection, FilterCriteria};
pub use present::{
    map_points, ranked, recent_cases, summarize, timeline, CategoryCount, Dashboard, MapPoint,
    Summary, WeeklyCount, RECENT_CASES_LIMIT, RECENT_WINDOW_DAYS,
};
