//! API Routes
//!
//! Route handlers organized by functionality.

pub mod catalog;
pub mod dashboard;
pub mod export;
pub mod health;
pub mod records;

use crate::api::dto::FilterParams;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::pipeline::filter;
use crate::surveillance::SurveillanceRecord;

/// Apply the request's filter parameters to the session dataset
pub(crate) fn select<'a>(
    state: &'a AppState,
    params: &FilterParams,
) -> ApiResult<Vec<&'a SurveillanceRecord>> {
    let criteria = params.to_criteria(state.dataset.window())?;
    let selection = filter(state.dataset.records(), &criteria)?;

    tracing::debug!(
        matched = selection.len(),
        total = state.dataset.len(),
        "Filter applied"
    );

    Ok(selection)
}
