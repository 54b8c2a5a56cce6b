//! Record Routes
//!
//! - GET /api/v1/records - Filtered records, paged
//! - GET /api/v1/records/:case_id - A single record

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{FilterParams, PageParams, RecordsResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::routes::select;
use crate::api::state::AppState;
use crate::surveillance::SurveillanceRecord;

/// GET /api/v1/records
///
/// Records matching the filter in id order. `limit` defaults to and is
/// capped at the configured maximum page size.
pub async fn list_records(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
    Query(page): Query<PageParams>,
) -> ApiResult<Json<RecordsResponse>> {
    let max = state.config.max_page_size;
    let limit = page.limit.unwrap_or(max);
    if limit == 0 {
        return Err(ApiError::Validation("limit must be positive".to_string()));
    }
    if limit > max {
        return Err(ApiError::Validation(format!(
            "limit {} exceeds maximum page size {}",
            limit, max
        )));
    }
    let offset = page.offset.unwrap_or(0);

    let selection = select(&state, &params)?;

    Ok(Json(RecordsResponse {
        total: selection.len(),
        offset,
        records: selection
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect(),
    }))
}

/// GET /api/v1/records/:case_id
pub async fn get_record(
    State(state): State<Arc<AppState>>,
    Path(case_id): Path<String>,
) -> ApiResult<Json<SurveillanceRecord>> {
    state
        .dataset
        .records()
        .iter()
        .find(|r| r.case_id.eq_ignore_ascii_case(&case_id))
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Case {} not found", case_id)))
}
